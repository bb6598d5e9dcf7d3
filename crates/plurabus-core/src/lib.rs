//! Plurabus Core Library
//!
//! Target-independent logic shared by the page server and the browser client:
//! launch request validation, the argument list handed to the external game
//! module, canvas sizing, and the URLs the pages link to.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod counter;
pub mod csp;
pub mod launch;
pub mod link;
pub mod sizing;

pub use action::{Action, ActionError};
pub use counter::CounterDisplay;
pub use csp::{ContentSecurityPolicy, Directive};
pub use launch::{
    LaunchArguments, LaunchMode, LaunchPayload, LaunchRequest, LaunchToken, ModuleRevision,
    PairStringRule, ValidationError,
};
pub use link::{LinkError, LobbyKey};
pub use sizing::{CanvasFit, SizingConfig, SizingError, Viewport};

/// Width of the side panel the game module draws next to the board.
pub const GAME_PANEL_SIZE: u32 = 240;
/// Menu entries visible in the panel.
pub const MENU_ITEMS: u32 = 6;
/// Upper bound on units, also the largest accepted board size.
pub const UNIT_LIMIT: u32 = 4096;
/// Padding around the game window in CSS pixels.
pub const GAME_WINDOW_PADDING: u32 = 10;
