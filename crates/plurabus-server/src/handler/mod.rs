use axum::{extract::State, response::Response};

use crate::{error::AppError, pages::Page, state::AppState};

pub mod action;
pub mod launch;

/// Lobby page with the public, private and practice buttons.
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    Page::Index {
        site_key: state.site_key(),
    }
    .render()
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
