//! Canvas sizing.
//!
//! Two strategies have shipped with different module revisions:
//!
//! - [`SizingStrategy::Divisor`] shrinks the smaller viewport side until the
//!   board area (the share not taken by the panel) is an exact multiple of the
//!   board size.
//! - [`SizingStrategy::Step`] picks the largest integer scale whose board plus
//!   panel fits the width and whose board, stretched by 7/6, fits the height.
//!
//! Both use integer arithmetic only and refuse to produce a scale below 1.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GAME_PANEL_SIZE, GAME_WINDOW_PADDING, MENU_ITEMS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    #[error("game size must be positive")]
    ZeroGameSize,

    #[error("menu item count must be positive")]
    NoMenuItems,

    #[error("viewport {width}x{height} is too small for a board of size {game_size}")]
    ViewportTooSmall {
        width: u32,
        height: u32,
        game_size: u32,
    },
}

/// Visible area of the browser window in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from `window.innerWidth` / `window.innerHeight`, which arrive as
    /// doubles. Negative and NaN values collapse to zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_css_pixels(width: f64, height: f64) -> Self {
        let clamp = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v.floor().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        };
        Self::new(clamp(width), clamp(height))
    }

    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// Fixed layout inputs for a board of `game_size` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingConfig {
    pub game_size: u32,
    pub panel_size: u32,
    pub menu_items: u32,
    pub padding: u32,
}

impl SizingConfig {
    pub fn new(game_size: u32) -> Self {
        Self {
            game_size,
            panel_size: GAME_PANEL_SIZE,
            menu_items: MENU_ITEMS,
            padding: GAME_WINDOW_PADDING,
        }
    }

    fn check(&self) -> Result<(), SizingError> {
        if self.game_size == 0 {
            return Err(SizingError::ZeroGameSize);
        }
        if self.menu_items == 0 {
            return Err(SizingError::NoMenuItems);
        }
        Ok(())
    }

    fn too_small(&self, viewport: Viewport) -> SizingError {
        SizingError::ViewportTooSmall {
            width: viewport.width,
            height: viewport.height,
            game_size: self.game_size,
        }
    }
}

/// Result of fitting a board into a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasFit {
    /// Pixels per board unit, always at least 1.
    pub scale: u32,
    /// Edge length of the board area in pixels (`scale * game_size`).
    pub display_size: u32,
    /// Pixels given up by the divisor search to reach an exact multiple.
    /// Always 0 for the step strategy.
    pub shrink: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingStrategy {
    Divisor,
    Step,
}

impl SizingStrategy {
    pub fn fit(self, config: &SizingConfig, viewport: Viewport) -> Result<CanvasFit, SizingError> {
        let fit = match self {
            SizingStrategy::Divisor => fit_divisor(config, viewport),
            SizingStrategy::Step => fit_step(config, viewport),
        }?;
        tracing::debug!(
            strategy = ?self,
            width = viewport.width,
            height = viewport.height,
            scale = fit.scale,
            display_size = fit.display_size,
            "canvas fitted"
        );
        Ok(fit)
    }
}

/// Upper bound on the shrink steps the divisor search takes before it meets
/// an exact multiple: `game_size * (menu_items + 1) / gcd(menu_items, game_size)`.
pub fn divisor_search_bound(config: &SizingConfig) -> u64 {
    let game_size = u64::from(config.game_size);
    let menu_items = u64::from(config.menu_items);
    game_size * (menu_items + 1) / gcd(menu_items, game_size).max(1)
}

/// The board area is `(side - i) * m / (m + 1)` for shrink `i`. It is an exact
/// multiple of `g` iff `(side - i) * m` is divisible by `g * (m + 1)`, so the
/// search never leaves the integers.
fn fit_divisor(config: &SizingConfig, viewport: Viewport) -> Result<CanvasFit, SizingError> {
    config.check()?;

    let Some(side) = viewport.min_side().checked_sub(2 * config.padding) else {
        return Err(config.too_small(viewport));
    };

    let menu_items = u64::from(config.menu_items);
    let step = u64::from(config.game_size) * (menu_items + 1);
    let side = u64::from(side);

    let mut shrink = 0;
    let multiple = loop {
        // numerator > step held on the previous iteration and step > menu_items,
        // so side - shrink stays positive.
        let numerator = (side - shrink) * menu_items;
        if numerator % step == 0 {
            break numerator / step;
        }
        if numerator <= step {
            break 0;
        }
        shrink += 1;
    };

    if multiple == 0 {
        return Err(config.too_small(viewport));
    }

    // multiple * game_size <= side, which came from a u32.
    let scale = u32::try_from(multiple).map_err(|_| config.too_small(viewport))?;
    let shrink = u32::try_from(shrink).map_err(|_| config.too_small(viewport))?;
    Ok(CanvasFit {
        scale,
        display_size: scale * config.game_size,
        shrink,
    })
}

/// Largest `s` with `s * g + panel < width` and `s * g * 7 / 6 < height`.
fn fit_step(config: &SizingConfig, viewport: Viewport) -> Result<CanvasFit, SizingError> {
    config.check()?;

    let game_size = u64::from(config.game_size);
    let width = u64::from(viewport.width);
    let height = u64::from(viewport.height);
    let panel = u64::from(config.panel_size);

    let by_width = match width.checked_sub(panel + 1) {
        Some(room) => room / game_size,
        None => 0,
    };
    let by_height = match (6 * height).checked_sub(1) {
        Some(room) => room / (7 * game_size),
        None => 0,
    };

    let scale = by_width.min(by_height);
    if scale == 0 {
        return Err(config.too_small(viewport));
    }

    let scale = u32::try_from(scale).map_err(|_| config.too_small(viewport))?;
    Ok(CanvasFit {
        scale,
        display_size: scale * config.game_size,
        shrink: 0,
    })
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The increment-then-step-back loop the step strategy replaces.
    fn step_by_loop(config: &SizingConfig, viewport: Viewport) -> u32 {
        let g = f64::from(config.game_size);
        let mut scale = 1u32;
        while f64::from(scale) * g + f64::from(config.panel_size) < f64::from(viewport.width)
            && f64::from(scale) * (g * 7.0 / 6.0) < f64::from(viewport.height)
        {
            scale += 1;
        }
        scale - 1
    }

    #[test]
    fn test_divisor_square_board() {
        let config = SizingConfig::new(64);
        let fit = SizingStrategy::Divisor
            .fit(&config, Viewport::new(800, 600))
            .unwrap();

        // side 580, first exact multiple at 448 px of side -> 384 px board
        assert_eq!(fit.scale, 6);
        assert_eq!(fit.display_size, 384);
        assert_eq!(fit.shrink, 132);
    }

    #[test]
    fn test_divisor_exact_on_first_step() {
        let config = SizingConfig::new(8);
        // side 448 -> area 384, already a multiple of 8
        let fit = SizingStrategy::Divisor
            .fit(&config, Viewport::new(468, 1000))
            .unwrap();
        assert_eq!(fit.shrink, 0);
        assert_eq!(fit.scale, 48);
    }

    #[test]
    fn test_divisor_viewport_too_small() {
        let config = SizingConfig::new(64);
        let result = SizingStrategy::Divisor.fit(&config, Viewport::new(100, 100));
        assert!(matches!(result, Err(SizingError::ViewportTooSmall { .. })));

        let result = SizingStrategy::Divisor.fit(&config, Viewport::new(15, 900));
        assert!(matches!(result, Err(SizingError::ViewportTooSmall { .. })));
    }

    #[test]
    fn test_divisor_properties_hold_across_viewports() {
        for game_size in [8, 16, 32, 64, 100] {
            let config = SizingConfig::new(game_size);
            let bound = divisor_search_bound(&config);
            for side in (0..1600).step_by(7) {
                let viewport = Viewport::new(side + 50, side);
                let Ok(fit) = SizingStrategy::Divisor.fit(&config, viewport) else {
                    continue;
                };
                assert!(fit.scale >= 1);
                assert_eq!(fit.display_size, fit.scale * game_size);
                assert!(fit.display_size <= side - 2 * config.padding);
                assert!(u64::from(fit.shrink) < bound);
            }
        }
    }

    #[test]
    fn test_divisor_bound_exceeds_game_size() {
        // Searching for an exact multiple can take more than game_size steps.
        let config = SizingConfig::new(8);
        assert_eq!(divisor_search_bound(&config), 28);
    }

    #[test]
    fn test_step_wide_viewport() {
        let config = SizingConfig::new(64);
        let fit = SizingStrategy::Step
            .fit(&config, Viewport::new(1280, 720))
            .unwrap();
        assert_eq!(fit.scale, 9);
        assert_eq!(fit.display_size, 576);
        assert_eq!(fit.shrink, 0);
    }

    #[test]
    fn test_step_matches_loop() {
        // multiples of 6 keep g * 7 / 6 exact in floating point
        for game_size in [6, 12, 48, 60] {
            let config = SizingConfig::new(game_size);
            for width in (200..2000).step_by(37) {
                for height in (50..1200).step_by(41) {
                    let viewport = Viewport::new(width, height);
                    let expected = step_by_loop(&config, viewport);
                    match SizingStrategy::Step.fit(&config, viewport) {
                        Ok(fit) => assert_eq!(fit.scale, expected),
                        Err(_) => assert_eq!(expected, 0),
                    }
                }
            }
        }
    }

    #[test]
    fn test_step_panel_wider_than_window() {
        let config = SizingConfig::new(64);
        let result = SizingStrategy::Step.fit(&config, Viewport::new(240, 900));
        assert!(matches!(result, Err(SizingError::ViewportTooSmall { .. })));
    }

    #[test]
    fn test_invalid_inputs() {
        let config = SizingConfig::new(0);
        assert_eq!(
            SizingStrategy::Step.fit(&config, Viewport::new(800, 600)),
            Err(SizingError::ZeroGameSize)
        );

        let config = SizingConfig {
            menu_items: 0,
            ..SizingConfig::new(64)
        };
        assert_eq!(
            SizingStrategy::Divisor.fit(&config, Viewport::new(800, 600)),
            Err(SizingError::NoMenuItems)
        );
    }

    #[test]
    fn test_viewport_from_css_pixels() {
        assert_eq!(Viewport::from_css_pixels(1024.7, 768.0), Viewport::new(1024, 768));
        assert_eq!(Viewport::from_css_pixels(-5.0, f64::NAN), Viewport::new(0, 0));
    }
}
