//! Insular Theme
//!
//! The page's theme as the motion crates see it: a bag of CSS custom
//! properties plus the body background colour. Renderers resolve their
//! colours from it at mount and resize time and never write to it; the one
//! writer is the section backdrop effect, which tweens the body background.

mod state;
mod tokens;

pub use state::{SharedTheme, ThemeState, DEFAULT_BASE_COLOR};
pub use tokens::{BrandPalette, ColorToken};
