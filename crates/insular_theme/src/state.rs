//! Theme state

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use insular_core::{parse_color, Color};
use serde::Deserialize;
use tracing::trace;

use crate::tokens::{BrandPalette, ColorToken};

/// Dark tone used when the body background cannot be read
pub const DEFAULT_BASE_COLOR: Color = Color::rgb(16.0 / 255.0, 16.0 / 255.0, 33.0 / 255.0);

/// Theme shared between renderers (readers) and the backdrop effect
pub type SharedTheme = Rc<RefCell<ThemeState>>;

/// Computed theme values
///
/// Deserialises from the `[theme]` table of `insular.toml`:
///
/// ```toml
/// body_background = "rgb(16, 16, 33)"
///
/// [custom_properties]
/// "--color-alerta" = "#f93243"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeState {
    custom_properties: IndexMap<String, String>,
    body_background: Option<String>,
}

impl ThemeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedTheme {
        Rc::new(RefCell::new(self))
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.custom_properties.insert(name.into(), value.into());
    }

    /// Value of a custom property, `None` when unset or blank
    pub fn property(&self, name: &str) -> Option<&str> {
        self.custom_properties
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn set_body_background(&mut self, value: impl Into<String>) {
        self.body_background = Some(value.into());
    }

    pub fn body_background(&self) -> Option<&str> {
        self.body_background.as_deref()
    }

    /// Resolve a brand token, falling back to its built-in colour
    pub fn color(&self, token: ColorToken) -> Color {
        match self.property(token.css_var()).and_then(parse_color) {
            Some(color) => color,
            None => {
                trace!("theme: {} unresolved, using fallback", token.css_var());
                token.fallback()
            }
        }
    }

    pub fn palette(&self) -> BrandPalette {
        BrandPalette(ColorToken::PALETTE.map(|t| self.color(t)))
    }

    /// Opaque body background, or [`DEFAULT_BASE_COLOR`]
    pub fn base_color(&self) -> Color {
        self.body_background
            .as_deref()
            .and_then(parse_color)
            .map(|c| c.with_alpha(1.0))
            .unwrap_or(DEFAULT_BASE_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks() {
        let theme = ThemeState::new();
        assert_eq!(theme.base_color().to_rgb8(), [16, 16, 33]);
        assert_eq!(theme.palette(), BrandPalette::default());
        assert_eq!(
            theme.color(ColorToken::Alerta).to_rgb8(),
            [0xF9, 0x32, 0x43]
        );
    }

    #[test]
    fn test_custom_properties_override() {
        let mut theme = ThemeState::new();
        theme.set_property("--color-alerta", " #000 ");
        theme.set_property("--color-red-electrica", "not a colour");
        theme.set_body_background("rgb(250, 250, 250)");

        assert_eq!(theme.color(ColorToken::Alerta).to_rgb8(), [0, 0, 0]);
        // unparseable values fall back
        assert_eq!(
            theme.color(ColorToken::RedElectrica),
            ColorToken::RedElectrica.fallback()
        );
        assert_eq!(theme.base_color().to_rgb8(), [250, 250, 250]);
    }

    #[test]
    fn test_blank_property_is_unset() {
        let mut theme = ThemeState::new();
        theme.set_property("--color-alerta", "   ");
        assert_eq!(theme.property("--color-alerta"), None);
    }

    #[test]
    fn test_deserialize_partial_table() {
        let theme: ThemeState = toml::from_str(
            r##"
            body_background = "#101021"

            [custom_properties]
            "--color-billete-nuevot" = "#00ff00"
            "##,
        )
        .unwrap();
        assert_eq!(theme.base_color().to_rgb8(), [0x10, 0x10, 0x21]);
        assert_eq!(
            theme.color(ColorToken::BilleteNuevo).to_rgb8(),
            [0, 255, 0]
        );
    }
}
