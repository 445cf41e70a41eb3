//! Brand colour tokens

use insular_core::Color;

/// Brand colours exposed as CSS custom properties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorToken {
    /// Electric purple
    RedElectrica,
    /// Alert red
    Alerta,
    /// Mint, the colour of a new banknote
    BilleteNuevo,
}

impl ColorToken {
    /// Palette order used by the colour cycle
    pub const PALETTE: [ColorToken; 3] = [
        ColorToken::RedElectrica,
        ColorToken::Alerta,
        ColorToken::BilleteNuevo,
    ];

    /// Name of the custom property that carries the token
    pub fn css_var(&self) -> &'static str {
        match self {
            ColorToken::RedElectrica => "--color-red-electrica",
            ColorToken::Alerta => "--color-alerta",
            ColorToken::BilleteNuevo => "--color-billete-nuevot",
        }
    }

    /// Built-in value when the property is missing or unparseable
    pub fn fallback(&self) -> Color {
        match self {
            ColorToken::RedElectrica => Color::from_hex(0x422BE2),
            ColorToken::Alerta => Color::from_hex(0xF93243),
            ColorToken::BilleteNuevo => Color::from_hex(0x9BD1B8),
        }
    }
}

/// The three-colour palette the trail cycles through
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrandPalette(pub [Color; 3]);

impl BrandPalette {
    pub fn colors(&self) -> &[Color; 3] {
        &self.0
    }
}

impl Default for BrandPalette {
    fn default() -> Self {
        BrandPalette(ColorToken::PALETTE.map(|t| t.fallback()))
    }
}
