use ratatui::style::Color;

/// Storefront palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary_bg: Color,
    pub primary_fg: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub price: Color,
    pub warning: Color,
    pub danger: Color,
    pub on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_bg: Color::Rgb(0x1a, 0x00, 0x1b),
            primary_fg: Color::White,
            accent: Color::Rgb(0xe6, 0x3c, 0x80),
            accent_alt: Color::Rgb(0xc7, 0x04, 0x52),
            muted: Color::Rgb(0xf0, 0xb9, 0xcf),
            selection_bg: Color::Rgb(0x4b, 0x00, 0x4c),
            selection_fg: Color::White,
            price: Color::LightGreen,
            warning: Color::Yellow,
            danger: Color::LightRed,
            on_accent: Color::White,
        }
    }
}
