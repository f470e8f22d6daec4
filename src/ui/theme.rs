use ratatui::style::{Color, Style};

use crate::engine::ColumnKey;

/// Color theme for jobkan.
///
/// Text and chrome use the terminal's default foreground; color is
/// reserved for the pipeline columns (dots, hover borders) and the
/// error state of the status bar.
pub struct Theme;

impl Theme {
    pub const FG: Color = Color::Reset;
    pub const DIM: Color = Color::DarkGray;

    pub const COLUMN_BORDER: Color = Color::Reset;
    pub const CARD_BORDER: Color = Color::Reset;

    pub const STATUS_ERROR: Color = Color::Red;

    pub fn dim_style() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_style() -> Style {
        Style::default().fg(Self::FG)
    }

    /// Accent color for a pipeline column.
    pub fn column_color(key: ColumnKey) -> Color {
        match key {
            ColumnKey::Open => Color::Rgb(0x8b, 0x5c, 0xf6),
            ColumnKey::Applied => Color::Rgb(0x3b, 0x82, 0xf6),
            ColumnKey::Shortlisted => Color::Rgb(0x0e, 0xa5, 0xe9),
            ColumnKey::Interview => Color::Rgb(0xf5, 0x9e, 0x0b),
            ColumnKey::Offer => Color::Rgb(0x10, 0xb9, 0x81),
            ColumnKey::Rejected => Color::Rgb(0xef, 0x44, 0x44),
            ColumnKey::Closed => Color::Rgb(0x64, 0x74, 0x8b),
        }
    }
}
