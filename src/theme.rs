//! Colours: one per piece marker plus the sheet chrome, in three palettes.

use crate::Palette;
use ratatui::style::Color;

/// Lowest marker a piece paints with; markers run 2..=8.
const FIRST_MARKER: i64 = 2;

#[derive(Debug, Clone)]
pub struct Theme {
    /// Cell backgrounds for markers 2..=8, in order.
    pub markers: [Color; 7],
    /// Empty cell background.
    pub bg: Color,
    /// Borders and gridlines.
    pub div_line: Color,
    /// Row numbers and column letters.
    pub header_fg: Color,
    /// Cell text and sidebar text.
    pub main_fg: Color,
    pub title: Color,
    pub inactive_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark()
    }
}

impl Theme {
    pub fn for_palette(palette: Palette) -> Self {
        let mut theme = Self::onedark();
        match palette {
            Palette::Normal => {}
            Palette::HighContrast => {
                theme.markers = [
                    Color::Rgb(0xFF, 0x00, 0xFF), // magenta
                    Color::Rgb(0xFF, 0xFF, 0x00), // yellow
                    Color::Rgb(0x00, 0xFF, 0x00), // bright green
                    Color::Rgb(0x00, 0x88, 0xFF), // blue
                    Color::Rgb(0x00, 0xFF, 0xFF), // cyan
                    Color::Rgb(0xFF, 0x88, 0x00), // orange
                    Color::Rgb(0xFF, 0x00, 0x00), // red
                ];
                theme.main_fg = Color::White;
            }
            Palette::Colorblind => {
                // Okabe-Ito
                theme.markers = [
                    Color::Rgb(0xCC, 0x79, 0xA7),
                    Color::Rgb(0xF0, 0xE4, 0x42),
                    Color::Rgb(0x00, 0x9E, 0x73),
                    Color::Rgb(0x00, 0x72, 0xB2),
                    Color::Rgb(0x56, 0xB4, 0xE9),
                    Color::Rgb(0xE6, 0x9F, 0x00),
                    Color::Rgb(0xD5, 0x5E, 0x00),
                ];
            }
        }
        theme
    }

    fn onedark() -> Self {
        Self {
            markers: [
                Color::Rgb(0xC6, 0x78, 0xDD), // magenta
                Color::Rgb(0xE5, 0xC0, 0x7B), // yellow
                Color::Rgb(0x98, 0xC3, 0x79), // green
                Color::Rgb(0x61, 0xAF, 0xEF), // blue
                Color::Rgb(0x56, 0xB6, 0xC2), // cyan
                Color::Rgb(0xD1, 0x9A, 0x66), // orange
                Color::Rgb(0xE0, 0x6C, 0x75), // red
            ],
            bg: Color::Rgb(0x31, 0x35, 0x3F),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            header_fg: Color::Rgb(0x5C, 0x63, 0x70),
            main_fg: Color::Rgb(0xAB, 0xB2, 0xBF),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            inactive_fg: Color::Rgb(0x5C, 0x63, 0x70),
        }
    }

    /// Background for a cell holding `value`. Constants that no piece paints get the
    /// divider colour.
    pub fn marker_color(&self, value: i64) -> Color {
        usize::try_from(value - FIRST_MARKER)
            .ok()
            .and_then(|i| self.markers.get(i).copied())
            .unwrap_or(self.div_line)
    }
}
