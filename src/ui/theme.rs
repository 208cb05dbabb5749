use ratatui::style::Color;

use crate::nav::Theme;

/// Colours for one theme. The active palette is picked from the navigation
/// snapshot on every frame, so a theme change recolours the whole UI at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub neutral: Color,
    pub background: Color,
    pub accent: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Zen => Palette {
            primary: Color::from_u32(0x0098c9a3),
            secondary: Color::from_u32(0x00587b5f),
            neutral: Color::from_u32(0x00404a44),
            background: Color::from_u32(0x000c110e),
            accent: Color::from_u32(0x00e6dcb8),
        },
        Theme::Blaze => Palette {
            primary: Color::from_u32(0x00ff5a36),
            secondary: Color::from_u32(0x00a3261b),
            neutral: Color::from_u32(0x00483030),
            background: Color::from_u32(0x00120808),
            accent: Color::from_u32(0x00ffc145),
        },
        Theme::Neon => Palette {
            primary: Color::from_u32(0x0000e5ff),
            secondary: Color::from_u32(0x00b537f2),
            neutral: Color::from_u32(0x003a3a55),
            background: Color::from_u32(0x000b0a16),
            accent: Color::from_u32(0x00ff3df2),
        },
    }
}
