use crate::{audio::SfxKind, nav::Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// What the user asked for, already decoded from keys and clicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Quit,
    /// Selection moved within a menu.
    Hover,

    // Navigation
    EnterMainMenu,
    StartGame,
    OpenSettings,
    GoBack,
    OpenPauseMenu,
    ClosePauseMenu,
    ReturnToMainMenu,

    // Preferences
    SetTheme(Theme),
    MusicVolume(Step),
    SfxVolume(Step),
    Parallax(Step),
    ToggleMusic,
    ToggleSfx,
    ToggleCursor,
}

impl Intent {
    /// Sound to confirm the intent with.
    pub fn feedback(self) -> Option<SfxKind> {
        match self {
            Intent::Quit => None,
            Intent::Hover => Some(SfxKind::Hover),
            _ => Some(SfxKind::Select),
        }
    }
}
