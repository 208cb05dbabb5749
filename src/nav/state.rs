use serde::{Deserialize, Deserializer, Serialize};

pub const VOLUME_STEP: u8 = 10;
pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    StartScreen,
    MainMenu,
    Settings,
    Portfolio,
    PauseMenu,
}

/// The three visual/audio skins. `Zen` is the calm one, `Blaze` the
/// aggressive one, `Neon` sits in between and is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Zen,
    Blaze,
    #[default]
    Neon,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Zen, Theme::Blaze, Theme::Neon];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Zen => "Zen",
            Theme::Blaze => "Blaze",
            Theme::Neon => "Neon",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Theme::Zen => Theme::Blaze,
            Theme::Blaze => Theme::Neon,
            Theme::Neon => Theme::Zen,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Theme::Zen => Theme::Neon,
            Theme::Blaze => Theme::Zen,
            Theme::Neon => Theme::Blaze,
        }
    }
}

/// Coarse context used to pick the background music pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MusicLocation {
    #[default]
    Menu,
    Portfolio,
}

/// The subset of the navigation state that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    #[serde(deserialize_with = "saturating_volume")]
    pub music_volume: u8,
    #[serde(deserialize_with = "saturating_volume")]
    pub sfx_volume: u8,
    pub music_enabled: bool,
    pub sfx_enabled: bool,
    pub parallax_intensity: f32,
    pub cursor_enabled: bool,
}

/// Accepts any JSON number and saturates it into `0..=100`, so one
/// out-of-range volume does not throw away the rest of the record.
fn saturating_volume<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, MAX_VOLUME as f64) as u8)
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            music_volume: 80,
            sfx_volume: 80,
            music_enabled: true,
            sfx_enabled: true,
            parallax_intensity: 1.0,
            cursor_enabled: true,
        }
    }
}

impl Preferences {
    /// Brings a record read from outside the process back into range.
    pub fn sanitized(mut self) -> Self {
        self.music_volume = self.music_volume.min(MAX_VOLUME);
        self.sfx_volume = self.sfx_volume.min(MAX_VOLUME);
        if !self.parallax_intensity.is_finite() || self.parallax_intensity < 0.0 {
            self.parallax_intensity = Preferences::default().parallax_intensity;
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    pub current_screen: Screen,
    pub previous_screen: Option<Screen>,
    pub music_location: MusicLocation,
    pub prefs: Preferences,
}

impl NavigationState {
    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            prefs,
            ..Self::default()
        }
    }
}

pub fn step_up(volume: u8) -> u8 {
    volume.saturating_add(VOLUME_STEP).min(MAX_VOLUME)
}

pub fn step_down(volume: u8) -> u8 {
    volume.min(MAX_VOLUME).saturating_sub(VOLUME_STEP)
}
