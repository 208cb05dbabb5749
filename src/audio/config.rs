use std::time::Duration;

use crate::util::dirs::PROJECT_NAME;

#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Start gain of a lead note at 100% volume.
    pub lead_gain_ceiling: f32,
    /// Start gain of the octave-down bass note at 100% volume.
    pub bass_gain_ceiling: f32,
    pub sfx_gain_ceiling: f32,
    pub note_duration: Duration,
    pub bass_probability: f64,
    /// Upper bound (exclusive) of the random delay added to each tick.
    pub tempo_jitter: Duration,
    pub sfx_note_spacing: Duration,
    pub sample_rate: u32,
    /// Fixed seed for the pattern generator; random when unset.
    pub seed: Option<u64>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            lead_gain_ceiling: 0.10,
            bass_gain_ceiling: 0.05,
            sfx_gain_ceiling: 0.12,
            note_duration: Duration::from_millis(800),
            bass_probability: 0.4,
            tempo_jitter: Duration::from_millis(200),
            sfx_note_spacing: Duration::from_millis(50),
            sample_rate: 44_100,
            seed: None,
        }
    }
}

impl AudioConfig {
    /// Defaults, with `GAMEFOLIO_AUDIO_SEED` pinning the music sequence.
    pub fn from_env() -> Self {
        let seed = std::env::var(format!("{}_AUDIO_SEED", *PROJECT_NAME))
            .ok()
            .and_then(|raw| raw.trim().parse().ok());
        Self {
            seed,
            ..Self::default()
        }
    }
}
