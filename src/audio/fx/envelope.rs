use std::time::Duration;

use super::Stage;

/// Level the envelope reaches at the end of the note, relative to onset.
/// Exponential ramps cannot reach zero, and this is already inaudible.
pub const DECAY_FLOOR: f32 = 0.001;

/// Exponential fade from unity down to `DECAY_FLOOR` over `duration` of a
/// mono signal. There is no attack ramp; the note starts at full level.
pub struct Decay {
    level: f32,
    factor: f32,
}

impl Decay {
    pub fn new(duration: Duration, sample_rate: u32) -> Self {
        let samples = (duration.as_secs_f32() * sample_rate as f32).max(1.0);
        Self {
            level: 1.0,
            factor: DECAY_FLOOR.powf(samples.recip()),
        }
    }
}

impl Stage for Decay {
    fn apply(&mut self, sample: f32) -> f32 {
        let out = sample * self.level;
        self.level *= self.factor;
        out
    }
}
