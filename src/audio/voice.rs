use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One synthesized note, ready to hand to the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub frequency: f32,
    pub waveform: Waveform,
    /// Gain at onset; the envelope decays from here.
    pub gain: f32,
    pub duration: Duration,
    /// Offset from "now" at which the note starts.
    pub delay: Duration,
}

/// Where voices go. Playback is fire-and-forget: once handed over, a voice
/// decays on its own and cannot be recalled.
pub trait VoiceSink: Send + Sync {
    fn play(&self, voice: Voice);
}
