use std::f32::consts::TAU;
use std::time::Duration;

use rodio::Source;

use crate::audio::voice::Waveform;

/// Mono band-unlimited oscillator that runs for a fixed number of samples.
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
    phase_step: f32,
    sample_rate: u32,
    remaining: usize,
    duration: Duration,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32, duration: Duration, sample_rate: u32) -> Self {
        Self {
            waveform,
            phase: 0.0,
            phase_step: frequency / sample_rate as f32,
            sample_rate,
            remaining: (duration.as_secs_f64() * sample_rate as f64).round() as usize,
            duration,
        }
    }
}

/// `phase` is in cycles, `[0, 1)`.
pub fn shape(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (phase * TAU).sin(),
        Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Sawtooth => 2.0 * phase - 1.0,
    }
}

impl Iterator for Oscillator {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let sample = shape(self.waveform, self.phase);
        self.phase = (self.phase + self.phase_step).fract();
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl Source for Oscillator {
    fn current_span_len(&self) -> Option<usize> {
        Some(self.remaining)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.duration)
    }
}
