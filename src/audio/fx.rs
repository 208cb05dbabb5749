pub mod envelope;

use std::time::Duration;

use rodio::Source;

/// One step of per-sample processing on a voice.
pub trait Stage: Send + 'static {
    fn apply(&mut self, sample: f32) -> f32;
}

/// Fixed amplitude scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gain(pub f32);

impl Stage for Gain {
    fn apply(&mut self, sample: f32) -> f32 {
        sample * self.0
    }
}

/// A mono source run through its stages in the order they were added.
pub struct Shaped<S> {
    inner: S,
    stages: Vec<Box<dyn Stage>>,
}

impl<S> Shaped<S>
where
    S: Source<Item = f32> + Send + 'static,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            stages: Vec::new(),
        }
    }

    pub fn then<T: Stage>(mut self, stage: T) -> Self {
        self.stages.push(Box::new(stage));
        self
    }
}

impl<S> Iterator for Shaped<S>
where
    S: Source<Item = f32> + Send + 'static,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let raw = self.inner.next()?;
        Some(
            self.stages
                .iter_mut()
                .fold(raw, |sample, stage| stage.apply(sample)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S> Source for Shaped<S>
where
    S: Source<Item = f32> + Send + 'static,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{synth::Oscillator, voice::Waveform};

    struct Offset(f32);

    impl Stage for Offset {
        fn apply(&mut self, sample: f32) -> f32 {
            sample + self.0
        }
    }

    #[test]
    fn stages_run_in_order() {
        let duration = Duration::from_millis(10);
        let scaled_then_offset: Vec<f32> =
            Shaped::new(Oscillator::new(Waveform::Square, 100.0, duration, 1_000))
                .then(Gain(0.5))
                .then(Offset(1.0))
                .collect();
        let offset_then_scaled: Vec<f32> =
            Shaped::new(Oscillator::new(Waveform::Square, 100.0, duration, 1_000))
                .then(Offset(1.0))
                .then(Gain(0.5))
                .collect();

        assert_eq!(scaled_then_offset.len(), 10);
        assert_eq!(scaled_then_offset[0], 1.5);
        assert_eq!(offset_then_scaled[0], 1.0);
    }
}
