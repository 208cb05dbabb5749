use std::time::Duration;

use crate::{
    audio::{
        config::AudioConfig,
        voice::{Voice, Waveform},
    },
    nav::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfxKind {
    Hover,
    Select,
}

const HOVER_DURATION: Duration = Duration::from_millis(80);
const SELECT_DURATION: Duration = Duration::from_millis(150);

/// Root, major third, fifth.
const ARPEGGIO: [f32; 3] = [1.0, 1.25, 1.5];

fn theme_colour(theme: Theme) -> (f32, Waveform) {
    match theme {
        Theme::Zen => (880.0, Waveform::Sine),
        Theme::Blaze => (440.0, Waveform::Square),
        Theme::Neon => (660.0, Waveform::Triangle),
    }
}

pub fn sfx_gain(volume_percent: u8, config: &AudioConfig) -> f32 {
    volume_percent.min(100) as f32 / 100.0 * config.sfx_gain_ceiling
}

/// A single short tone for hover, a rising three-note arpeggio for select.
pub fn sfx_voices(
    kind: SfxKind,
    theme: Theme,
    volume_percent: u8,
    config: &AudioConfig,
) -> Vec<Voice> {
    let (root, waveform) = theme_colour(theme);
    let gain = sfx_gain(volume_percent, config);

    match kind {
        SfxKind::Hover => vec![Voice {
            frequency: root,
            waveform,
            gain,
            duration: HOVER_DURATION,
            delay: Duration::ZERO,
        }],
        SfxKind::Select => ARPEGGIO
            .iter()
            .enumerate()
            .map(|(i, ratio)| Voice {
                frequency: root * ratio,
                waveform,
                gain,
                duration: SELECT_DURATION,
                delay: config.sfx_note_spacing * i as u32,
            })
            .collect(),
    }
}
