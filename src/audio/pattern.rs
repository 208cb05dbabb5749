use std::time::Duration;

use rand::Rng;

use crate::{
    audio::{config::AudioConfig, voice::Waveform},
    nav::{MusicLocation, Theme},
};

/// Musical material for one (theme, location) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    pub frequencies: [f32; 4],
    pub waveform: Waveform,
    pub base_tempo: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextNote {
    pub frequency: f32,
    pub waveform: Waveform,
    pub duration: Duration,
    /// Octave-down companion, present on some ticks only.
    pub bass: Option<f32>,
    pub next_delay: Duration,
}

pub fn pattern(theme: Theme, location: MusicLocation) -> Pattern {
    use MusicLocation::*;
    use Theme::*;

    match (theme, location) {
        (Zen, Menu) => Pattern {
            frequencies: [261.63, 329.63, 392.00, 523.25],
            waveform: Waveform::Sine,
            base_tempo: Duration::from_millis(1400),
        },
        (Zen, Portfolio) => Pattern {
            frequencies: [293.66, 349.23, 440.00, 587.33],
            waveform: Waveform::Triangle,
            base_tempo: Duration::from_millis(1200),
        },
        (Blaze, Menu) => Pattern {
            frequencies: [220.00, 261.63, 329.63, 440.00],
            waveform: Waveform::Square,
            base_tempo: Duration::from_millis(600),
        },
        (Blaze, Portfolio) => Pattern {
            frequencies: [196.00, 233.08, 293.66, 392.00],
            waveform: Waveform::Sawtooth,
            base_tempo: Duration::from_millis(500),
        },
        (Neon, Menu) => Pattern {
            frequencies: [329.63, 392.00, 493.88, 659.25],
            waveform: Waveform::Triangle,
            base_tempo: Duration::from_millis(900),
        },
        (Neon, Portfolio) => Pattern {
            frequencies: [246.94, 311.13, 369.99, 493.88],
            waveform: Waveform::Square,
            base_tempo: Duration::from_millis(800),
        },
    }
}

/// Picks the next ambient note. Pure apart from `rng`: a seeded generator
/// yields the same sequence every time.
pub fn next_note<R: Rng + ?Sized>(
    theme: Theme,
    location: MusicLocation,
    config: &AudioConfig,
    rng: &mut R,
) -> NextNote {
    let pattern = pattern(theme, location);

    let frequency = pattern.frequencies[rng.random_range(0..pattern.frequencies.len())];
    let bass = rng
        .random_bool(config.bass_probability)
        .then_some(frequency / 2.0);

    let jitter_ms = config.tempo_jitter.as_millis() as u64;
    let jitter = if jitter_ms == 0 {
        Duration::ZERO
    } else {
        Duration::from_millis(rng.random_range(0..jitter_ms))
    };

    NextNote {
        frequency,
        waveform: pattern.waveform,
        duration: config.note_duration,
        bass,
        next_delay: pattern.base_tempo + jitter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const LOCATIONS: [MusicLocation; 2] = [MusicLocation::Menu, MusicLocation::Portfolio];

    #[test]
    fn every_pair_has_its_own_material() {
        let mut seen = Vec::new();
        for theme in Theme::ALL {
            for location in LOCATIONS {
                let p = pattern(theme, location);
                assert!(!seen.contains(&p.frequencies), "{theme:?}/{location:?}");
                seen.push(p.frequencies);
            }
        }
    }

    #[test]
    fn calm_theme_is_slower_than_aggressive_theme() {
        for location in LOCATIONS {
            let zen = pattern(Theme::Zen, location);
            let blaze = pattern(Theme::Blaze, location);
            assert!(zen.base_tempo > blaze.base_tempo);
        }
        assert_eq!(pattern(Theme::Zen, MusicLocation::Menu).waveform, Waveform::Sine);
    }

    #[test]
    fn notes_stay_inside_the_pattern() {
        let config = AudioConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for theme in Theme::ALL {
            for location in LOCATIONS {
                let p = pattern(theme, location);
                for _ in 0..200 {
                    let note = next_note(theme, location, &config, &mut rng);
                    assert!(p.frequencies.contains(&note.frequency));
                    assert_eq!(note.waveform, p.waveform);
                    assert_eq!(note.duration, config.note_duration);
                    assert!(note.next_delay >= p.base_tempo);
                    assert!(note.next_delay < p.base_tempo + config.tempo_jitter);
                    if let Some(bass) = note.bass {
                        assert_eq!(bass, note.frequency / 2.0);
                    }
                }
            }
        }
    }

    #[test]
    fn seeded_sequences_repeat() {
        let config = AudioConfig::default();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..32)
                .map(|_| next_note(Theme::Neon, MusicLocation::Menu, &config, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn bass_layer_is_intermittent() {
        let config = AudioConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let with_bass = (0..2000)
            .filter(|_| {
                next_note(Theme::Blaze, MusicLocation::Portfolio, &config, &mut rng)
                    .bass
                    .is_some()
            })
            .count();
        assert!((600..1000).contains(&with_bass), "{with_bass}");
    }

    #[test]
    fn zero_jitter_is_metronomic() {
        let config = AudioConfig {
            tempo_jitter: Duration::ZERO,
            ..AudioConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let note = next_note(Theme::Zen, MusicLocation::Menu, &config, &mut rng);
        assert_eq!(note.next_delay, Duration::from_millis(1400));
    }
}
