use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use crate::{
    audio::{
        config::AudioConfig,
        error::AudioError,
        gesture::Gesture,
        pattern::next_note,
        sfx::{SfxKind, sfx_voices},
        state::EnginePhase,
        timer::{Scheduler, TimerHandle},
        voice::{Voice, VoiceSink},
    },
    nav::{MusicLocation, NavigationState, Theme},
};

struct EngineCore {
    phase: EnginePhase,
    is_playing: bool,
    theme: Theme,
    location: MusicLocation,
    volume: u8,
    /// The one live timer of the ambient loop, if any.
    pending: Option<TimerHandle>,
    /// Bumped on every start; ticks from an older run are ignored.
    generation: u64,
    rng: StdRng,
    config: AudioConfig,
}

fn lock(core: &Mutex<EngineCore>) -> MutexGuard<'_, EngineCore> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

fn gain(volume: u8, ceiling: f32) -> f32 {
    volume.min(100) as f32 / 100.0 * ceiling
}

/// Procedural background music and interface sounds.
///
/// Created cheaply with [`AudioEngine::create`]; nothing is audible until
/// [`AudioEngine::unlock`] has been given a [`Gesture`] and an output. If
/// the output cannot be opened the engine goes quiet and every call turns
/// into a no-op.
///
/// The ambient loop is a chain of one-shot timers: each tick emits a note,
/// then schedules the next tick. Theme, location and volume are read when a
/// tick fires, not when it is scheduled.
pub struct AudioEngine {
    core: Arc<Mutex<EngineCore>>,
    scheduler: Arc<dyn Scheduler>,
}

impl AudioEngine {
    pub fn create(config: AudioConfig, scheduler: Arc<dyn Scheduler>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            core: Arc::new(Mutex::new(EngineCore {
                phase: EnginePhase::Locked,
                is_playing: false,
                theme: Theme::default(),
                location: MusicLocation::default(),
                volume: 80,
                pending: None,
                generation: 0,
                rng,
                config,
            })),
            scheduler,
        }
    }

    /// Acquires the output through `open`. Only the first call does
    /// anything; later calls report whether the engine is usable.
    pub fn unlock<F>(&self, _gesture: &Gesture, open: F) -> bool
    where
        F: FnOnce() -> Result<Arc<dyn VoiceSink>, AudioError>,
    {
        let mut core = lock(&self.core);
        if !matches!(core.phase, EnginePhase::Locked) {
            return core.phase.sink().is_some();
        }

        match open() {
            Ok(sink) => {
                info!("audio_unlocked");
                core.phase = EnginePhase::Ready(sink);
                true
            }
            Err(e) => {
                warn!("Audio unavailable, continuing silently: {}", e);
                core.phase = EnginePhase::Unavailable;
                false
            }
        }
    }

    /// Unlocks, then catches up with `state`: music starts right away when
    /// it is enabled.
    pub fn initialize<F>(&self, gesture: &Gesture, state: &NavigationState, open: F)
    where
        F: FnOnce() -> Result<Arc<dyn VoiceSink>, AudioError>,
    {
        self.sync(state);
        if self.unlock(gesture, open) {
            self.sync(state);
        }
    }

    /// Mirrors the navigation state: volume, theme, location and whether
    /// music should be running at all.
    pub fn sync(&self, state: &NavigationState) {
        self.set_volume(state.prefs.music_volume);
        if self.theme() != state.prefs.theme {
            self.set_theme(state.prefs.theme);
        }
        self.set_location(state.music_location);

        if state.prefs.music_enabled {
            self.play();
        } else {
            self.stop();
        }
    }

    pub fn is_ready(&self) -> bool {
        lock(&self.core).phase.sink().is_some()
    }

    pub fn phase(&self) -> EnginePhase {
        lock(&self.core).phase.clone()
    }

    pub fn is_playing(&self) -> bool {
        lock(&self.core).is_playing
    }

    pub fn theme(&self) -> Theme {
        lock(&self.core).theme
    }

    pub fn location(&self) -> MusicLocation {
        lock(&self.core).location
    }

    pub fn volume(&self) -> u8 {
        lock(&self.core).volume
    }

    /// Applies from the next note on; notes already sounding keep their gain.
    pub fn set_volume(&self, percent: u8) {
        lock(&self.core).volume = percent.min(100);
    }

    pub fn set_theme(&self, theme: Theme) {
        let mut core = lock(&self.core);
        core.theme = theme;
        if core.is_playing {
            debug!(theme = theme.label(), "ambient_restart");
            Self::halt(&mut core);
            self.start(&mut core);
        }
    }

    pub fn set_location(&self, location: MusicLocation) {
        let mut core = lock(&self.core);
        if core.location == location {
            return;
        }
        core.location = location;
        if core.is_playing {
            debug!(location = ?location, "ambient_restart");
            Self::halt(&mut core);
            self.start(&mut core);
        }
    }

    pub fn play(&self) {
        let mut core = lock(&self.core);
        self.start(&mut core);
    }

    /// Cancels the pending tick. Notes already emitted decay on their own.
    pub fn stop(&self) {
        let mut core = lock(&self.core);
        Self::halt(&mut core);
    }

    pub fn play_sfx(&self, kind: SfxKind, volume_percent: u8) {
        let (sink, voices) = {
            let core = lock(&self.core);
            let Some(sink) = core.phase.sink().cloned() else {
                return;
            };
            (sink, sfx_voices(kind, core.theme, volume_percent, &core.config))
        };

        for voice in voices {
            sink.play(voice);
        }
    }

    fn start(&self, core: &mut EngineCore) {
        if core.is_playing || core.phase.sink().is_none() {
            return;
        }
        core.is_playing = true;
        core.generation += 1;
        debug!(
            generation = core.generation,
            theme = core.theme.label(),
            location = ?core.location,
            "ambient_start"
        );

        Self::tick(core, &Arc::downgrade(&self.core), &self.scheduler);
    }

    fn halt(core: &mut EngineCore) {
        if let Some(pending) = core.pending.take() {
            pending.cancel();
        }
        if core.is_playing {
            debug!(generation = core.generation, "ambient_stop");
        }
        core.is_playing = false;
    }

    fn tick(core: &mut EngineCore, this: &Weak<Mutex<EngineCore>>, scheduler: &Arc<dyn Scheduler>) {
        let Some(sink) = core.phase.sink().cloned() else {
            core.is_playing = false;
            return;
        };

        let note = next_note(core.theme, core.location, &core.config, &mut core.rng);
        let lead = Voice {
            frequency: note.frequency,
            waveform: note.waveform,
            gain: gain(core.volume, core.config.lead_gain_ceiling),
            duration: note.duration,
            delay: Default::default(),
        };
        sink.play(lead);
        if let Some(frequency) = note.bass {
            sink.play(Voice {
                frequency,
                gain: gain(core.volume, core.config.bass_gain_ceiling),
                ..lead
            });
        }

        let generation = core.generation;
        let weak = this.clone();
        let next_scheduler = scheduler.clone();
        core.pending = Some(scheduler.schedule(
            note.next_delay,
            Box::new(move || {
                let Some(core) = weak.upgrade() else {
                    return;
                };
                let mut core = lock(&core);
                if !core.is_playing || core.generation != generation {
                    return;
                }
                // This timer has fired; its handle is spent.
                core.pending = None;
                Self::tick(&mut core, &weak, &next_scheduler);
            }),
        ));
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        Self::halt(&mut lock(&self.core));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::{pattern::pattern, timer::ManualScheduler, voice::Waveform},
        nav::Preferences,
    };
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct RecordingSink {
        voices: Arc<Mutex<Vec<Voice>>>,
    }

    impl RecordingSink {
        fn take(&self) -> Vec<Voice> {
            std::mem::take(&mut *self.voices.lock().unwrap())
        }
    }

    impl VoiceSink for RecordingSink {
        fn play(&self, voice: Voice) {
            self.voices.lock().unwrap().push(voice);
        }
    }

    fn gesture() -> Gesture {
        Gesture::from_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)).unwrap()
    }

    fn seeded(seed: u64) -> AudioConfig {
        AudioConfig {
            seed: Some(seed),
            ..AudioConfig::default()
        }
    }

    fn ready_engine() -> (AudioEngine, ManualScheduler, RecordingSink) {
        let scheduler = ManualScheduler::new();
        let engine = AudioEngine::create(seeded(11), Arc::new(scheduler.clone()));
        let sink = RecordingSink::default();
        let handed = sink.clone();
        assert!(engine.unlock(&gesture(), move || Ok(Arc::new(handed))));
        (engine, scheduler, sink)
    }

    #[test]
    fn stop_when_idle_is_harmless() {
        let (engine, scheduler, _) = ready_engine();
        engine.stop();
        engine.stop();
        assert!(!engine.is_playing());
        assert_eq!(scheduler.live(), 0);
    }

    #[test]
    fn double_play_keeps_a_single_chain() {
        let (engine, scheduler, sink) = ready_engine();
        engine.play();
        let first = sink.take();
        engine.play();

        assert!(engine.is_playing());
        assert_eq!(scheduler.live(), 1);
        assert!(!first.is_empty());
        assert!(sink.take().is_empty());

        for _ in 0..10 {
            assert!(scheduler.fire_next());
            assert_eq!(scheduler.live(), 1);
        }
    }

    #[test]
    fn nothing_plays_before_unlock() {
        let scheduler = ManualScheduler::new();
        let engine = AudioEngine::create(seeded(1), Arc::new(scheduler.clone()));
        engine.play();
        engine.play_sfx(SfxKind::Select, 100);
        assert!(!engine.is_playing());
        assert!(!engine.is_ready());
        assert_eq!(scheduler.live(), 0);
    }

    #[test]
    fn failed_unlock_silences_everything() {
        let scheduler = ManualScheduler::new();
        let engine = AudioEngine::create(seeded(1), Arc::new(scheduler.clone()));
        let unlocked = engine.unlock(&gesture(), || Err(AudioError::NoOutputDevice));
        assert!(!unlocked);
        assert!(matches!(engine.phase(), EnginePhase::Unavailable));

        let retried = engine.unlock(&gesture(), || panic!("output is only opened once"));
        assert!(!retried);

        engine.play();
        engine.set_theme(Theme::Blaze);
        engine.play_sfx(SfxKind::Hover, 100);
        assert!(!engine.is_playing());
        assert_eq!(scheduler.live(), 0);
    }

    #[test]
    fn unlock_is_idempotent() {
        let (engine, _, _) = ready_engine();
        assert!(engine.unlock(&gesture(), || panic!("output is only opened once")));
    }

    #[test]
    fn stop_cancels_the_pending_tick_only() {
        let (engine, scheduler, sink) = ready_engine();
        engine.play();
        scheduler.advance(Duration::from_secs(5));
        assert!(!sink.take().is_empty());

        engine.stop();
        assert_eq!(scheduler.live(), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(10)), 0);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn ticks_follow_the_pattern_tempo() {
        let (engine, scheduler, sink) = ready_engine();
        engine.set_theme(Theme::Blaze);
        engine.play();

        let p = pattern(Theme::Blaze, MusicLocation::Menu);
        let config = AudioConfig::default();
        for _ in 0..50 {
            let delay = scheduler.next_due().unwrap();
            assert!(delay >= p.base_tempo && delay < p.base_tempo + config.tempo_jitter);
            scheduler.fire_next();
        }

        let voices = sink.take();
        let lead_gain = gain(80, config.lead_gain_ceiling);
        let leads: Vec<_> = voices.iter().filter(|v| v.gain == lead_gain).collect();
        assert_eq!(leads.len(), 51);
        assert!(leads.iter().all(|v| p.frequencies.contains(&v.frequency)));
        assert!(voices.iter().all(|v| v.waveform == Waveform::Square));
        assert!(voices.iter().all(|v| v.duration == config.note_duration));
    }

    #[test]
    fn theme_change_restarts_immediately() {
        let (engine, scheduler, sink) = ready_engine();
        engine.set_theme(Theme::Zen);
        engine.play();
        sink.take();

        engine.set_theme(Theme::Blaze);
        assert!(engine.is_playing());
        assert_eq!(scheduler.live(), 1);
        let voices = sink.take();
        assert!(!voices.is_empty());
        assert!(voices.iter().all(|v| v.waveform == Waveform::Square));
    }

    #[test]
    fn location_restart_only_on_change() {
        let (engine, scheduler, sink) = ready_engine();
        engine.play();
        sink.take();

        engine.set_location(MusicLocation::Menu);
        assert!(sink.take().is_empty());

        engine.set_location(MusicLocation::Portfolio);
        assert_eq!(scheduler.live(), 1);
        let p = pattern(Theme::Neon, MusicLocation::Portfolio);
        let voices = sink.take();
        assert!(p.frequencies.contains(&voices[0].frequency));
    }

    #[test]
    fn volume_is_read_when_the_tick_fires() {
        let (engine, scheduler, sink) = ready_engine();
        engine.set_volume(100);
        engine.play();
        assert_eq!(sink.take()[0].gain, 0.10);

        engine.set_volume(50);
        scheduler.fire_next();
        let voices = sink.take();
        assert!((voices[0].gain - 0.05).abs() < 1e-6);
        if let Some(bass) = voices.get(1) {
            assert!((bass.gain - 0.025).abs() < 1e-6);
            assert_eq!(bass.frequency * 2.0, voices[0].frequency);
        }

        engine.set_volume(250);
        assert_eq!(engine.volume(), 100);
    }

    #[test]
    fn initialize_follows_music_toggle() {
        let mut state = NavigationState::with_preferences(Preferences {
            theme: Theme::Zen,
            music_volume: 30,
            ..Preferences::default()
        });

        let scheduler = ManualScheduler::new();
        let engine = AudioEngine::create(seeded(2), Arc::new(scheduler.clone()));
        let sink = RecordingSink::default();
        let handed = sink.clone();
        engine.initialize(&gesture(), &state, move || Ok(Arc::new(handed)));
        assert!(engine.is_playing());
        assert_eq!(engine.theme(), Theme::Zen);
        assert_eq!(engine.volume(), 30);

        state.prefs.music_enabled = false;
        engine.sync(&state);
        assert!(!engine.is_playing());
        assert_eq!(scheduler.live(), 0);

        let quiet = AudioEngine::create(seeded(2), Arc::new(ManualScheduler::new()));
        quiet.initialize(&gesture(), &state, || Ok(Arc::new(RecordingSink::default())));
        assert!(quiet.is_ready());
        assert!(!quiet.is_playing());
    }

    #[test]
    fn same_seed_same_music() {
        let run = || {
            let (engine, scheduler, sink) = ready_engine();
            engine.play();
            for _ in 0..20 {
                scheduler.fire_next();
            }
            sink.take()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn select_sfx_plays_an_arpeggio_in_theme_colour() {
        let (engine, scheduler, sink) = ready_engine();
        engine.set_theme(Theme::Zen);
        engine.play_sfx(SfxKind::Select, 100);

        let voices = sink.take();
        assert_eq!(voices.len(), 3);
        assert!(voices.iter().all(|v| v.waveform == Waveform::Sine));
        assert_eq!(scheduler.live(), 0);
    }
}
