use std::sync::Arc;

use tracing::debug;

use crate::{
    audio::{AudioDevice, AudioEngine, Gesture, SfxKind, voice::VoiceSink},
    nav::NavigationStore,
};

/// Everything the views act on.
pub struct AppContext {
    pub store: NavigationStore,
    pub audio: AudioEngine,
    /// Kept open for as long as the app runs once audio is unlocked.
    device: Option<AudioDevice>,
    synth_rate: u32,
}

impl AppContext {
    pub fn new(store: NavigationStore, audio: AudioEngine, synth_rate: u32) -> Self {
        Self {
            store,
            audio,
            device: None,
            synth_rate,
        }
    }

    /// Opens the output on the first gesture and brings the music in line
    /// with the current state. Later gestures do nothing.
    pub fn unlock_audio(&mut self, gesture: &Gesture) {
        if self.device.is_some() {
            return;
        }
        let synth_rate = self.synth_rate;
        let device = &mut self.device;
        let state = self.store.snapshot();
        self.audio.initialize(gesture, &state, || {
            let opened = AudioDevice::open(synth_rate)?;
            let sink: Arc<dyn VoiceSink> = Arc::new(opened.voice_sink());
            *device = Some(opened);
            Ok(sink)
        });
    }

    pub fn play_sfx(&self, kind: SfxKind) {
        let prefs = &self.store.state().prefs;
        if !prefs.sfx_enabled {
            debug!(?kind, "sfx_muted");
            return;
        }
        self.audio.play_sfx(kind, prefs.sfx_volume);
    }
}
