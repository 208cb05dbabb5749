use flume::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::nav::{
    error::StorageError,
    state::{self, MusicLocation, NavigationState, Screen, Theme},
    storage::{MemoryStorage, PreferenceStorage},
};

/// Owns the navigation state and the user's preferences.
///
/// Every effective action publishes one complete snapshot to all
/// subscribers, in the order the actions were issued. Guarded actions that
/// do not apply leave the state untouched and publish nothing.
pub struct NavigationStore {
    state: NavigationState,
    storage: Box<dyn PreferenceStorage>,
    persistent: bool,
    subscribers: Vec<Sender<NavigationState>>,
}

impl NavigationStore {
    pub fn new(storage: Box<dyn PreferenceStorage>) -> Self {
        let (prefs, persistent) = match storage.load() {
            Ok(Some(prefs)) => {
                info!(theme = prefs.theme.label(), "preferences_restored");
                (prefs, true)
            }
            Ok(None) => (Default::default(), true),
            Err(StorageError::Serde(e)) => {
                warn!("Stored preferences unreadable, starting from defaults: {}", e);
                (Default::default(), true)
            }
            Err(e) => {
                warn!("Preferences unavailable, running in memory: {}", e);
                (Default::default(), false)
            }
        };

        Self {
            state: NavigationState::with_preferences(prefs),
            storage,
            persistent,
            subscribers: Vec::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn snapshot(&self) -> NavigationState {
        self.state.clone()
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn subscribe(&mut self) -> Receiver<NavigationState> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_screen(&mut self, target: Screen) {
        self.update(|s| {
            s.previous_screen = Some(s.current_screen);
            s.current_screen = target;
        });
    }

    pub fn go_back(&mut self) {
        self.update(|s| {
            s.current_screen = s.previous_screen.take().unwrap_or(Screen::MainMenu);
        });
    }

    /// Deliberately unguarded: any screen may start the game.
    pub fn start_game(&mut self) {
        self.update(|s| {
            s.current_screen = Screen::Portfolio;
            s.previous_screen = Some(Screen::MainMenu);
            s.music_location = MusicLocation::Portfolio;
        });
    }

    pub fn open_pause_menu(&mut self) {
        if self.state.current_screen != Screen::Portfolio {
            debug!(screen = ?self.state.current_screen, "pause_ignored");
            return;
        }
        self.update(|s| {
            s.current_screen = Screen::PauseMenu;
            s.previous_screen = Some(Screen::Portfolio);
        });
    }

    pub fn close_pause_menu(&mut self) {
        if self.state.current_screen != Screen::PauseMenu {
            debug!(screen = ?self.state.current_screen, "resume_ignored");
            return;
        }
        self.update(|s| {
            s.current_screen = Screen::Portfolio;
            s.previous_screen = None;
        });
    }

    pub fn return_to_main_menu(&mut self) {
        self.update(|s| {
            s.current_screen = Screen::MainMenu;
            s.previous_screen = None;
            s.music_location = MusicLocation::Menu;
        });
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.update(|s| s.prefs.theme = theme);
    }

    /// Callers clamp; the store assigns.
    pub fn set_music_volume(&mut self, volume: u8) {
        self.update(|s| s.prefs.music_volume = volume);
    }

    pub fn set_sfx_volume(&mut self, volume: u8) {
        self.update(|s| s.prefs.sfx_volume = volume);
    }

    pub fn music_volume_up(&mut self) {
        self.set_music_volume(state::step_up(self.state.prefs.music_volume));
    }

    pub fn music_volume_down(&mut self) {
        self.set_music_volume(state::step_down(self.state.prefs.music_volume));
    }

    pub fn sfx_volume_up(&mut self) {
        self.set_sfx_volume(state::step_up(self.state.prefs.sfx_volume));
    }

    pub fn sfx_volume_down(&mut self) {
        self.set_sfx_volume(state::step_down(self.state.prefs.sfx_volume));
    }

    pub fn toggle_music(&mut self) {
        self.update(|s| s.prefs.music_enabled = !s.prefs.music_enabled);
    }

    pub fn toggle_sfx(&mut self) {
        self.update(|s| s.prefs.sfx_enabled = !s.prefs.sfx_enabled);
    }

    pub fn toggle_cursor(&mut self) {
        self.update(|s| s.prefs.cursor_enabled = !s.prefs.cursor_enabled);
    }

    pub fn set_parallax_intensity(&mut self, intensity: f32) {
        self.update(|s| s.prefs.parallax_intensity = intensity);
    }

    pub fn set_music_location(&mut self, location: MusicLocation) {
        self.update(|s| s.music_location = location);
    }

    fn update<F: FnOnce(&mut NavigationState)>(&mut self, apply: F) {
        let before = self.state.prefs.clone();
        apply(&mut self.state);

        if self.state.prefs != before {
            self.persist();
        }
        self.publish();
    }

    fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        if let Err(e) = self.storage.save(&self.state.prefs) {
            warn!("Failed to persist preferences, continuing in memory: {}", e);
            self.persistent = false;
        }
    }

    fn publish(&mut self) {
        let snapshot = &self.state;
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{JsonFileStorage, state::Preferences};

    struct BrokenStorage;

    impl PreferenceStorage for BrokenStorage {
        fn load(&self) -> Result<Option<Preferences>, StorageError> {
            Err(StorageError::Unavailable("denied".to_string()))
        }

        fn save(&mut self, _prefs: &Preferences) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("denied".to_string()))
        }
    }

    struct ReadOnlyStorage(MemoryStorage);

    impl PreferenceStorage for ReadOnlyStorage {
        fn load(&self) -> Result<Option<Preferences>, StorageError> {
            self.0.load()
        }

        fn save(&mut self, _prefs: &Preferences) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn pause_and_resume_from_a_directly_opened_portfolio() {
        let mut store = NavigationStore::in_memory();
        store.set_theme(Theme::Zen);
        store.set_music_volume(50);
        store.set_screen(Screen::Portfolio);

        store.open_pause_menu();
        assert_eq!(store.state().current_screen, Screen::PauseMenu);
        assert_eq!(store.state().previous_screen, Some(Screen::Portfolio));
        assert_eq!(store.state().prefs.theme, Theme::Zen);
        assert_eq!(store.state().prefs.music_volume, 50);

        store.close_pause_menu();
        assert_eq!(store.state().current_screen, Screen::Portfolio);
        assert_eq!(store.state().previous_screen, None);
    }

    #[test]
    fn corrupt_record_is_replaced_on_the_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{ garbage").unwrap();

        let mut store = NavigationStore::new(Box::new(JsonFileStorage::new(&path)));
        assert!(store.is_persistent());
        assert_eq!(store.state().prefs, Preferences::default());
        store.set_theme(Theme::Blaze);
        drop(store);

        let reloaded = NavigationStore::new(Box::new(JsonFileStorage::new(&path)));
        assert!(reloaded.is_persistent());
        assert_eq!(reloaded.state().prefs.theme, Theme::Blaze);
    }

    #[test]
    fn go_back_returns_to_the_opener() {
        let mut store = NavigationStore::in_memory();
        store.set_screen(Screen::MainMenu);
        store.set_screen(Screen::Settings);
        store.go_back();
        assert_eq!(store.state().current_screen, Screen::MainMenu);
        assert_eq!(store.state().previous_screen, None);

        store.start_game();
        store.open_pause_menu();
        store.set_screen(Screen::Settings);
        store.go_back();
        assert_eq!(store.state().current_screen, Screen::PauseMenu);
        assert_eq!(store.state().previous_screen, None);
    }

    #[test]
    fn go_back_without_history_lands_on_main_menu() {
        let mut store = NavigationStore::in_memory();
        store.go_back();
        assert_eq!(store.state().current_screen, Screen::MainMenu);
        assert_eq!(store.state().previous_screen, None);
    }

    #[test]
    fn pause_guards_are_no_ops_elsewhere() {
        let mut store = NavigationStore::in_memory();
        let rx = store.subscribe();

        for screen in [Screen::StartScreen, Screen::MainMenu, Screen::Settings] {
            store.set_screen(screen);
            let before = store.snapshot();
            store.open_pause_menu();
            store.close_pause_menu();
            assert_eq!(store.snapshot(), before);
        }
        assert_eq!(rx.drain().count(), 3);

        store.start_game();
        let before = store.snapshot();
        store.close_pause_menu();
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn start_game_is_unguarded() {
        for screen in [
            Screen::StartScreen,
            Screen::MainMenu,
            Screen::Settings,
            Screen::Portfolio,
        ] {
            let mut store = NavigationStore::in_memory();
            store.set_screen(screen);
            store.start_game();
            assert_eq!(store.state().current_screen, Screen::Portfolio);
            assert_eq!(store.state().previous_screen, Some(Screen::MainMenu));
            assert_eq!(store.state().music_location, MusicLocation::Portfolio);
        }
    }

    #[test]
    fn return_to_main_menu_resets_history_and_music() {
        let mut store = NavigationStore::in_memory();
        store.start_game();
        store.open_pause_menu();
        store.return_to_main_menu();
        assert_eq!(store.state().current_screen, Screen::MainMenu);
        assert_eq!(store.state().previous_screen, None);
        assert_eq!(store.state().music_location, MusicLocation::Menu);
    }

    #[test]
    fn subscribers_see_whole_actions_in_order() {
        let mut store = NavigationStore::in_memory();
        let rx = store.subscribe();

        store.set_screen(Screen::MainMenu);
        store.start_game();
        store.toggle_music();

        let seen: Vec<_> = rx.drain().collect();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].current_screen, Screen::MainMenu);
        assert_eq!(seen[1].current_screen, Screen::Portfolio);
        assert_eq!(seen[1].previous_screen, Some(Screen::MainMenu));
        assert_eq!(seen[1].music_location, MusicLocation::Portfolio);
        assert!(!seen[2].prefs.music_enabled);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = NavigationStore::in_memory();
        let kept = store.subscribe();
        drop(store.subscribe());

        store.toggle_cursor();
        assert_eq!(store.subscribers.len(), 1);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn volume_steps_clamp_at_bounds() {
        let mut store = NavigationStore::in_memory();
        for _ in 0..5 {
            store.music_volume_up();
        }
        assert_eq!(store.state().prefs.music_volume, 100);

        store.set_sfx_volume(35);
        for _ in 0..5 {
            store.sfx_volume_down();
        }
        assert_eq!(store.state().prefs.sfx_volume, 0);
        store.sfx_volume_up();
        assert_eq!(store.state().prefs.sfx_volume, 10);
    }

    #[test]
    fn preferences_survive_a_reload_but_screens_do_not() {
        let storage = MemoryStorage::new();
        let mut store = NavigationStore::new(Box::new(storage.clone()));
        store.set_theme(Theme::Blaze);
        store.set_music_volume(30);
        store.toggle_cursor();
        store.start_game();
        store.open_pause_menu();

        let reloaded = NavigationStore::new(Box::new(storage));
        assert_eq!(reloaded.state().prefs.theme, Theme::Blaze);
        assert_eq!(reloaded.state().prefs.music_volume, 30);
        assert!(!reloaded.state().prefs.cursor_enabled);
        assert_eq!(reloaded.state().current_screen, Screen::StartScreen);
        assert_eq!(reloaded.state().previous_screen, None);
        assert_eq!(reloaded.state().music_location, MusicLocation::Menu);
    }

    #[test]
    fn screen_changes_do_not_touch_storage() {
        let storage = MemoryStorage::new();
        let mut store = NavigationStore::new(Box::new(storage.clone()));
        store.set_screen(Screen::MainMenu);
        store.start_game();
        assert!(storage.raw().is_none());
    }

    #[test]
    fn unavailable_storage_degrades_to_memory() {
        let mut store = NavigationStore::new(Box::new(BrokenStorage));
        assert!(!store.is_persistent());
        assert_eq!(store.state().prefs, Preferences::default());

        store.set_theme(Theme::Zen);
        assert_eq!(store.state().prefs.theme, Theme::Zen);
    }

    #[test]
    fn failed_save_switches_to_memory_only() {
        let mut store = NavigationStore::new(Box::new(ReadOnlyStorage(MemoryStorage::new())));
        assert!(store.is_persistent());

        store.set_music_volume(40);
        assert!(!store.is_persistent());
        assert_eq!(store.state().prefs.music_volume, 40);
    }
}
