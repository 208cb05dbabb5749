use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use tracing::debug;

use crate::{
    audio::Gesture,
    nav::{NavigationStore, Screen},
    ui::{
        app::App,
        input::InputHandler,
        message::{Intent, Step},
        tui::{TerminalEvent, Tui},
        views::settings::{MAX_PARALLAX, PARALLAX_STEP},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui)? {
                should_render = true;
            }
        }

        // Snapshots arrive in action order; the engine follows each one.
        while let Ok(state) = app.state_rx.try_recv() {
            app.ctx.audio.sync(&state);
            should_render = true;
        }
        app.follow_screen();

        Ok(should_render)
    }

    pub fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Mouse(mouse) => Self::handle_mouse_event(app, mouse),
            TerminalEvent::Tick => return Ok(app.has_focus),
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    fn handle_key_event(app: &mut App, key: KeyEvent) {
        let Some(gesture) = Gesture::from_key(&key) else {
            return;
        };
        app.ctx.unlock_audio(&gesture);

        let intent = InputHandler::handle_key(key)
            .or_else(|| app.router.handle_input(key, app.ctx.store.state()));
        if let Some(intent) = intent {
            Self::dispatch(app, intent);
        }
    }

    fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
        if let Some(gesture) = Gesture::from_mouse(&mouse) {
            app.ctx.unlock_audio(&gesture);
        }
        if let Some(intent) = app.router.handle_mouse(mouse, app.ctx.store.state()) {
            Self::dispatch(app, intent);
        }
    }

    fn dispatch(app: &mut App, intent: Intent) {
        debug!(?intent, "intent");
        if let Some(kind) = intent.feedback() {
            app.ctx.play_sfx(kind);
        }
        if intent == Intent::Quit {
            app.should_quit = true;
            return;
        }
        apply_intent(&mut app.ctx.store, intent);
    }
}

/// Turns an intent into store actions.
pub fn apply_intent(store: &mut NavigationStore, intent: Intent) {
    match intent {
        Intent::Quit | Intent::Hover => {}
        Intent::EnterMainMenu => store.set_screen(Screen::MainMenu),
        Intent::StartGame => store.start_game(),
        Intent::OpenSettings => store.set_screen(Screen::Settings),
        Intent::GoBack => store.go_back(),
        Intent::OpenPauseMenu => store.open_pause_menu(),
        Intent::ClosePauseMenu => store.close_pause_menu(),
        Intent::ReturnToMainMenu => store.return_to_main_menu(),
        Intent::SetTheme(theme) => store.set_theme(theme),
        Intent::MusicVolume(Step::Up) => store.music_volume_up(),
        Intent::MusicVolume(Step::Down) => store.music_volume_down(),
        Intent::SfxVolume(Step::Up) => store.sfx_volume_up(),
        Intent::SfxVolume(Step::Down) => store.sfx_volume_down(),
        Intent::Parallax(step) => {
            let current = store.state().prefs.parallax_intensity;
            let next = match step {
                Step::Up => current + PARALLAX_STEP,
                Step::Down => current - PARALLAX_STEP,
            };
            store.set_parallax_intensity(next.clamp(0.0, MAX_PARALLAX));
        }
        Intent::ToggleMusic => store.toggle_music(),
        Intent::ToggleSfx => store.toggle_sfx(),
        Intent::ToggleCursor => store.toggle_cursor(),
    }
}
