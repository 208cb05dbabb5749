use ratatui::Frame;
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

use crate::{
    nav::{NavigationState, Screen},
    ui::{
        message::Intent,
        theme::Palette,
        traits::View,
        views::{MainMenu, PauseMenu, Portfolio, Settings, StartScreen},
    },
};

/// One view per screen. Views live as long as the app, so each keeps its
/// own selection and scroll state between visits.
#[derive(Default)]
pub struct Router {
    start: StartScreen,
    main_menu: MainMenu,
    settings: Settings,
    portfolio: Portfolio,
    pause: PauseMenu,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_mut(&mut self, screen: Screen) -> &mut dyn View {
        match screen {
            Screen::StartScreen => &mut self.start,
            Screen::MainMenu => &mut self.main_menu,
            Screen::Settings => &mut self.settings,
            Screen::Portfolio => &mut self.portfolio,
            Screen::PauseMenu => &mut self.pause,
        }
    }

    /// Screens drawn on top of another one.
    pub fn underlay(screen: Screen) -> Option<Screen> {
        match screen {
            Screen::PauseMenu => Some(Screen::Portfolio),
            _ => None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &NavigationState, palette: &Palette) {
        let screen = state.current_screen;
        if let Some(base) = Self::underlay(screen) {
            self.view_mut(base).render(f, area, state, palette);
        }
        self.view_mut(screen).render(f, area, state, palette);
    }

    pub fn handle_input(&mut self, key: KeyEvent, state: &NavigationState) -> Option<Intent> {
        self.view_mut(state.current_screen).handle_input(key, state)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, state: &NavigationState) -> Option<Intent> {
        self.view_mut(state.current_screen).handle_mouse(mouse, state)
    }

    pub fn enter(&mut self, screen: Screen, from: Screen) {
        self.view_mut(screen).on_enter(from);
    }

    pub fn hints(&mut self, screen: Screen) -> &'static str {
        self.view_mut(screen).hints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::palette;
    use ratatui::{Terminal, backend::TestBackend};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn rendered(router: &mut Router, state: &NavigationState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let palette = palette(state.prefs.theme);
        terminal
            .draw(|f| router.render(f, f.area(), state, &palette))
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn input_goes_to_the_current_screen() {
        let mut router = Router::new();
        let mut state = NavigationState::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);

        assert_eq!(router.handle_input(esc, &state), Some(Intent::Quit));
        state.current_screen = Screen::Portfolio;
        assert_eq!(router.handle_input(esc, &state), Some(Intent::OpenPauseMenu));
        state.current_screen = Screen::PauseMenu;
        assert_eq!(router.handle_input(esc, &state), Some(Intent::ClosePauseMenu));
    }

    #[test]
    fn pause_menu_is_drawn_over_the_portfolio() {
        let mut router = Router::new();
        let mut state = NavigationState::default();

        state.current_screen = Screen::PauseMenu;
        let screen = rendered(&mut router, &state);
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("ABOUT"));

        state.current_screen = Screen::MainMenu;
        let screen = rendered(&mut router, &state);
        assert!(screen.contains("MAIN MENU"));
        assert!(!screen.contains("PAUSED"));
    }
}
