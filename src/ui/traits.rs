use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::{
    nav::{NavigationState, Screen},
    ui::{message::Intent, theme::Palette},
};

pub trait View: Send {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &NavigationState, palette: &Palette);

    fn handle_input(&mut self, key: KeyEvent, state: &NavigationState) -> Option<Intent>;

    fn handle_mouse(&mut self, _mouse: MouseEvent, _state: &NavigationState) -> Option<Intent> {
        None
    }

    /// Called when this view's screen becomes current.
    fn on_enter(&mut self, _from: Screen) {}

    /// Key hints shown in the footer.
    fn hints(&self) -> &'static str {
        ""
    }
}
