use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders},
};

use crate::{
    nav::{NavigationState, Screen},
    ui::{
        components::menu::{Menu, MenuState},
        input::{is_confirm, vertical},
        message::Intent,
        theme::Palette,
        traits::View,
        views::centered,
    },
};

const ITEMS: [(&str, Intent); 3] = [
    ("Start", Intent::StartGame),
    ("Settings", Intent::OpenSettings),
    ("Quit", Intent::Quit),
];

#[derive(Default)]
pub struct MainMenu {
    menu: MenuState,
}

impl View for MainMenu {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &NavigationState, palette: &Palette) {
        let panel = centered(area, 30, ITEMS.len() as u16 + 4);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(palette.secondary))
            .title(" MAIN MENU ")
            .title_alignment(Alignment::Center)
            .title_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(panel);
        f.render_widget(block, panel);

        let list_area = centered(inner, inner.width, ITEMS.len() as u16);
        f.render_widget(
            Menu::new(ITEMS.iter().map(|(label, _)| *label), self.menu.selected(), palette)
                .cursor(state.prefs.cursor_enabled),
            list_area,
        );
    }

    fn handle_input(&mut self, key: KeyEvent, _state: &NavigationState) -> Option<Intent> {
        if let Some(step) = vertical(&key) {
            return self.menu.step(step, ITEMS.len()).then_some(Intent::Hover);
        }
        if is_confirm(&key) {
            return Some(ITEMS[self.menu.selected()].1);
        }
        None
    }

    fn on_enter(&mut self, _from: Screen) {
        self.menu.reset();
    }

    fn hints(&self) -> &'static str {
        "↑↓: choose   enter: select   ctrl-c: quit"
    }
}
