use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders, Clear},
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

const ITEMS: [(&str, Intent); 4] = [
    ("Resume", Intent::ClosePauseMenu),
    ("Settings", Intent::OpenSettings),
    ("Main menu", Intent::ReturnToMainMenu),
    ("Quit", Intent::Quit),
];

/// Drawn on top of the portfolio, which stays visible around it.
#[derive(Default)]
pub struct PauseMenu {
    menu: MenuState,
}

impl View for PauseMenu {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &NavigationState, palette: &Palette) {
        let panel = centered(area, 28, ITEMS.len() as u16 + 4);
        f.render_widget(Clear, panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::DOUBLE)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.background))
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .title_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(panel);
        f.render_widget(block, panel);

        f.render_widget(
            Menu::new(ITEMS.iter().map(|(label, _)| *label), self.menu.selected(), palette)
                .cursor(state.prefs.cursor_enabled),
            centered(inner, inner.width, ITEMS.len() as u16),
        );
    }

    fn handle_input(&mut self, key: KeyEvent, _state: &NavigationState) -> Option<Intent> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('p')) {
            return Some(Intent::ClosePauseMenu);
        }
        if let Some(step) = vertical(&key) {
            return self.menu.step(step, ITEMS.len()).then_some(Intent::Hover);
        }
        is_confirm(&key).then(|| ITEMS[self.menu.selected()].1)
    }

    fn on_enter(&mut self, from: Screen) {
        if from != Screen::Settings {
            self.menu.reset();
        }
    }

    fn hints(&self) -> &'static str {
        "↑↓: choose   enter: select   esc/p: resume"
    }
}
