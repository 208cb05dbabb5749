use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    nav::{NavigationState, Screen},
    ui::{
        components::{menu::MenuState, slider::slider},
        input::{horizontal, is_confirm, vertical},
        message::{Intent, Step},
        theme::Palette,
        traits::View,
        views::centered,
    },
};

/// Upper end of the parallax slider.
pub const MAX_PARALLAX: f32 = 2.0;
pub const PARALLAX_STEP: f32 = 0.25;

const LABEL_WIDTH: usize = 14;
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Theme,
    MusicVolume,
    SfxVolume,
    Music,
    Sfx,
    Parallax,
    Cursor,
    Back,
}

const ROWS: [Row; 8] = [
    Row::Theme,
    Row::MusicVolume,
    Row::SfxVolume,
    Row::Music,
    Row::Sfx,
    Row::Parallax,
    Row::Cursor,
    Row::Back,
];

impl Row {
    fn label(self) -> &'static str {
        match self {
            Row::Theme => "Theme",
            Row::MusicVolume => "Music volume",
            Row::SfxVolume => "SFX volume",
            Row::Music => "Music",
            Row::Sfx => "Sound effects",
            Row::Parallax => "Parallax",
            Row::Cursor => "Cursor",
            Row::Back => "Back",
        }
    }

    /// Left/right on this row.
    fn adjust(self, step: Step, state: &NavigationState) -> Option<Intent> {
        match self {
            Row::Theme => Some(Intent::SetTheme(match step {
                Step::Up => state.prefs.theme.next(),
                Step::Down => state.prefs.theme.previous(),
            })),
            Row::MusicVolume => Some(Intent::MusicVolume(step)),
            Row::SfxVolume => Some(Intent::SfxVolume(step)),
            Row::Parallax => Some(Intent::Parallax(step)),
            Row::Music | Row::Sfx | Row::Cursor => self.activate(state),
            Row::Back => None,
        }
    }

    /// Enter on this row.
    fn activate(self, state: &NavigationState) -> Option<Intent> {
        match self {
            Row::Theme => Some(Intent::SetTheme(state.prefs.theme.next())),
            Row::Music => Some(Intent::ToggleMusic),
            Row::Sfx => Some(Intent::ToggleSfx),
            Row::Cursor => Some(Intent::ToggleCursor),
            Row::Back => Some(Intent::GoBack),
            Row::MusicVolume | Row::SfxVolume | Row::Parallax => None,
        }
    }

    fn value<'a>(self, state: &NavigationState, palette: &Palette) -> Vec<Span<'a>> {
        let on_off = |on: bool| Span::raw(if on { "ON" } else { "OFF" });
        let prefs = &state.prefs;
        match self {
            Row::Theme => vec![Span::raw(format!("◀ {} ▶", prefs.theme.label()))],
            Row::MusicVolume => volume(prefs.music_volume, palette),
            Row::SfxVolume => volume(prefs.sfx_volume, palette),
            Row::Music => vec![on_off(prefs.music_enabled)],
            Row::Sfx => vec![on_off(prefs.sfx_enabled)],
            Row::Parallax => {
                let mut spans = slider(
                    (prefs.parallax_intensity / MAX_PARALLAX) as f64,
                    BAR_WIDTH,
                    palette,
                )
                .spans;
                spans.push(Span::raw(format!(" {:.2}x", prefs.parallax_intensity)));
                spans
            }
            Row::Cursor => vec![on_off(prefs.cursor_enabled)],
            Row::Back => Vec::new(),
        }
    }
}

fn volume<'a>(value: u8, palette: &Palette) -> Vec<Span<'a>> {
    let mut spans = slider(value as f64 / 100.0, BAR_WIDTH, palette).spans;
    spans.push(Span::raw(format!(" {value:>3}%")));
    spans
}

#[derive(Default)]
pub struct Settings {
    menu: MenuState,
}

impl Settings {
    fn row(&self) -> Row {
        ROWS[self.menu.selected()]
    }
}

impl View for Settings {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &NavigationState, palette: &Palette) {
        let panel = centered(area, 56, ROWS.len() as u16 + 4);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(palette.secondary))
            .title(" SETTINGS ")
            .title_alignment(Alignment::Center)
            .title_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(panel);
        f.render_widget(block, panel);

        let cursor = if state.prefs.cursor_enabled { "▶ " } else { "  " };
        let lines: Vec<Line> = ROWS
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let selected = i == self.menu.selected();
                let label_style = if selected {
                    Style::default()
                        .fg(palette.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.neutral)
                };
                let marker = if selected { cursor } else { "  " };

                let mut spans = vec![Span::styled(
                    format!("{marker}{:<LABEL_WIDTH$}", row.label()),
                    label_style,
                )];
                spans.extend(row.value(state, palette));
                Line::from(spans)
            })
            .collect();

        f.render_widget(
            Paragraph::new(lines),
            centered(inner, inner.width.saturating_sub(2), ROWS.len() as u16),
        );
    }

    fn handle_input(&mut self, key: KeyEvent, state: &NavigationState) -> Option<Intent> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
            return Some(Intent::GoBack);
        }
        if let Some(step) = vertical(&key) {
            return self.menu.step(step, ROWS.len()).then_some(Intent::Hover);
        }
        if let Some(step) = horizontal(&key) {
            return self.row().adjust(step, state);
        }
        if is_confirm(&key) {
            return self.row().activate(state);
        }
        None
    }

    fn on_enter(&mut self, _from: Screen) {
        self.menu.reset();
    }

    fn hints(&self) -> &'static str {
        "↑↓: choose   ←→: adjust   enter: toggle   esc: back"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Theme;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn rows_map_keys_to_preferences() {
        let state = NavigationState::default();
        let mut view = Settings::default();

        assert_eq!(
            view.handle_input(key(KeyCode::Right), &state),
            Some(Intent::SetTheme(Theme::Zen))
        );
        assert_eq!(
            view.handle_input(key(KeyCode::Left), &state),
            Some(Intent::SetTheme(Theme::Blaze))
        );

        view.handle_input(key(KeyCode::Down), &state);
        assert_eq!(
            view.handle_input(key(KeyCode::Left), &state),
            Some(Intent::MusicVolume(Step::Down))
        );
        assert_eq!(view.handle_input(key(KeyCode::Enter), &state), None);

        view.handle_input(key(KeyCode::Down), &state);
        view.handle_input(key(KeyCode::Down), &state);
        assert_eq!(
            view.handle_input(key(KeyCode::Enter), &state),
            Some(Intent::ToggleMusic)
        );
    }

    #[test]
    fn escape_and_back_row_go_back() {
        let state = NavigationState::default();
        let mut view = Settings::default();
        assert_eq!(view.handle_input(key(KeyCode::Esc), &state), Some(Intent::GoBack));

        assert_eq!(view.handle_input(key(KeyCode::Up), &state), Some(Intent::Hover));
        assert_eq!(view.handle_input(key(KeyCode::Enter), &state), Some(Intent::GoBack));
        assert_eq!(view.handle_input(key(KeyCode::Right), &state), None);
    }
}
