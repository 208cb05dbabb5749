use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
};

use crate::{
    nav::{NavigationState, Screen},
    ui::{
        components::backdrop::Backdrop, message::Intent, theme::Palette, traits::View,
        views::centered,
    },
};

const PAGE: u16 = 10;
const COLUMN_WIDTH: u16 = 72;

struct Section {
    title: &'static str,
    body: &'static [&'static str],
}

const SECTIONS: &[Section] = &[
    Section {
        title: "LEVEL 1 · ABOUT",
        body: &[
            "Systems programmer with a soft spot for audio and terminals.",
            "Builds small tools that do one thing and stay out of the way.",
        ],
    },
    Section {
        title: "LEVEL 2 · PROJECTS",
        body: &[
            "▸ gamefolio      this very menu, with a synthesizer attached",
            "▸ tapehead       a cassette-style sampler for the command line",
            "▸ lanterns       a tiny static site generator with live reload",
            "▸ driftwood      log shipper that survives flaky networks",
        ],
    },
    Section {
        title: "LEVEL 3 · SKILLS",
        body: &[
            "Rust · async I/O · DSP basics · terminal UIs",
            "Protocol design · profiling · writing things down",
        ],
    },
    Section {
        title: "LEVEL 4 · CONTACT",
        body: &[
            "mail    hello@example.dev",
            "code    github.com/example",
        ],
    },
];

fn content_lines<'a>(palette: &Palette) -> Vec<Line<'a>> {
    let heading = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(palette.primary);

    let mut lines = Vec::new();
    for section in SECTIONS {
        lines.push(Line::styled(section.title, heading));
        lines.push(Line::from(""));
        lines.extend(section.body.iter().map(|l| Line::styled(*l, text)));
        lines.push(Line::from(""));
        lines.push(Line::from(""));
    }
    lines
}

#[derive(Default)]
pub struct Portfolio {
    scroll: u16,
    max_scroll: u16,
}

impl Portfolio {
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll as i32 + delta).clamp(0, self.max_scroll as i32);
        self.scroll = target as u16;
    }
}

impl View for Portfolio {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &NavigationState, palette: &Palette) {
        f.render_widget(
            Backdrop::new(self.scroll, state.prefs.parallax_intensity, palette),
            area,
        );

        let column = centered(area, COLUMN_WIDTH, area.height);
        let lines = content_lines(palette);
        self.max_scroll = (lines.len() as u16).saturating_sub(column.height);
        self.scroll = self.scroll.min(self.max_scroll);

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            column,
        );
    }

    fn handle_input(&mut self, key: KeyEvent, _state: &NavigationState) -> Option<Intent> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('p') => return Some(Intent::OpenPauseMenu),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(PAGE as i32)),
            KeyCode::PageDown => self.scroll_by(PAGE as i32),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll,
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _state: &NavigationState) -> Option<Intent> {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-2),
            MouseEventKind::ScrollDown => self.scroll_by(2),
            _ => {}
        }
        None
    }

    /// Coming back from the pause menu keeps the reading position.
    fn on_enter(&mut self, from: Screen) {
        if !matches!(from, Screen::PauseMenu | Screen::Settings) {
            self.scroll = 0;
        }
    }

    fn hints(&self) -> &'static str {
        "↑↓/pgup/pgdn: scroll   esc/p: pause"
    }
}
