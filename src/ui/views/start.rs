use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::{
    nav::NavigationState,
    ui::{message::Intent, theme::Palette, traits::View, views::centered},
};

const TITLE: [&str; 5] = [
    "┏━╸┏━┓┏┳┓┏━╸┏━╸┏━┓╻  ╻┏━┓",
    "┃╺┓┣━┫┃┃┃┣╸ ┣╸ ┃ ┃┃  ┃┃ ┃",
    "┗━┛╹ ╹╹ ╹┗━╸╹  ┗━┛┗━╸╹┗━┛",
    "",
    "a portfolio, played",
];

/// Frames per half blink period of the prompt.
const BLINK_FRAMES: u32 = 15;

#[derive(Default)]
pub struct StartScreen {
    frame: u32,
}

impl View for StartScreen {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &NavigationState, palette: &Palette) {
        self.frame = self.frame.wrapping_add(1);

        let mut lines: Vec<Line> = TITLE
            .iter()
            .map(|l| Line::from(*l).style(Style::default().fg(palette.primary)))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(""));

        let prompt = if (self.frame / BLINK_FRAMES) % 2 == 0 {
            "PRESS ANY KEY"
        } else {
            ""
        };
        lines.push(
            Line::from(prompt).style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        );

        let height = lines.len() as u16;
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered(area, area.width, height),
        );
    }

    fn handle_input(&mut self, key: KeyEvent, _state: &NavigationState) -> Option<Intent> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Intent::Quit),
            _ => Some(Intent::EnterMainMenu),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _state: &NavigationState) -> Option<Intent> {
        matches!(mouse.kind, MouseEventKind::Down(_)).then_some(Intent::EnterMainMenu)
    }

    fn hints(&self) -> &'static str {
        "any key: start   q: quit"
    }
}
