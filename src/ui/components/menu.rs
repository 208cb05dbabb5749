use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::ui::{message::Step, theme::Palette};

const CURSOR: &str = "▶ ";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MenuState {
    selected: usize,
}

impl MenuState {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Moves the selection, wrapping at both ends. Returns whether anything
    /// moved.
    pub fn step(&mut self, step: Step, len: usize) -> bool {
        if len < 2 {
            return false;
        }
        self.selected = match step {
            Step::Up => (self.selected + len - 1) % len,
            Step::Down => (self.selected + 1) % len,
        };
        true
    }
}

pub struct Menu<'a> {
    items: Vec<Line<'a>>,
    selected: usize,
    cursor: bool,
    palette: &'a Palette,
}

impl<'a> Menu<'a> {
    pub fn new<I, T>(items: I, selected: usize, palette: &'a Palette) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Line<'a>>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            selected,
            cursor: true,
            palette,
        }
    }

    pub fn cursor(mut self, cursor: bool) -> Self {
        self.cursor = cursor;
        self
    }
}

impl<'a> Widget for Menu<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let text = item.to_string();
                if i == self.selected {
                    let marker = if self.cursor { CURSOR } else { "" };
                    Line::from(format!("{marker}{text}")).style(
                        Style::default()
                            .fg(self.palette.primary)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::from(text).style(Style::default().fg(self.palette.neutral))
                }
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
