use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::ui::theme::Palette;

const FILLED: &str = "█";
const EMPTY: &str = "░";

/// A horizontal bar for `ratio` in `[0, 1]`, `width` cells wide.
pub fn slider<'a>(ratio: f64, width: usize, palette: &Palette) -> Line<'a> {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    Line::from(vec![
        Span::styled(FILLED.repeat(filled), Style::default().fg(palette.primary)),
        Span::styled(
            EMPTY.repeat(width - filled),
            Style::default().fg(palette.neutral),
        ),
    ])
}
