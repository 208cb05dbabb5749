use ratatui::crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Proof that the user actually did something. Audio output may only be
/// opened while holding one.
#[derive(Debug, Clone, Copy)]
pub struct Gesture {
    _private: (),
}

impl Gesture {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        (key.kind == KeyEventKind::Press).then_some(Self { _private: () })
    }

    pub fn from_mouse(mouse: &MouseEvent) -> Option<Self> {
        matches!(mouse.kind, MouseEventKind::Down(_)).then_some(Self { _private: () })
    }
}
