use crate::ui::message::{Intent, Step};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that mean the same thing on every screen.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Intent> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Intent::Quit),
            _ => None,
        }
    }
}

/// Up/down in any of the usual spellings.
pub fn vertical(key: &KeyEvent) -> Option<Step> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Step::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Step::Down),
        _ => None,
    }
}

pub fn horizontal(key: &KeyEvent) -> Option<Step> {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Step::Up),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Step::Down),
        _ => None,
    }
}

pub fn is_confirm(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}
