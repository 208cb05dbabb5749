pub mod main_menu;
pub mod pause;
pub mod portfolio;
pub mod settings;
pub mod start;

pub use main_menu::MainMenu;
pub use pause::PauseMenu;
pub use portfolio::Portfolio;
pub use settings::Settings;
pub use start::StartScreen;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
