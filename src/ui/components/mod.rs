pub mod backdrop;
pub mod menu;
pub mod slider;
