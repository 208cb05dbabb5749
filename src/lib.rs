pub mod audio;
pub mod nav;
pub mod ui;
pub mod util;
