pub mod dirs;
pub mod hook;
pub mod log;
