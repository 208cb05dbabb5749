pub mod error;
pub mod state;
pub mod storage;
pub mod store;

pub use state::{MusicLocation, NavigationState, Preferences, Screen, Theme};
pub use storage::{JsonFileStorage, MemoryStorage, PreferenceStorage};
pub use store::NavigationStore;
