pub mod config;
pub mod engine;
pub mod error;
pub mod fx;
pub mod gesture;
pub mod output;
pub mod pattern;
pub mod sfx;
pub mod state;
pub mod synth;
pub mod timer;
pub mod voice;

pub use config::AudioConfig;
pub use engine::AudioEngine;
pub use error::AudioError;
pub use gesture::Gesture;
pub use output::AudioDevice;
pub use sfx::SfxKind;
