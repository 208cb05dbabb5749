use thiserror::Error;

/// Why the output could not be acquired. Any of these leaves the engine
/// silent for the rest of the session.
#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("No audio output device available")]
    NoOutputDevice,

    #[error("Output stream could not be opened: {0}")]
    Stream(String),
}
