use std::{fmt, sync::Arc};

use crate::audio::voice::VoiceSink;

/// Lifecycle of the engine. It starts `Locked` because no output may be
/// opened before the user has interacted.
#[derive(Clone)]
pub enum EnginePhase {
    Locked,
    Ready(Arc<dyn VoiceSink>),
    /// Opening the output failed; the engine stays silent for good.
    Unavailable,
}

impl EnginePhase {
    pub fn sink(&self) -> Option<&Arc<dyn VoiceSink>> {
        match self {
            EnginePhase::Ready(sink) => Some(sink),
            _ => None,
        }
    }
}

impl fmt::Debug for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnginePhase::Locked => write!(f, "Locked"),
            EnginePhase::Ready(_) => write!(f, "Ready"),
            EnginePhase::Unavailable => write!(f, "Unavailable"),
        }
    }
}
