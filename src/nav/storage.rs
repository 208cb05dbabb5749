use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use serde_json::{Map, Value};

use crate::{nav::error::StorageError, nav::state::Preferences, util::dirs::get_config_dir};

/// Namespaced key the preference record lives under.
pub const STORAGE_KEY: &str = "gamefolio-settings";
pub const PREFERENCES_FILE: &str = "preferences.json";

pub trait PreferenceStorage: Send {
    /// `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Preferences>, StorageError>;
    fn save(&mut self, prefs: &Preferences) -> Result<(), StorageError>;
}

pub fn encode(prefs: &Preferences) -> Result<String, StorageError> {
    let mut record = Map::new();
    record.insert(STORAGE_KEY.to_string(), serde_json::to_value(prefs)?);
    Ok(serde_json::to_string_pretty(&Value::Object(record))?)
}

pub fn decode(raw: &str) -> Result<Option<Preferences>, StorageError> {
    let mut record: Map<String, Value> = serde_json::from_str(raw)?;
    match record.remove(STORAGE_KEY) {
        Some(value) => Ok(Some(serde_json::from_value::<Preferences>(value)?.sanitized())),
        None => Ok(None),
    }
}

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` in the platform config directory.
    pub fn default_location() -> Result<Self, StorageError> {
        let dir = get_config_dir().ok_or_else(|| {
            StorageError::Unavailable("no config directory for this platform".to_string())
        })?;
        Ok(Self::new(dir.join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Preferences>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, prefs: &Preferences) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encode(prefs)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the encoded record in memory. Clones share the record, so a second
/// store built from a clone behaves like a reload.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    record: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Preferences>, StorageError> {
        match self.raw() {
            Some(raw) => decode(&raw),
            None => Ok(None),
        }
    }

    fn save(&mut self, prefs: &Preferences) -> Result<(), StorageError> {
        let encoded = encode(prefs)?;
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(encoded);
        Ok(())
    }
}
