//! Fuel state and settings storage
//!
//! The calculator only needs a load/save contract ([`FuelStorage`]). Two
//! backends are provided: [`MemoryStorage`] for tests and hosts that keep
//! their own storage, and [`JsonFileStorage`] which writes pretty-printed
//! JSON files into a directory.

use crate::settings::Settings;
use crate::state::FuelState;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the persisted fuel state snapshot
pub const FUEL_STATE_FILE: &str = "pc12-fuel-calculator.json";

/// File name of the persisted settings
pub const SETTINGS_FILE: &str = "pc12-fuel-calculator-settings.json";

/// Errors that can occur with persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to read a stored file
    #[error("Failed to load {path}: {source}")]
    LoadFailed {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// Stored contents are not valid JSON for the expected type
    #[error("Failed to parse {path}: {source}")]
    ParseFailed {
        /// File with bad contents
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
    /// Failed to serialize a value
    #[error("Failed to serialize: {0}")]
    SerializeFailed(#[from] serde_json::Error),
    /// Failed to write or remove a stored file
    #[error("Failed to save {path}: {source}")]
    SaveFailed {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// Storage backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Load/save contract the calculator persists through
///
/// Every method is best-effort from the calculator's point of view: errors
/// are logged and the in-memory state stays authoritative.
pub trait FuelStorage {
    /// Stored fuel state, or `None` if nothing was saved
    ///
    /// # Errors
    /// Returns error if stored data exists but cannot be read or parsed
    fn load_fuel_state(&self) -> Result<Option<FuelState>, PersistenceError>;

    /// Store the fuel state, replacing any previous snapshot
    ///
    /// # Errors
    /// Returns error if the snapshot cannot be written
    fn save_fuel_state(&mut self, state: &FuelState) -> Result<(), PersistenceError>;

    /// Stored settings merged with defaults; defaults if nothing was saved
    ///
    /// # Errors
    /// Returns error if stored settings exist but cannot be read or parsed
    fn load_settings(&self) -> Result<Settings, PersistenceError>;

    /// Store the settings
    ///
    /// # Errors
    /// Returns error if the settings cannot be written
    fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError>;

    /// Remove the stored fuel state snapshot (no-op if absent)
    ///
    /// # Errors
    /// Returns error if an existing snapshot cannot be removed
    fn clear_fuel_state(&mut self) -> Result<(), PersistenceError>;
}

impl<S: FuelStorage + ?Sized> FuelStorage for Box<S> {
    fn load_fuel_state(&self) -> Result<Option<FuelState>, PersistenceError> {
        (**self).load_fuel_state()
    }

    fn save_fuel_state(&mut self, state: &FuelState) -> Result<(), PersistenceError> {
        (**self).save_fuel_state(state)
    }

    fn load_settings(&self) -> Result<Settings, PersistenceError> {
        (**self).load_settings()
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        (**self).save_settings(settings)
    }

    fn clear_fuel_state(&mut self) -> Result<(), PersistenceError> {
        (**self).clear_fuel_state()
    }
}

/// In-process storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    fuel_state: Option<FuelState>,
    settings: Option<Settings>,
}

impl MemoryStorage {
    /// Empty storage: no snapshot, default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded as if a previous session had saved these values
    pub fn with_saved(fuel_state: Option<FuelState>, settings: Option<Settings>) -> Self {
        Self {
            fuel_state,
            settings,
        }
    }

    /// Snapshot currently held, if any
    pub fn saved_fuel_state(&self) -> Option<&FuelState> {
        self.fuel_state.as_ref()
    }

    /// Settings currently held, if any were saved
    pub fn saved_settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }
}

impl FuelStorage for MemoryStorage {
    fn load_fuel_state(&self) -> Result<Option<FuelState>, PersistenceError> {
        Ok(self.fuel_state)
    }

    fn save_fuel_state(&mut self, state: &FuelState) -> Result<(), PersistenceError> {
        self.fuel_state = Some(*state);
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings, PersistenceError> {
        Ok(self.settings.unwrap_or_default())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        self.settings = Some(*settings);
        Ok(())
    }

    fn clear_fuel_state(&mut self) -> Result<(), PersistenceError> {
        self.fuel_state = None;
        Ok(())
    }
}

/// JSON files in a directory
///
/// Missing files read as "nothing saved". The directory is created on the
/// first write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Store files under `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory the files live in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the fuel state snapshot
    pub fn fuel_state_path(&self) -> PathBuf {
        self.dir.join(FUEL_STATE_FILE)
    }

    /// Path of the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    fn read_optional(path: &Path) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::LoadFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(path, contents))
            .map_err(|source| PersistenceError::SaveFailed {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl FuelStorage for JsonFileStorage {
    fn load_fuel_state(&self) -> Result<Option<FuelState>, PersistenceError> {
        let path = self.fuel_state_path();
        let Some(contents) = Self::read_optional(&path)? else {
            return Ok(None);
        };

        let state = serde_json::from_str(&contents)
            .map_err(|source| PersistenceError::ParseFailed { path, source })?;

        Ok(Some(state))
    }

    fn save_fuel_state(&mut self, state: &FuelState) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string_pretty(state)?;
        self.write(&self.fuel_state_path(), &contents)
    }

    fn load_settings(&self) -> Result<Settings, PersistenceError> {
        let path = self.settings_path();
        let Some(contents) = Self::read_optional(&path)? else {
            return Ok(Settings::default());
        };

        serde_json::from_str(&contents).map_err(|source| PersistenceError::ParseFailed { path, source })
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string_pretty(settings)?;
        self.write(&self.settings_path(), &contents)
    }

    fn clear_fuel_state(&mut self) -> Result<(), PersistenceError> {
        let path = self.fuel_state_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::SaveFailed { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Pounds, UnitSystem};

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load_fuel_state().unwrap().is_none());
        assert_eq!(storage.load_settings().unwrap(), Settings::default());

        let state = FuelState {
            current_fuel: Pounds::new(900.0),
            ..FuelState::default()
        };
        storage.save_fuel_state(&state).unwrap();
        assert_eq!(storage.load_fuel_state().unwrap(), Some(state));

        storage.clear_fuel_state().unwrap();
        assert!(storage.saved_fuel_state().is_none());
    }

    #[test]
    fn test_json_storage_missing_files_read_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("not-yet-created"));
        assert!(storage.load_fuel_state().unwrap().is_none());
        assert_eq!(storage.load_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_json_storage_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonFileStorage::new(dir.path());

        let state = FuelState {
            current_fuel: Pounds::new(1200.0),
            desired_fuel: Pounds::new(2000.0),
            temperature: 15.0,
            unit_system: UnitSystem::Metric,
            ..FuelState::default()
        };
        storage.save_fuel_state(&state).unwrap();

        let loaded = storage.load_fuel_state().unwrap().unwrap();
        assert_eq!(loaded, state);

        let raw = fs::read_to_string(storage.fuel_state_path()).unwrap();
        assert!(raw.contains("\"currentFuel\""));
        assert!(raw.contains("\"metric\""));
    }

    #[test]
    fn test_json_storage_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonFileStorage::new(dir.path());
        storage.save_fuel_state(&FuelState::default()).unwrap();
        storage.clear_fuel_state().unwrap();
        storage.clear_fuel_state().unwrap();
        assert!(!storage.fuel_state_path().exists());
    }

    #[test]
    fn test_json_storage_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        fs::write(storage.settings_path(), "{ not json").unwrap();
        let err = storage.load_settings().unwrap_err();
        assert!(matches!(err, PersistenceError::ParseFailed { .. }));
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn test_json_storage_partial_settings_merge() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        fs::write(storage.settings_path(), r#"{"persistSettings": false}"#).unwrap();
        let settings = storage.load_settings().unwrap();
        assert!(!settings.persist_settings);
        assert_eq!(settings.max_fuel_load, Settings::default().max_fuel_load);
    }
}
