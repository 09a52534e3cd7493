//! Save/Load functionality for persisting a session.
//!
//! One save record per keeper. JSON is the default encoding; bincode is
//! available for compact saves. Where the bytes live is up to a
//! [`SaveStore`].

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use terrarium_logic::clock;
use terrarium_logic::environment::Environment;

use crate::components::{Creature, Habitat};
use crate::error::SaveError;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub creature: Creature,
    pub tank_cleanliness: f32,
    pub day_night_cycle: f32,
    pub uvb_hours_today: f32,
    pub environment: Environment,
    /// Session clock at save time, in milliseconds.
    pub saved_at_ms: u64,
}

impl SaveData {
    pub fn new(creature: &Creature, habitat: &Habitat, environment: Environment, now_ms: u64) -> Self {
        Self {
            version: SAVE_VERSION,
            creature: creature.clone(),
            tank_cleanliness: habitat.cleanliness,
            day_night_cycle: habitat.day_night_cycle,
            uvb_hours_today: habitat.uvb_hours_today,
            environment,
            saved_at_ms: now_ms,
        }
    }

    /// Reject records carrying NaN or infinite numbers. Finite values that
    /// are merely out of range are clamped on restore instead.
    pub fn check_finite(&self) -> Result<(), SaveError> {
        let v = &self.creature.vitals;
        let fields = [
            ("health", v.health),
            ("hunger", v.hunger),
            ("hydration", v.hydration),
            ("happiness", v.happiness),
            ("size_inches", self.creature.size_inches),
            ("tank_cleanliness", self.tank_cleanliness),
            ("day_night_cycle", self.day_night_cycle),
            ("uvb_hours_today", self.uvb_hours_today),
        ];
        if !self.creature.real_age_secs.is_finite() {
            return Err(SaveError::InvalidRecord { field: "real_age_secs" });
        }
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(field, _)) => Err(SaveError::InvalidRecord { field }),
            None => Ok(()),
        }
    }

    /// Habitat as saved, with cleanliness clamped and the cycle wrapped.
    pub fn habitat(&self) -> Habitat {
        let mut habitat = Habitat {
            cleanliness: 0.0,
            day_night_cycle: clock::advance_cycle(self.day_night_cycle, 0.0),
            uvb_hours_today: self.uvb_hours_today.max(0.0),
        };
        habitat.set_cleanliness(self.tank_cleanliness);
        habitat
    }

    /// Seconds between this save and `now_ms`, never negative.
    pub fn seconds_since(&self, now_ms: u64) -> f32 {
        now_ms.saturating_sub(self.saved_at_ms) as f32 / 1000.0
    }
}

/// Encoding of the save record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    #[default]
    Json,
    Bincode,
}

impl std::str::FromStr for SaveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "bincode" => Ok(Self::Bincode),
            other => Err(format!("unknown save format '{other}'")),
        }
    }
}

/// Write a save record to a writer
pub fn write_save<W: Write>(writer: W, data: &SaveData, format: SaveFormat) -> Result<(), SaveError> {
    match format {
        SaveFormat::Json => serde_json::to_writer(writer, data)?,
        SaveFormat::Bincode => bincode::serialize_into(writer, data)?,
    }
    Ok(())
}

/// Read a save record from a reader, rejecting other format versions.
pub fn read_save<R: Read>(reader: R, format: SaveFormat) -> Result<SaveData, SaveError> {
    let data: SaveData = match format {
        SaveFormat::Json => serde_json::from_reader(reader)?,
        SaveFormat::Bincode => bincode::deserialize_from(reader)?,
    };

    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    Ok(data)
}

pub fn encode(data: &SaveData, format: SaveFormat) -> Result<Vec<u8>, SaveError> {
    let mut buffer = Vec::new();
    write_save(&mut buffer, data, format)?;
    Ok(buffer)
}

pub fn decode(bytes: &[u8], format: SaveFormat) -> Result<SaveData, SaveError> {
    read_save(bytes, format)
}

/// Where save bytes live. The session never touches storage directly.
pub trait SaveStore {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SaveError>;

    /// Stored bytes, or [`SaveError::NotFound`] when nothing is saved.
    fn read(&self) -> Result<Vec<u8>, SaveError>;

    /// Remove the save. Deleting an absent save is not an error.
    fn delete(&mut self) -> Result<(), SaveError>;
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

impl SaveStore for MemoryStore {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SaveError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(bytes.to_vec());
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>, SaveError> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(SaveError::NotFound)
    }

    fn delete(&mut self) -> Result<(), SaveError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Single-file store. Writes go to a sibling temp file first and are then
/// renamed over the save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SaveStore for FileStore {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SaveError> {
        let temp = self.temp_path();
        std::fs::write(&temp, bytes)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>, SaveError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SaveError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self) -> Result<(), SaveError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ColorMorph;

    fn sample() -> SaveData {
        let creature = Creature::hatch("Spike", ColorMorph::Citrus);
        let habitat = Habitat {
            cleanliness: 64.5,
            day_night_cycle: 72.0,
            uvb_hours_today: 1.25,
        };
        SaveData::new(&creature, &habitat, Environment::default(), 12_345)
    }

    #[test]
    fn test_json_and_bincode_both_restore_the_record() {
        let data = sample();
        for format in [SaveFormat::Json, SaveFormat::Bincode] {
            let bytes = encode(&data, format).expect("encode");
            assert_eq!(decode(&bytes, format).expect("decode"), data);
        }
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut data = sample();
        data.version = SAVE_VERSION + 1;
        let bytes = encode(&data, SaveFormat::Json).expect("encode");
        match decode(&bytes, SaveFormat::Json) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        assert!(matches!(
            decode(b"{not json", SaveFormat::Json),
            Err(SaveError::Json(_))
        ));
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let mut store = MemoryStore::new();
        let observer = store.clone();
        assert!(matches!(observer.read(), Err(SaveError::NotFound)));

        store.write(b"abc").expect("write");
        assert_eq!(observer.read().expect("read"), b"abc".to_vec());

        store.delete().expect("delete");
        assert!(observer.is_empty());
    }

    #[test]
    fn test_file_store_roundtrip_and_delete() {
        let path = std::env::temp_dir().join(format!("terrarium-save-{}.json", std::process::id()));
        let mut store = FileStore::new(&path);
        let _ = store.delete();
        assert!(matches!(store.read(), Err(SaveError::NotFound)));

        let bytes = encode(&sample(), SaveFormat::Json).expect("encode");
        store.write(&bytes).expect("write");
        assert_eq!(store.read().expect("read"), bytes);

        store.delete().expect("delete");
        store.delete().expect("second delete is fine");
        assert!(!path.exists());
    }

    #[test]
    fn test_seconds_since_saturates() {
        let data = sample();
        assert_eq!(data.seconds_since(0), 0.0);
        assert_eq!(data.seconds_since(72_345), 60.0);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<SaveFormat>(), Ok(SaveFormat::Json));
        assert_eq!("bincode".parse::<SaveFormat>(), Ok(SaveFormat::Bincode));
        assert!("yaml".parse::<SaveFormat>().is_err());
    }

    #[test]
    fn test_non_finite_record_rejected() {
        let mut data = sample();
        assert!(data.check_finite().is_ok());
        data.creature.vitals.hunger = f32::NAN;
        match data.check_finite() {
            Err(SaveError::InvalidRecord { field }) => assert_eq!(field, "hunger"),
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn test_habitat_restore_clamps_and_wraps() {
        let mut data = sample();
        data.tank_cleanliness = 140.0;
        data.day_night_cycle = 130.0;
        let habitat = data.habitat();
        assert_eq!(habitat.cleanliness, 100.0);
        assert!((habitat.day_night_cycle - 30.0).abs() < 1e-4);
    }
}
