use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StateStorage, StorageError};

/// One `<slot>.json` file per slot under a state directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous document intact. There is no locking:
/// two processes sharing a directory overwrite each other (last writer wins).
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use (and create if needed) `dir` as the state directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// `{app_data_dir}/giftshop`.
    pub fn open_default() -> Result<Self, StorageError> {
        let dir = default_state_dir().ok_or_else(|| {
            StorageError::Unavailable("could not resolve an app data directory".to_string())
        })?;
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        if slot.is_empty() || slot.contains(['/', '\\']) || slot.starts_with('.') {
            return Err(StorageError::Unavailable(format!("invalid slot name '{slot}'")));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

/// Platform data directory plus `giftshop`, falling back to `~/.local/share`.
pub fn default_state_dir() -> Option<PathBuf> {
    let mut dir = dirs::data_dir().or_else(|| {
        dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        })
    })?;
    dir.push("giftshop");
    Some(dir)
}

impl StateStorage for FileStorage {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, slot: &str, contents: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(slot)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_directory_and_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested").join("state")).unwrap();
        assert!(storage.dir().is_dir());

        assert_eq!(storage.load("cart-storage").unwrap(), None);
        storage.save("cart-storage", r#"{"state":{},"version":0}"#).unwrap();
        assert!(storage.dir().join("cart-storage.json").is_file());
        assert!(!storage.dir().join("cart-storage.json.tmp").exists());
        assert_eq!(
            storage.load("cart-storage").unwrap().as_deref(),
            Some(r#"{"state":{},"version":0}"#)
        );
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path()).unwrap();
        storage.save("access-storage", "first").unwrap();
        storage.save("access-storage", "second").unwrap();
        assert_eq!(storage.load("access-storage").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path()).unwrap();
        storage.save("access-storage", "x").unwrap();
        storage.remove("access-storage").unwrap();
        storage.remove("access-storage").unwrap();
        assert_eq!(storage.load("access-storage").unwrap(), None);
    }

    #[test]
    fn rejects_slot_names_that_escape_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path()).unwrap();
        assert!(matches!(
            storage.save("../outside", "x"),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        if let Some(dir) = default_state_dir() {
            assert!(dir.ends_with("giftshop"));
        }
    }
}
