use crate::error::{Result, SeatdrawError};
use crate::storage::KeyValueBackend;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir).map_err(|e| {
            SeatdrawError::internal(format!(
                "Failed to create directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            dir: data_dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("Read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_persist_across_instances() {
        let temp_dir = tempdir().unwrap();

        let backend = FileBackend::new(temp_dir.path()).unwrap();
        backend.set_item("party", "{}").unwrap();

        let reopened = FileBackend::new(temp_dir.path()).unwrap();
        assert_eq!(reopened.get_item("party").unwrap().as_deref(), Some("{}"));
        assert!(temp_dir.path().join("party.json").exists());
        assert!(!temp_dir.path().join("party.json.tmp").exists());
    }

    #[test]
    fn test_missing_key_and_remove() {
        let temp_dir = tempdir().unwrap();
        let backend = FileBackend::new(&temp_dir.path().join("nested")).unwrap();

        assert_eq!(backend.get_item("absent").unwrap(), None);
        backend.remove_item("absent").unwrap();

        backend.set_item("k", "v").unwrap();
        backend.remove_item("k").unwrap();
        assert_eq!(backend.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_key_is_sanitized_into_file_name() {
        let temp_dir = tempdir().unwrap();
        let backend = FileBackend::new(temp_dir.path()).unwrap();
        let path = backend.path_for("../evil/key");
        assert_eq!(path, temp_dir.path().join(".._evil_key.json"));
    }
}
