//! Where the save blob lives

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::PersistenceError;

/// Raw save storage. `load` returns `None` when nothing was saved yet.
pub trait StorageBackend {
    fn load(&self) -> Result<Option<String>, PersistenceError>;
    fn save(&mut self, contents: &str) -> Result<(), PersistenceError>;
}

/// JSON file on disk, replaced atomically through a temp file
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, contents: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store, with optional failure injection
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    pub contents: Option<String>,
    /// Make every call fail with an i/o error
    pub fail: bool,
}

impl MemoryBackend {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            contents: None,
            fail: true,
        }
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.fail {
            Err(io::Error::other("storage unavailable").into())
        } else {
            Ok(())
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        self.check()?;
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("save.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("save.json");
        let mut backend = FileBackend::new(&path);
        backend.save("{}").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("{}"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_memory_backend_failure_injection() {
        let mut backend = MemoryBackend::failing();
        assert!(matches!(backend.load(), Err(PersistenceError::Io(_))));
        assert!(backend.save("x").is_err());

        backend.fail = false;
        backend.save("x").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("x"));
    }
}
