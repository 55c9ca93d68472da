use log::debug;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::document::model::LocalizationDocument;
use crate::errors::DocumentError;

// @module: Loading and persisting localization documents

/// Storage backend for localization documents
///
/// Implementations must not leave a partially written destination behind when `save` fails.
pub trait DocumentStore: Send + Sync {
    /// Load and parse the document at `path`
    fn load(&self, path: &Path) -> Result<LocalizationDocument, DocumentError>;

    /// Serialize `document` and overwrite `path`
    fn save(&self, document: &LocalizationDocument, path: &Path) -> Result<(), DocumentError>;
}

/// Document store backed by the local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, path: &Path) -> Result<LocalizationDocument, DocumentError> {
        if path.is_dir() {
            return Err(DocumentError::NotFound { path: path.to_path_buf() });
        }
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DocumentError::NotFound { path: path.to_path_buf() });
            }
            Err(e) => {
                return Err(DocumentError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        let text = String::from_utf8(bytes).map_err(|e| DocumentError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("Loaded {} ({} bytes)", path.display(), text.len());

        LocalizationDocument::parse(&text).map_err(|message| DocumentError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn save(&self, document: &LocalizationDocument, path: &Path) -> Result<(), DocumentError> {
        let io_error = |message: String| DocumentError::Io {
            path: path.to_path_buf(),
            message,
        };

        let bytes = document.to_xml_bytes().map_err(io_error)?;

        // Write next to the destination so the final rename stays on one file system
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| io_error(e.to_string()))?;
        if let Ok(meta) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| io_error(e.to_string()))?;
        }
        tmp.write_all(&bytes).map_err(|e| io_error(e.to_string()))?;
        tmp.flush().map_err(|e| io_error(e.to_string()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| io_error(e.to_string()))?;
        tmp.persist(path).map_err(|e| io_error(e.error.to_string()))?;

        debug!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Document store that keeps serialized documents in memory
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    files: Mutex<HashMap<PathBuf, String>>,
    failing_saves: Mutex<HashSet<PathBuf>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw document content at `path`
    pub fn insert<P: Into<PathBuf>>(&self, path: P, content: &str) {
        self.files.lock().insert(path.into(), content.to_string());
    }

    /// Raw content currently stored at `path`
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    /// Make every subsequent save to `path` fail with an I/O error
    pub fn fail_saves_to<P: Into<PathBuf>>(&self, path: P) {
        self.failing_saves.lock().insert(path.into());
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self, path: &Path) -> Result<LocalizationDocument, DocumentError> {
        let content = self
            .get(path)
            .ok_or_else(|| DocumentError::NotFound { path: path.to_path_buf() })?;
        LocalizationDocument::parse(&content).map_err(|message| DocumentError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn save(&self, document: &LocalizationDocument, path: &Path) -> Result<(), DocumentError> {
        if self.failing_saves.lock().contains(path) {
            return Err(DocumentError::Io {
                path: path.to_path_buf(),
                message: "simulated write failure".to_string(),
            });
        }
        let content = document
            .to_xml_string()
            .map_err(|message| DocumentError::Io {
                path: path.to_path_buf(),
                message,
            })?;
        self.files.lock().insert(path.to_path_buf(), content);
        Ok(())
    }
}
