use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    /// Existing documents for `languages` under `dir`, in language order
    pub fn existing_documents<P: AsRef<Path>>(
        dir: P,
        languages: &[String],
        extension: &str,
    ) -> Vec<PathBuf> {
        languages
            .iter()
            .map(|language| dir.as_ref().join(format!("{}.{}", language, extension)))
            .filter(|path| Self::file_exists(path))
            .collect()
    }
}
