/*!
 * Exporter double that writes sample documents instead of running a build tool
 */

use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use xliffsync::errors::ExportError;
use xliffsync::export::Exporter;

/// Records export calls and writes sample documents for every language
#[derive(Debug, Default)]
pub struct FakeExporter {
    pub calls: Mutex<Vec<(PathBuf, Vec<String>)>>,
    pub fail: bool,
}

impl FakeExporter {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl Exporter for FakeExporter {
    fn export(&self, output_dir: &Path, languages: &[String]) -> Result<(), ExportError> {
        self.calls
            .lock()
            .push((output_dir.to_path_buf(), languages.to_vec()));
        if self.fail {
            return Err(ExportError::Failed {
                tool: "fake".to_string(),
                status: "exit status: 65".to_string(),
                stderr: "project not found".to_string(),
            });
        }
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();
        super::write_sample_documents(output_dir, &languages).map_err(|e| ExportError::Spawn {
            tool: "fake".to_string(),
            message: e.to_string(),
        })
    }
}
