/*!
 * Export of per-language localization documents.
 *
 * The export itself is done by an external build tool; this module only describes
 * the collaborator and provides the `xcodebuild` implementation.
 */

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::ExportError;

/// Produces one localization document per language under a directory
pub trait Exporter: Send + Sync {
    /// Write `{language}.{ext}` files for every language into `output_dir`
    fn export(&self, output_dir: &Path, languages: &[String]) -> Result<(), ExportError>;
}

/// Exports XLIFF files with `xcodebuild -exportLocalizations`
#[derive(Debug, Clone)]
pub struct XcodebuildExporter {
    // @field: Path to the .xcodeproj
    project_path: PathBuf,
    // @field: Executable, overridable for tests
    program: String,
}

impl XcodebuildExporter {
    pub fn new<P: Into<PathBuf>>(project_path: P) -> Self {
        Self {
            project_path: project_path.into(),
            program: "xcodebuild".to_string(),
        }
    }

    /// Run a different executable with the same arguments
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    /// Arguments passed to the export tool
    pub fn arguments(&self, output_dir: &Path, languages: &[String]) -> Vec<String> {
        let mut args = vec![
            "-exportLocalizations".to_string(),
            "-localizationPath".to_string(),
            output_dir.display().to_string(),
            "-project".to_string(),
            self.project_path.display().to_string(),
        ];
        for language in languages {
            args.push("-exportLanguage".to_string());
            args.push(language.clone());
        }
        args
    }
}

impl Exporter for XcodebuildExporter {
    fn export(&self, output_dir: &Path, languages: &[String]) -> Result<(), ExportError> {
        let args = self.arguments(output_dir, languages);
        info!(
            "Exporting {} language(s) from {}",
            languages.len(),
            self.project_path.display()
        );
        debug!("{} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| ExportError::Spawn {
                tool: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ExportError::Failed {
                tool: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
