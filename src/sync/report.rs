use log::{error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use crate::errors::{DocumentError, UnitError};
use crate::sync::{SyncAction, SyncEvent};

// @module: Outcome reporting for synchronization passes

/// Receives progress and outcome events during a pass
///
/// Implementations are shared between languages when languages run concurrently.
pub trait SyncReporter: Send + Sync {
    /// A language's document is about to be processed
    fn language_started(&self, _language: &str, _path: &Path) {}

    /// One node has been applied to a document
    fn node_synced(&self, event: &SyncEvent);

    /// A matched unit could not be annotated
    fn unit_failed(&self, _language: &str, _error: &UnitError) {}

    /// A language's document could not be loaded or saved
    fn language_failed(&self, _language: &str, _error: &DocumentError) {}

    /// A language's document has been written back
    fn language_saved(&self, _language: &str, _path: &Path) {}
}

/// Reporter that writes status lines through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl SyncReporter for LogReporter {
    fn language_started(&self, language: &str, _path: &Path) {
        info!("Updating translation units for {}", language);
    }

    fn node_synced(&self, event: &SyncEvent) {
        if event.outcome.count == 0 {
            return;
        }
        info!(
            "  ✔︎ {} translation unit(s) {} for {} {}",
            event.outcome.count,
            event.outcome.action,
            event.node.original_identifier,
            event.node.context_description
        );
    }

    fn unit_failed(&self, language: &str, error: &UnitError) {
        warn!("[{}] {}", language, error);
    }

    fn language_failed(&self, language: &str, error: &DocumentError) {
        error!("Skipping {}: {}", language, error);
    }
}

/// Reporter that records every node event, mostly for tests
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<SyncEvent>>,
    failed_languages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().clone()
    }

    pub fn failed_languages(&self) -> Vec<String> {
        self.failed_languages.lock().clone()
    }
}

impl SyncReporter for CollectingReporter {
    fn node_synced(&self, event: &SyncEvent) {
        self.events.lock().push(event.clone());
    }

    fn language_failed(&self, language: &str, _error: &DocumentError) {
        self.failed_languages.lock().push(language.to_string());
    }
}

/// Terminal state of one language
#[derive(Debug)]
pub enum LanguageStatus {
    /// Document written back with all mutations applied
    Saved,
    /// Document missing or unreadable; nothing was written
    LoadFailed(DocumentError),
    /// Mutations applied in memory but the write failed
    SaveFailed(DocumentError),
}

/// Result of synchronizing one language's document
#[derive(Debug)]
pub struct LanguageReport {
    pub language: String,
    pub path: PathBuf,
    pub events: Vec<SyncEvent>,
    /// Matched units that could not be mutated, usually for lack of a note element
    pub malformed: Vec<UnitError>,
    pub status: LanguageStatus,
}

impl LanguageReport {
    pub fn is_saved(&self) -> bool {
        matches!(self.status, LanguageStatus::Saved)
    }

    /// The load or save error, if any
    pub fn error(&self) -> Option<&DocumentError> {
        match &self.status {
            LanguageStatus::Saved => None,
            LanguageStatus::LoadFailed(e) | LanguageStatus::SaveFailed(e) => Some(e),
        }
    }

    /// Units affected by `action` across all nodes
    pub fn count(&self, action: SyncAction) -> usize {
        self.events
            .iter()
            .filter(|e| e.outcome.action == action)
            .map(|e| e.outcome.count)
            .sum()
    }
}

/// Result of a full synchronization pass, in language order
#[derive(Debug, Default)]
pub struct SyncReport {
    pub languages: Vec<LanguageReport>,
}

impl SyncReport {
    /// Every outcome event of the pass
    pub fn events(&self) -> impl Iterator<Item = &SyncEvent> {
        self.languages.iter().flat_map(|l| l.events.iter())
    }

    /// Languages whose document could not be loaded or saved
    pub fn failed_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .filter(|l| !l.is_saved())
            .map(|l| l.language.as_str())
            .collect()
    }

    /// Languages whose document was written back
    pub fn saved_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .filter(|l| l.is_saved())
            .map(|l| l.language.as_str())
            .collect()
    }

    /// All malformed units, paired with their language
    pub fn malformed_units(&self) -> Vec<(&str, &UnitError)> {
        self.languages
            .iter()
            .flat_map(|l| l.malformed.iter().map(move |e| (l.language.as_str(), e)))
            .collect()
    }

    /// True when every language was saved and no unit was malformed
    pub fn is_success(&self) -> bool {
        self.languages
            .iter()
            .all(|l| l.is_saved() && l.malformed.is_empty())
    }

    /// One-line summary for the end of a run
    pub fn summary(&self) -> String {
        let annotated: usize = self
            .languages
            .iter()
            .map(|l| l.count(SyncAction::Annotated))
            .sum();
        let removed: usize = self
            .languages
            .iter()
            .map(|l| l.count(SyncAction::Removed))
            .sum();
        format!(
            "{} language(s) saved, {} failed; {} unit(s) updated, {} removed, {} malformed",
            self.saved_languages().len(),
            self.failed_languages().len(),
            annotated,
            removed,
            self.malformed_units().len()
        )
    }
}
