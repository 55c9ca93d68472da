/*!
 * Synchronization driver.
 *
 * Runs the load → match/mutate per node → save cycle for every target language.
 * A language whose document cannot be loaded is reported and skipped; the pass
 * continues with the remaining languages.
 */

use anyhow::{Context, Result};
use futures::future::join_all;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::document::{DocumentStore, LocalizationDocument};
use crate::errors::UnitError;
use crate::nodes::LocalizationNode;
use crate::sync::report::{LanguageReport, LanguageStatus, SyncReport, SyncReporter};
use crate::sync::{SyncAction, SyncEvent, SyncOutcome, matcher, mutator};

/// Default extension of exported localization documents
pub const DEFAULT_EXTENSION: &str = "xliff";

/// Applies UI node settings to the exported documents of each language
#[derive(Clone)]
pub struct SyncDriver {
    // @field: Where documents are loaded from and saved to
    store: Arc<dyn DocumentStore>,
    // @field: Document file extension, without the dot
    extension: String,
}

impl SyncDriver {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different document extension
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// `{base_path}/{language}.{extension}`
    pub fn document_path(&self, base_path: &Path, language: &str) -> PathBuf {
        base_path.join(format!("{}.{}", language, self.extension))
    }

    /// Run a pass over all languages in order
    pub fn sync(
        &self,
        languages: &[String],
        base_path: &Path,
        nodes: &[LocalizationNode],
        reporter: &dyn SyncReporter,
    ) -> SyncReport {
        warn_on_empty_identifiers(nodes);
        let languages = languages
            .iter()
            .map(|language| self.sync_language(language, base_path, nodes, reporter))
            .collect();
        SyncReport { languages }
    }

    /// Run a pass with one blocking task per language.
    ///
    /// Languages share no state, so the result equals `sync`; reports keep input order.
    pub async fn sync_concurrent(
        &self,
        languages: &[String],
        base_path: &Path,
        nodes: Arc<Vec<LocalizationNode>>,
        reporter: Arc<dyn SyncReporter>,
    ) -> Result<SyncReport> {
        warn_on_empty_identifiers(&nodes);
        let tasks = languages.iter().map(|language| {
            let driver = self.clone();
            let language = language.clone();
            let base_path = base_path.to_path_buf();
            let nodes = Arc::clone(&nodes);
            let reporter = Arc::clone(&reporter);
            tokio::task::spawn_blocking(move || {
                driver.sync_language(&language, &base_path, &nodes, reporter.as_ref())
            })
        });

        let mut reports = Vec::with_capacity(languages.len());
        for joined in join_all(tasks).await {
            reports.push(joined.context("Language synchronization task panicked")?);
        }
        Ok(SyncReport { languages: reports })
    }

    /// Load, update and save the document of a single language
    pub fn sync_language(
        &self,
        language: &str,
        base_path: &Path,
        nodes: &[LocalizationNode],
        reporter: &dyn SyncReporter,
    ) -> LanguageReport {
        let path = self.document_path(base_path, language);
        reporter.language_started(language, &path);

        let mut document = match self.store.load(&path) {
            Ok(document) => document,
            Err(e) => {
                reporter.language_failed(language, &e);
                return LanguageReport {
                    language: language.to_string(),
                    path,
                    events: Vec::new(),
                    malformed: Vec::new(),
                    status: LanguageStatus::LoadFailed(e),
                };
            }
        };

        let (events, malformed) = sync_document(&mut document, language, nodes, reporter);
        if document.is_modified() {
            debug!(
                "[{}] {} unit(s) kept, {} removed",
                language,
                document.units().len(),
                document.removed_count()
            );
        } else {
            debug!("[{}] No changes, rewriting {} as is", language, path.display());
        }

        let status = match self.store.save(&document, &path) {
            Ok(()) => {
                reporter.language_saved(language, &path);
                LanguageStatus::Saved
            }
            Err(e) => {
                reporter.language_failed(language, &e);
                LanguageStatus::SaveFailed(e)
            }
        };

        LanguageReport {
            language: language.to_string(),
            path,
            events,
            malformed,
            status,
        }
    }
}

/// Apply every node, in order, to one document.
///
/// Nodes are folded over the same mutable document: a unit removed by an earlier
/// node is no longer matched, and the last enabled node matching a unit decides
/// its note.
pub fn sync_document(
    document: &mut LocalizationDocument,
    language: &str,
    nodes: &[LocalizationNode],
    reporter: &dyn SyncReporter,
) -> (Vec<SyncEvent>, Vec<UnitError>) {
    nodes.iter().fold(
        (Vec::with_capacity(nodes.len()), Vec::new()),
        |(mut events, mut malformed), node| {
            let units = matcher::match_units(document, &node.original_identifier);
            let outcome = if units.is_empty() {
                SyncOutcome::none()
            } else {
                let mut applied = 0usize;
                for unit in &units {
                    match mutator::apply(document, unit, node) {
                        Ok(_) => applied += 1,
                        Err(e) => {
                            reporter.unit_failed(language, &e);
                            malformed.push(e);
                        }
                    }
                }
                let action = if node.translation_enabled {
                    SyncAction::Annotated
                } else {
                    SyncAction::Removed
                };
                SyncOutcome {
                    action,
                    count: applied,
                }
            };
            debug!(
                "[{}] {} matched {} unit(s)",
                language,
                node.original_identifier,
                units.len()
            );

            let event = SyncEvent {
                language: language.to_string(),
                node: node.clone(),
                outcome,
            };
            reporter.node_synced(&event);
            events.push(event);
            (events, malformed)
        },
    )
}

fn warn_on_empty_identifiers(nodes: &[LocalizationNode]) {
    let empty = nodes
        .iter()
        .filter(|n| n.original_identifier.is_empty())
        .count();
    if empty > 0 {
        warn!(
            "{} node(s) have an empty identifier and will match every translation unit",
            empty
        );
    }
}
