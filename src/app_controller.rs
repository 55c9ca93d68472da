use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::document::{DocumentStore, FsDocumentStore};
use crate::export::Exporter;
use crate::file_utils::FileManager;
use crate::nodes::{self, LocalizationNode};
use crate::sync::{SyncDriver, SyncReport, SyncReporter};

// @module: Application controller for localization synchronization

/// Main application controller tying configuration, export and synchronization together
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Synchronization engine bound to the document store
    driver: SyncDriver,
}

impl Controller {
    // @method: Create a controller working on the local file system
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(FsDocumentStore::new()))
    }

    /// Create a controller with a custom document store
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let driver = SyncDriver::new(store).with_extension(&config.extension);
        Ok(Self { config, driver })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the node list named in the configuration
    pub fn load_nodes(&self) -> Result<Vec<LocalizationNode>> {
        let path = self
            .config
            .nodes_path
            .as_ref()
            .ok_or_else(|| anyhow!("No node list configured (set nodes_path or pass --nodes)"))?;
        let nodes = nodes::load_nodes(path)?;
        info!("Loaded {} node(s) from {}", nodes.len(), path.display());
        Ok(nodes)
    }

    /// Run a synchronization pass over the configured languages
    pub async fn sync(
        &self,
        nodes: Vec<LocalizationNode>,
        reporter: Arc<dyn SyncReporter>,
    ) -> Result<SyncReport> {
        let start_time = std::time::Instant::now();
        let base_path = self.config.localization_path.as_path();
        if !FileManager::dir_exists(base_path) {
            warn!("Localization directory does not exist: {}", base_path.display());
        }

        let report = if self.config.concurrent_languages {
            self.driver
                .sync_concurrent(&self.config.languages, base_path, Arc::new(nodes), reporter)
                .await?
        } else {
            self.driver
                .sync(&self.config.languages, base_path, &nodes, reporter.as_ref())
        };

        info!(
            "Synchronization finished in {}: {}",
            Self::format_duration(start_time.elapsed()),
            report.summary()
        );
        Ok(report)
    }

    /// Export fresh documents with `exporter`, then synchronize them
    pub async fn export_and_sync(
        &self,
        exporter: &dyn Exporter,
        nodes: Vec<LocalizationNode>,
        reporter: Arc<dyn SyncReporter>,
    ) -> Result<SyncReport> {
        let output_dir: &Path = self.config.localization_path.as_path();
        FileManager::ensure_dir(output_dir)?;
        exporter
            .export(output_dir, &self.config.languages)
            .context("Localization export failed")?;

        let produced = FileManager::existing_documents(
            output_dir,
            &self.config.languages,
            &self.config.extension,
        );
        if produced.len() < self.config.languages.len() {
            warn!(
                "Export produced {} of {} expected document(s)",
                produced.len(),
                self.config.languages.len()
            );
        }
        self.sync(nodes, reporter).await
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
