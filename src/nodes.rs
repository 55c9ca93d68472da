use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// @module: UI-derived localization nodes

/// Localization settings of one UI element, as extracted from the interface layer.
///
/// `original_identifier` is a fragment of the exported unit ids, not necessarily a full id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationNode {
    // @field: Identifier fragment used for substring matching
    #[serde(alias = "originalIdentifier", alias = "original_id")]
    pub original_identifier: String,

    // @field: Keep the unit (true) or drop it from the export (false)
    #[serde(alias = "translationEnabled", alias = "i18n_enabled")]
    pub translation_enabled: bool,

    // @field: Note content written into matching units
    #[serde(default, alias = "contextDescription", alias = "formatted_info")]
    pub context_description: String,
}

impl LocalizationNode {
    /// Node whose matching units get annotated with `description`
    pub fn enabled(original_identifier: &str, description: &str) -> Self {
        Self {
            original_identifier: original_identifier.to_string(),
            translation_enabled: true,
            context_description: description.to_string(),
        }
    }

    /// Node whose matching units get removed
    pub fn disabled(original_identifier: &str) -> Self {
        Self {
            original_identifier: original_identifier.to_string(),
            translation_enabled: false,
            context_description: String::new(),
        }
    }
}

/// Load an ordered node list from a JSON array file
pub fn load_nodes<P: AsRef<Path>>(path: P) -> Result<Vec<LocalizationNode>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open node list: {}", path.display()))?;
    let nodes: Vec<LocalizationNode> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse node list: {}", path.display()))?;
    Ok(nodes)
}

/// Parse an ordered node list from a JSON string
pub fn parse_nodes(json: &str) -> Result<Vec<LocalizationNode>> {
    serde_json::from_str(json).context("Failed to parse node list")
}
