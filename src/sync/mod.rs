/*!
 * Translation unit synchronization.
 *
 * - `matcher`: selects the units belonging to a UI node
 * - `mutator`: annotates or removes a matched unit
 * - `report`: outcome events and reporting sinks
 * - `driver`: runs a synchronization pass over all languages
 */

pub mod driver;
pub mod matcher;
pub mod mutator;
pub mod report;

use serde::Serialize;
use std::fmt;

use crate::nodes::LocalizationNode;

pub use driver::SyncDriver;
pub use matcher::match_units;
pub use report::{
    CollectingReporter, LanguageReport, LanguageStatus, LogReporter, SyncReport, SyncReporter,
};

/// What happened to the units matched by one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    /// Note content replaced with the node's description
    Annotated,
    /// Units removed from the document
    Removed,
    /// Nothing matched
    None,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Annotated => "updated",
            Self::Removed => "removed",
            Self::None => "untouched",
        };
        write!(f, "{}", text)
    }
}

/// Per-node result within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub action: SyncAction,
    /// Matched units the action was applied to. Matched units that could not be
    /// annotated are left out and listed in `LanguageReport::malformed` instead.
    pub count: usize,
}

impl SyncOutcome {
    pub fn none() -> Self {
        Self {
            action: SyncAction::None,
            count: 0,
        }
    }
}

/// One entry of the outcome stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncEvent {
    pub language: String,
    pub node: LocalizationNode,
    pub outcome: SyncOutcome,
}
