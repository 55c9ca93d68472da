use crate::document::{LocalizationDocument, TranslatableUnit};
use crate::errors::UnitError;
use crate::nodes::LocalizationNode;
use crate::sync::SyncAction;

/// Annotate or remove one matched unit according to the node's enablement flag.
///
/// The change is applied to `document` directly, so units matched later in the same
/// pass observe it.
pub fn apply(
    document: &mut LocalizationDocument,
    unit: &TranslatableUnit,
    node: &LocalizationNode,
) -> Result<SyncAction, UnitError> {
    if node.translation_enabled {
        document.set_note(unit.index, &node.context_description)?;
        Ok(SyncAction::Annotated)
    } else {
        document.remove_unit(unit.index)?;
        Ok(SyncAction::Removed)
    }
}
