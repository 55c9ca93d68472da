use crate::document::{LocalizationDocument, TranslatableUnit};

/// Select every live unit whose identifier contains `original_identifier`.
///
/// Matching is a plain, case-sensitive substring test: `"btn1"` selects `"btn1.title"`
/// as well as `"xbtn12.text"`. Exported ids look like `<object id>.<property>` while
/// UI nodes carry the object id only. Units without an `id` attribute never match.
/// An empty result is a normal outcome.
pub fn match_units(
    document: &LocalizationDocument,
    original_identifier: &str,
) -> Vec<TranslatableUnit> {
    document
        .indexed_ids()
        .filter(|(_, id)| id.contains(original_identifier))
        .filter_map(|(index, _)| document.get(index))
        .collect()
}
