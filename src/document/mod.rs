/*!
 * Localization document handling.
 *
 * - `model`: the parsed XLIFF document and its translation units
 * - `store`: loading and atomically saving documents
 */

pub mod model;
pub mod store;

pub use model::{LocalizationDocument, TranslatableUnit, UnitIndex};
pub use store::{DocumentStore, FsDocumentStore, MemoryDocumentStore};
