/*!
 * # xliffsync - XLIFF synchronization with UI localization settings
 *
 * A Rust library that reconciles exported XLIFF documents (one per language)
 * with localization settings taken from the UI layer.
 *
 * ## Features
 *
 * - Annotate translation units with translator context from the UI
 * - Remove translation units whose UI element opted out of translation
 * - Byte-faithful rewriting of the exported documents
 * - Atomic saves, per-language failure isolation
 * - Optional export through `xcodebuild -exportLocalizations`
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: XLIFF document model and storage:
 *   - `document::model`: Parsed document and translation units
 *   - `document::store`: File system and in-memory stores
 * - `sync`: The synchronization engine:
 *   - `sync::matcher`: Unit selection by identifier fragment
 *   - `sync::mutator`: Note replacement and unit removal
 *   - `sync::driver`: Per-language passes
 *   - `sync::report`: Outcome events and reporters
 * - `nodes`: UI-derived localization nodes
 * - `export`: External export tool integration
 * - `app_controller`: Main application controller
 * - `file_utils`: File system helpers
 * - `language_utils`: Language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod language_utils;
pub mod nodes;
pub mod sync;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{DocumentStore, FsDocumentStore, LocalizationDocument, MemoryDocumentStore};
pub use errors::{DocumentError, ExportError, UnitError};
pub use nodes::LocalizationNode;
pub use sync::{SyncAction, SyncDriver, SyncEvent, SyncOutcome, SyncReport};
