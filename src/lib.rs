//! Core library surface for the scripture reader.
//!
//! The engine here owns the paginated content flow: an ordered collection of
//! page entities, a cache of per-translation SQLite handles opened on demand,
//! an async per-page loader that groups verse rows under chapter titles, and
//! a recovery policy that turns bad translation data into placeholder content
//! instead of errors. The public modules expose an intentionally small API so
//! the `bin` target as well as external front ends can reuse the same pieces.
pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod providers;
pub mod reader;
pub mod ui;

/// The translation-store layer: one handle per store plus the cache that
/// owns their lifecycle.
pub use db::{TranslationHandle, TranslationRegistry};

/// Failure taxonomy for everything between activating a translation and
/// receiving verse rows.
pub use error::TranslationError;

/// Typed events the presentation layer observes.
pub use events::ReaderEvent;

/// The primary domain types other layers manipulate.
pub use models::{Book, Page, VerseEntry, VerseRow};

/// The reading-flow state container and its loader.
pub use reader::{PageReader, PLACEHOLDER_TITLE};

/// The interactive terminal front end.
pub use ui::run_app;
