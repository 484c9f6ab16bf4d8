//! Failure taxonomy for the translation layer. Every failure a load can hit
//! is classified here so the recovery policy can decide between a plain
//! eviction and the self-healing file deletion without string-matching at the
//! call site.

use thiserror::Error;

/// Case-insensitive prefix that marks a structural/schema mismatch in the
/// store (the table the query contract expects does not exist). SQLite phrases
/// these as `no such table: <name>`.
const SCHEMA_MISMATCH_PREFIX: &str = "no such table";

#[derive(Debug, Error)]
/// Everything that can go wrong between asking for a translation and getting
/// verse rows back. None of these cross the loader boundary; they are
/// converted into placeholder content there.
pub enum TranslationError {
    /// No handle is cached for the requested identifier (or the identifier is
    /// empty). Loads degrade to image-only content.
    #[error("no translation available for '{0}'")]
    Unavailable(String),

    /// The backing file is gone from storage; short-circuits before querying.
    #[error("translation file missing: {0}")]
    FileMissing(String),

    /// The store opened but its schema does not match the query contract.
    /// Recovery deletes the backing file so the next use re-downloads it.
    #[error("{0}")]
    Corrupt(String),

    /// Any other query failure. Recovery evicts the handle but keeps the file.
    #[error("{0}")]
    QueryFailed(String),
}

impl TranslationError {
    /// Classify a rusqlite failure into [`TranslationError::Corrupt`] or
    /// [`TranslationError::QueryFailed`] based on its message. The message is
    /// preserved verbatim because the placeholder content surfaces it as
    /// diagnostic detail text.
    pub fn from_query(err: rusqlite::Error) -> Self {
        let message = err.to_string();
        if is_schema_mismatch(&message) {
            TranslationError::Corrupt(message)
        } else {
            TranslationError::QueryFailed(message)
        }
    }

    /// Whether recovery should also delete the backing file.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, TranslationError::Corrupt(_))
    }
}

fn is_schema_mismatch(message: &str) -> bool {
    message
        .to_ascii_lowercase()
        .starts_with(SCHEMA_MISMATCH_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_such_table_classifies_as_corrupt() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("no such table: verses".to_string()),
        );
        let classified = TranslationError::from_query(err);
        assert!(classified.is_schema_mismatch());
        assert_eq!(classified.to_string(), "no such table: verses");
    }

    #[test]
    fn classification_ignores_case() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("No Such Table: verses".to_string()),
        );
        assert!(TranslationError::from_query(err).is_schema_mismatch());
    }

    #[test]
    fn missing_file_reports_its_identifier() {
        let err = TranslationError::FileMissing("english.db".to_string());
        assert_eq!(err.to_string(), "translation file missing: english.db");
        assert!(!err.is_schema_mismatch());
    }

    #[test]
    fn other_failures_classify_as_query_failed() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("no such column: page".to_string()),
        );
        let classified = TranslationError::from_query(err);
        assert!(!classified.is_schema_mismatch());
    }
}
