//! The error recovery policy for failed page loads. The handle is always
//! evicted; a schema-mismatch failure additionally deletes the backing file
//! so the next use can re-download a clean copy. Whatever the failure kind,
//! the page receives a fixed two-entry placeholder. This is the sole point
//! where a translation failure becomes user-visible state.

use std::fs;

use log::{debug, warn};

use crate::db::TranslationRegistry;
use crate::error::TranslationError;
use crate::models::{Page, VerseEntry};

/// Title entry shown above the diagnostic detail when a load fails.
pub const PLACEHOLDER_TITLE: &str = "Error loading translation...";

/// Apply the recovery policy for a failed load of `page` against the
/// translation `file_name`.
pub(crate) fn recover(
    registry: &mut TranslationRegistry,
    page: &mut Page,
    file_name: &str,
    err: &TranslationError,
) {
    // Conservative: the handle may be unusable regardless of the error kind.
    registry.evict(file_name);

    if err.is_schema_mismatch() {
        let path = registry.path_for(file_name);
        match fs::remove_file(&path) {
            Ok(()) => debug!("deleted corrupt translation store {}", path.display()),
            // Never let a deletion failure mask the original error.
            Err(remove_err) => warn!(
                "could not delete corrupt translation store {}: {remove_err}",
                path.display()
            ),
        }
    }

    page.verses.clear();
    page.verses.push(VerseEntry::Title {
        text: PLACEHOLDER_TITLE.to_string(),
    });
    page.verses.push(VerseEntry::Verse {
        chapter: 0,
        number: 0,
        text: err.to_string(),
        source_text: None,
    });
}
