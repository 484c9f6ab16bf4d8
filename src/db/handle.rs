//! A handle over one translation's SQLite store. The connection is opened
//! lazily on the first query so activating a translation can never hard-fail;
//! a bad file surfaces its error only when a page actually asks for verses.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::TranslationError;
use crate::models::VerseRow;

/// Verse query honoring the store contract: rows for one page, pre-sorted by
/// (chapter, verse) so the grouping transform never has to re-sort.
const VERSES_FOR_PAGE: &str =
    "SELECT chapter, verse, text FROM verses WHERE page = ?1 ORDER BY chapter, verse";

/// Open connection to a single translation store, shared by every page that
/// needs that translation. Interior locking lets the blocking worker query
/// through a shared reference; it also serializes queries, which the store
/// connection requires.
pub struct TranslationHandle {
    file_name: String,
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl TranslationHandle {
    /// Create a handle for the store at `path`. No I/O happens here.
    pub fn new(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            path: path.into(),
            conn: Mutex::new(None),
        }
    }

    /// Identifier this handle was cached under.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Absolute path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch the verse rows for one page, opening the connection on first
    /// use. Both the deferred open and the query report through the
    /// translation failure taxonomy.
    pub fn verses_for_page(&self, page_number: i32) -> Result<Vec<VerseRow>, TranslationError> {
        let mut guard = self.lock();
        if guard.is_none() {
            let conn = Connection::open(&self.path).map_err(TranslationError::from_query)?;
            *guard = Some(conn);
        }
        let Some(conn) = guard.as_ref() else {
            return Err(TranslationError::Unavailable(self.file_name.clone()));
        };

        let mut stmt = conn
            .prepare(VERSES_FOR_PAGE)
            .map_err(TranslationError::from_query)?;
        let rows = stmt
            .query_map([page_number], |row| {
                Ok(VerseRow {
                    chapter: row.get(0)?,
                    number: row.get(1)?,
                    text: row.get(2)?,
                })
            })
            .map_err(TranslationError::from_query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(TranslationError::from_query)?;

        Ok(rows)
    }

    /// Drop the underlying connection. Safe to call on a never-opened or
    /// already-closed handle.
    pub fn close(&self) {
        self.lock().take();
    }

    /// Whether the underlying connection is currently open.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        // A poisoned lock only means a worker panicked mid-query; the
        // connection state itself is still coherent enough to close or retry.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for TranslationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationHandle")
            .field("file_name", &self.file_name)
            .field("open", &self.is_open())
            .finish()
    }
}
