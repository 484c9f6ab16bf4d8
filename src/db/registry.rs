//! The translation handle cache: one open store per translation identifier,
//! opened lazily when a translation becomes active, evicted when recovery
//! declares it unusable, and disposed in bulk at teardown. An explicit
//! registry (rather than a bare map threaded through the code) keeps the
//! lifecycle rules in one place.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::db::handle::TranslationHandle;
use crate::error::TranslationError;

/// Owns every open translation handle, keyed by store file name.
pub struct TranslationRegistry {
    database_dir: PathBuf,
    active: Option<String>,
    handles: HashMap<String, Arc<TranslationHandle>>,
}

impl TranslationRegistry {
    /// Create a registry resolving identifiers against `database_dir`.
    pub fn new(database_dir: impl Into<PathBuf>) -> Self {
        Self {
            database_dir: database_dir.into(),
            active: None,
            handles: HashMap::new(),
        }
    }

    /// Mark `file_name` as the active translation, creating its handle if one
    /// is not already cached. A no-op when the id is already active. Handle
    /// creation performs no I/O, so activation itself cannot fail; a bad
    /// store reports its error on the first query instead.
    pub fn set_active(&mut self, file_name: &str) {
        if self.active.as_deref() == Some(file_name) {
            return;
        }

        self.active = Some(file_name.to_string());
        if !self.handles.contains_key(file_name) {
            let path = self.path_for(file_name);
            debug!("caching translation handle for {file_name}");
            self.handles.insert(
                file_name.to_string(),
                Arc::new(TranslationHandle::new(file_name, path)),
            );
        }
    }

    /// Identifier of the active translation, if one was ever set.
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Look up the cached handle for `file_name`. Fails when the id is empty
    /// or no handle is cached (for example after an eviction).
    pub fn handle(&self, file_name: &str) -> Result<Arc<TranslationHandle>, TranslationError> {
        if file_name.is_empty() {
            return Err(TranslationError::Unavailable(String::new()));
        }
        self.handles
            .get(file_name)
            .cloned()
            .ok_or_else(|| TranslationError::Unavailable(file_name.to_string()))
    }

    /// Handle for the active translation, when both the id and its cache
    /// entry are present.
    pub fn active_handle(&self) -> Option<Arc<TranslationHandle>> {
        let id = self.active.as_deref()?;
        self.handles.get(id).cloned()
    }

    /// Absolute path a translation identifier resolves to.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.database_dir.join(file_name)
    }

    /// Whether the backing file for the active translation is present on
    /// storage. `false` when no translation is active.
    pub fn active_file_exists(&self) -> bool {
        match self.active.as_deref() {
            Some(id) => self.path_for(id).is_file(),
            None => false,
        }
    }

    /// Close and forget the handle for `file_name`. The id may stay active;
    /// lookups fail until a new `set_active` re-creates the handle.
    pub fn evict(&mut self, file_name: &str) {
        if let Some(handle) = self.handles.remove(file_name) {
            debug!("evicting translation handle for {file_name}");
            handle.close();
        }
    }

    /// Close and forget every cached handle. Invoked once, at teardown.
    pub fn dispose_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.close();
        }
    }

    /// Number of cached handles, open or not.
    pub fn cached_count(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TranslationRegistry {
        TranslationRegistry::new("/nonexistent/translations")
    }

    #[test]
    fn set_active_caches_exactly_one_handle_per_id() {
        let mut reg = registry();
        reg.set_active("english.db");
        reg.set_active("english.db");
        assert_eq!(reg.cached_count(), 1);
        assert_eq!(reg.active_id(), Some("english.db"));

        reg.set_active("german.db");
        assert_eq!(reg.cached_count(), 2);
        assert_eq!(reg.active_id(), Some("german.db"));
    }

    #[test]
    fn handle_lookup_fails_for_empty_or_unknown_ids() {
        let reg = registry();
        assert!(matches!(
            reg.handle(""),
            Err(TranslationError::Unavailable(_))
        ));
        assert!(matches!(
            reg.handle("missing.db"),
            Err(TranslationError::Unavailable(_))
        ));
    }

    #[test]
    fn evicted_handles_stay_gone_until_reactivated() {
        let mut reg = registry();
        reg.set_active("english.db");
        assert!(reg.handle("english.db").is_ok());

        reg.evict("english.db");
        assert!(reg.handle("english.db").is_err());
        // Re-activating the same id is a no-op by design, so the cache stays
        // empty until the active translation actually changes.
        reg.set_active("english.db");
        assert!(reg.handle("english.db").is_err());

        reg.set_active("german.db");
        reg.set_active("english.db");
        assert!(reg.handle("english.db").is_ok());
    }

    #[test]
    fn dispose_all_empties_the_cache() {
        let mut reg = registry();
        reg.set_active("a.db");
        reg.set_active("b.db");
        let kept = reg.handle("a.db").unwrap();

        reg.dispose_all();
        assert_eq!(reg.cached_count(), 0);
        assert!(!kept.is_open());
        assert!(reg.handle("a.db").is_err());
    }
}
