//! The per-page content loader. One call populates one page: the image
//! reference is always refreshed, then — when a usable translation is active
//! — the verse rows are fetched on the blocking pool, grouped, and appended.
//! Every translation failure is absorbed here and converted into placeholder
//! content by the recovery policy; nothing propagates to the caller.

use std::sync::Arc;

use log::{debug, warn};

use crate::error::TranslationError;
use crate::events::ReaderEvent;
use crate::reader::grouping::group_verses;
use crate::reader::manager::PageReader;
use crate::reader::recovery::recover;

impl PageReader {
    /// Populate the page at `index`, returning whether its content changed.
    ///
    /// The image reference is reassigned unconditionally. Verse content is
    /// only fetched when a translation is active, its handle is cached, and
    /// its backing file exists; otherwise the page stays image-only. Unless
    /// `force` is set, a page that already holds verses is left alone, which
    /// makes repeat loads for the same selection state idempotent.
    pub async fn load_page(&mut self, index: usize, force: bool) -> bool {
        let generation = self.generation;
        let Some(page) = self.pages.get_mut(index) else {
            return false;
        };

        let image_name = page.image_file_name();
        page.image_ref = self.images.page_image(&image_name);

        let Some(active_id) = self.registry.active_id().map(str::to_string) else {
            return false;
        };
        let Some(handle) = self.registry.active_handle() else {
            return false;
        };
        if !self.registry.active_file_exists() {
            let err = TranslationError::FileMissing(active_id);
            debug!("{err}, serving image only");
            return false;
        }

        if !force && !page.verses.is_empty() {
            return false;
        }
        page.verses.clear();
        let page_number = page.page_number;

        let fetch_handle = Arc::clone(&handle);
        let fetched =
            tokio::task::spawn_blocking(move || fetch_handle.verses_for_page(page_number)).await;

        // The collection may have been rebuilt while the fetch was in
        // flight; a late result must not touch a page it no longer owns.
        if !self.fetch_still_valid(generation, index) {
            debug!("discarding stale verse fetch for page {page_number}");
            return false;
        }

        let result = match fetched {
            Ok(result) => result,
            Err(join_err) => Err(TranslationError::QueryFailed(join_err.to_string())),
        };

        match result {
            Ok(rows) => {
                let entries = group_verses(&rows, self.chapters.as_ref());
                self.pages[index].verses.extend(entries);
            }
            Err(err) => {
                warn!("failed to load page {page_number} from {active_id}: {err}");
                recover(&mut self.registry, &mut self.pages[index], &active_id, &err);
            }
        }

        self.emit(ReaderEvent::PageContentChanged { index });
        true
    }

    /// Whether a fetch started at `generation` for the page at `index` may
    /// still mutate the collection after resuming.
    fn fetch_still_valid(&self, generation: u64, index: usize) -> bool {
        self.generation == generation && index < self.pages.len()
    }
}
