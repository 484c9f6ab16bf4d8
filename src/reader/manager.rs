//! The page collection manager: owns every page entity, the current
//! selection, and the translation registry, and drives the per-page loader on
//! navigation. All mutation happens on the owner context; the only offloaded
//! work is the verse fetch inside the loader.

use std::path::PathBuf;

use log::warn;

use crate::db::TranslationRegistry;
use crate::events::{EventListener, ReaderEvent};
use crate::models::{Book, Page};
use crate::providers::{keys, ChapterNameResolver, ImageProvider, SettingsStore};

/// Text size applied when no preference has been persisted yet.
const DEFAULT_TEXT_SIZE: u32 = 15;

/// Central state container for the reading flow. Construction hydrates the
/// selection from the settings store; [`PageReader::initialize`] then builds
/// the page collection and navigates to the last-viewed page.
pub struct PageReader {
    book: Book,
    pub(crate) pages: Vec<Page>,
    current_index: Option<usize>,
    current_page_number: i32,
    show_translation: bool,
    text_size: u32,
    loaded: bool,
    /// Bumped whenever the collection is rebuilt or torn down; in-flight
    /// loads compare it after resuming so a late result never mutates a page
    /// from a previous collection.
    pub(crate) generation: u64,
    pub(crate) registry: TranslationRegistry,
    pub(crate) settings: Box<dyn SettingsStore>,
    pub(crate) images: Box<dyn ImageProvider>,
    pub(crate) chapters: Box<dyn ChapterNameResolver>,
    listeners: Vec<EventListener>,
}

impl PageReader {
    /// Build a reader over `book`, resolving translation stores under
    /// `database_dir`. The persisted selection (active translation,
    /// show-translation flag, text size, last-viewed page) is restored from
    /// `settings` immediately; no store is opened until a page asks for
    /// verses.
    pub fn new(
        book: Book,
        database_dir: impl Into<PathBuf>,
        settings: Box<dyn SettingsStore>,
        images: Box<dyn ImageProvider>,
        chapters: Box<dyn ChapterNameResolver>,
    ) -> Self {
        let mut registry = TranslationRegistry::new(database_dir);

        let show_translation = settings.get_bool(keys::SHOW_TRANSLATION).unwrap_or(false);
        let text_size = settings
            .get_int(keys::TRANSLATION_TEXT_SIZE)
            .map(|size| size.max(1) as u32)
            .unwrap_or(DEFAULT_TEXT_SIZE);
        let current_page_number = settings
            .get_int(keys::LAST_PAGE)
            .map(|page| page as i32)
            .unwrap_or(book.first_page);
        if let Some(file_name) = settings.get_string(keys::ACTIVE_TRANSLATION) {
            if !file_name.is_empty() {
                registry.set_active(&file_name);
            }
        }

        Self {
            book,
            pages: Vec::new(),
            current_index: None,
            current_page_number,
            show_translation,
            text_size,
            loaded: false,
            generation: 0,
            registry,
            settings,
            images,
            chapters,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for reader events. Listeners run synchronously on
    /// the owner context, in subscription order.
    pub fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub(crate) fn emit(&mut self, event: ReaderEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Populate the page collection if it is empty, fan the current text size
    /// out to every page, and navigate to the persisted current page (which
    /// triggers its load). A second call on a populated collection only
    /// refreshes the text size.
    pub async fn initialize(&mut self) {
        if self.pages.is_empty() {
            for page_number in (self.book.first_page..=self.book.last_page).rev() {
                self.pages
                    .push(Page::new(page_number, self.show_translation, self.text_size));
            }
            self.generation += 1;
            let count = self.pages.len();
            self.emit(ReaderEvent::PagesInitialized { count });
        }

        let size = self.text_size;
        for page in &mut self.pages {
            page.text_size = size;
        }
        self.loaded = true;

        if let Some(index) = self.book.index_from_page_number(self.current_page_number) {
            self.set_current_index(index).await;
        }
    }

    /// Move the selection to `index`. A no-op when the index is unchanged;
    /// otherwise records and persists the page number and triggers a
    /// (non-forced) load of that page.
    pub async fn set_current_index(&mut self, index: usize) {
        if self.current_index == Some(index) {
            return;
        }
        let Some(page_number) = self.pages.get(index).map(|page| page.page_number) else {
            warn!("ignoring navigation to out-of-range index {index}");
            return;
        };

        self.current_index = Some(index);
        self.current_page_number = page_number;
        self.settings.set_int(keys::LAST_PAGE, page_number.into());
        self.emit(ReaderEvent::CurrentPageChanged { index, page_number });

        self.load_page(index, false).await;
    }

    /// Navigate by page number instead of collection index.
    pub async fn set_current_page(&mut self, page_number: i32) {
        if let Some(index) = self.book.index_from_page_number(page_number) {
            self.set_current_index(index).await;
        }
    }

    /// Toggle translation display. The flag fans out to every page, loaded or
    /// not, so pages entering the view render consistently.
    pub fn set_show_translation(&mut self, enabled: bool) {
        if self.show_translation == enabled {
            return;
        }
        self.show_translation = enabled;
        for page in &mut self.pages {
            page.show_translation = enabled;
        }
        self.settings.set_bool(keys::SHOW_TRANSLATION, enabled);
        self.emit(ReaderEvent::ShowTranslationChanged { enabled });
    }

    /// Change the translation text size and fan it out to every page.
    pub fn set_text_size(&mut self, size: u32) {
        if self.text_size == size || size == 0 {
            return;
        }
        self.text_size = size;
        for page in &mut self.pages {
            page.text_size = size;
        }
        self.settings
            .set_int(keys::TRANSLATION_TEXT_SIZE, size.into());
        self.emit(ReaderEvent::TextSizeChanged { size });
    }

    /// Switch the active translation store. Existing page content is left
    /// untouched; pages pick the new translation up when they are (re)loaded.
    pub fn set_translation_file(&mut self, file_name: &str) {
        if self.registry.active_id() == Some(file_name) {
            return;
        }
        self.registry.set_active(file_name);
        self.settings.set_string(keys::ACTIVE_TRANSLATION, file_name);
        self.emit(ReaderEvent::TranslationChanged {
            file_name: file_name.to_string(),
        });
    }

    /// Release everything: clear every page's image and verses, empty the
    /// collection, reset the selection, and dispose all cached translation
    /// handles.
    pub fn teardown(&mut self) {
        for page in &mut self.pages {
            page.image_ref = None;
            page.verses.clear();
        }
        self.pages.clear();
        self.current_index = None;
        self.loaded = false;
        self.generation += 1;
        self.registry.dispose_all();
        self.emit(ReaderEvent::TornDown);
    }

    /// The configured book range.
    pub fn book(&self) -> Book {
        self.book
    }

    /// The ordered page collection (index 0 = last page number).
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Current selection index, `None` while inactive or after teardown.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Page number the selection currently rests on.
    pub fn current_page_number(&self) -> i32 {
        self.current_page_number
    }

    /// The currently selected page, when the collection is populated.
    pub fn current_page(&self) -> Option<&Page> {
        self.current_index.and_then(|index| self.pages.get(index))
    }

    /// Whether translation text should be rendered.
    pub fn show_translation(&self) -> bool {
        self.show_translation
    }

    /// Current translation text size.
    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    /// Whether [`PageReader::initialize`] has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read access to the translation handle cache.
    pub fn registry(&self) -> &TranslationRegistry {
        &self.registry
    }
}
