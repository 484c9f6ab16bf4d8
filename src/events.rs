//! Typed events emitted by the page reader. The presentation layer subscribes
//! to these instead of intercepting field writes, which keeps the cascade
//! rules (show-translation fan-out, navigation-triggered loads) in one place.

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything observable about the reader's state changes.
pub enum ReaderEvent {
    /// The page collection was populated; carries the page count.
    PagesInitialized { count: usize },
    /// Navigation moved the current selection.
    CurrentPageChanged { index: usize, page_number: i32 },
    /// A page's verse list or image reference changed (load or recovery).
    PageContentChanged { index: usize },
    /// The show-translation flag was toggled and fanned out to every page.
    ShowTranslationChanged { enabled: bool },
    /// The translation text size changed and was fanned out to every page.
    TextSizeChanged { size: u32 },
    /// A different translation store became active.
    TranslationChanged { file_name: String },
    /// The collection was emptied and all cached handles were disposed.
    TornDown,
}

/// Subscriber callback invoked synchronously on the owner context.
pub type EventListener = Box<dyn FnMut(&ReaderEvent) + Send>;
