//! Domain models shared between the translation stores, the page reader, and
//! the presentation layer. The intent is that these types stay light-weight
//! data holders so other layers can focus on caching, loading, and rendering
//! logic. Keeping the commentary here means later refactors can reconstruct
//! the assumptions even if other context is lost.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The fixed page range of the book being read. Injected at construction so
/// tests can run against a handful of pages instead of the full range.
pub struct Book {
    /// First (lowest) page number in the book, inclusive.
    pub first_page: i32,
    /// Last (highest) page number in the book, inclusive.
    pub last_page: i32,
}

impl Book {
    /// Build a book spanning `[first_page, last_page]` inclusive.
    pub fn new(first_page: i32, last_page: i32) -> Self {
        debug_assert!(first_page <= last_page);
        Self {
            first_page,
            last_page,
        }
    }

    /// Total number of pages in the range.
    pub fn page_count(&self) -> usize {
        (self.last_page - self.first_page + 1) as usize
    }

    /// Map a page number to its index in the page collection. The collection
    /// is ordered by descending page number, so index 0 holds the last page.
    /// Returns `None` for page numbers outside the book range.
    pub fn index_from_page_number(&self, page_number: i32) -> Option<usize> {
        if page_number < self.first_page || page_number > self.last_page {
            None
        } else {
            Some((self.last_page - page_number) as usize)
        }
    }

    /// Inverse of [`Book::index_from_page_number`].
    pub fn page_number_from_index(&self, index: usize) -> Option<i32> {
        if index >= self.page_count() {
            None
        } else {
            Some(self.last_page - index as i32)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A raw verse row as returned by a translation store, before grouping. The
/// store's query contract guarantees rows arrive sorted by (chapter, number).
pub struct VerseRow {
    /// Chapter the verse belongs to.
    pub chapter: i32,
    /// Verse number within the chapter.
    pub number: i32,
    /// Translated verse text.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single display entry in a page's verse list. Titles are interleaved by
/// the grouping transform so a chapter's title immediately precedes its first
/// verse on the page. Entries are immutable once built.
pub enum VerseEntry {
    /// Chapter heading shown before the chapter's first verse on the page.
    Title {
        /// Resolved chapter display name.
        text: String,
    },
    /// A verse body. The error-recovery placeholder reuses this variant with
    /// chapter and number zero to carry the diagnostic detail text.
    Verse {
        /// Chapter number, or 0 for placeholder detail entries.
        chapter: i32,
        /// Verse number within the chapter, or 0 for placeholder entries.
        number: i32,
        /// Translated text (or the raw failure message for placeholders).
        text: String,
        /// Original-language rendering of the verse, when available.
        source_text: Option<String>,
    },
}

impl VerseEntry {
    /// Whether this entry is a chapter heading rather than a verse body.
    pub fn is_title(&self) -> bool {
        matches!(self, VerseEntry::Title { .. })
    }
}

#[derive(Debug, Clone)]
/// One page of the book as held by the page collection. Exclusively owned by
/// the collection manager; the image reference and verse list are cleared when
/// the page is cleaned up or the collection is torn down.
pub struct Page {
    /// Page number within the book range.
    pub page_number: i32,
    /// Resolved page image, if the image provider found one.
    pub image_ref: Option<PathBuf>,
    /// Display entries produced by the grouping transform (or the two-entry
    /// error placeholder after a failed load).
    pub verses: Vec<VerseEntry>,
    /// Whether the presentation layer should render the translation text.
    pub show_translation: bool,
    /// Translation text size preference, fanned out from the reader.
    pub text_size: u32,
}

impl Page {
    /// Create an empty, not-yet-loaded page.
    pub fn new(page_number: i32, show_translation: bool, text_size: u32) -> Self {
        Self {
            page_number,
            image_ref: None,
            verses: Vec::new(),
            show_translation,
            text_size,
        }
    }

    /// File name used to look the page's image up in the image provider.
    pub fn image_file_name(&self) -> String {
        page_file_name(self.page_number)
    }
}

/// Canonical image file name for a page number.
pub fn page_file_name(page_number: i32) -> String {
    format!("page{page_number:03}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_page_number_round_trip() {
        let book = Book::new(1, 604);
        for page in book.first_page..=book.last_page {
            let index = book.index_from_page_number(page).unwrap();
            assert_eq!(book.page_number_from_index(index), Some(page));
        }
    }

    #[test]
    fn index_zero_is_the_last_page() {
        let book = Book::new(1, 10);
        assert_eq!(book.index_from_page_number(10), Some(0));
        assert_eq!(book.index_from_page_number(1), Some(9));
        assert_eq!(book.page_count(), 10);
    }

    #[test]
    fn out_of_range_pages_map_to_none() {
        let book = Book::new(3, 7);
        assert_eq!(book.index_from_page_number(2), None);
        assert_eq!(book.index_from_page_number(8), None);
        assert_eq!(book.page_number_from_index(5), None);
    }

    #[test]
    fn page_image_file_name_is_zero_padded() {
        assert_eq!(page_file_name(7), "page007.png");
        assert_eq!(page_file_name(604), "page604.png");
    }
}
