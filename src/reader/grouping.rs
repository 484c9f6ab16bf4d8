//! The verse grouping transform: raw store rows for one page become display
//! entries, with a chapter title emitted ahead of each chapter's first verse
//! on the page. Rows arrive pre-sorted by (chapter, verse) per the store's
//! query contract, so a single pass with no backtracking suffices.

use crate::models::{VerseEntry, VerseRow};
use crate::providers::ChapterNameResolver;

/// Turn one page's verse rows into display entries. Emits exactly one title
/// per chapter boundary encountered, in input order; empty input yields empty
/// output.
pub fn group_verses(rows: &[VerseRow], names: &dyn ChapterNameResolver) -> Vec<VerseEntry> {
    let mut entries = Vec::with_capacity(rows.len());
    let mut last_chapter = None;

    for row in rows {
        if last_chapter != Some(row.chapter) {
            entries.push(VerseEntry::Title {
                text: names.chapter_name(row.chapter, true),
            });
            last_chapter = Some(row.chapter);
        }
        entries.push(VerseEntry::Verse {
            chapter: row.chapter,
            number: row.number,
            text: row.text.clone(),
            source_text: None,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::NumericChapterNames;

    fn row(chapter: i32, number: i32, text: &str) -> VerseRow {
        VerseRow {
            chapter,
            number,
            text: text.to_string(),
        }
    }

    fn verse(chapter: i32, number: i32, text: &str) -> VerseEntry {
        VerseEntry::Verse {
            chapter,
            number,
            text: text.to_string(),
            source_text: None,
        }
    }

    fn title(text: &str) -> VerseEntry {
        VerseEntry::Title {
            text: text.to_string(),
        }
    }

    #[test]
    fn titles_mark_each_chapter_boundary() {
        let rows = [row(1, 1, "a"), row(1, 2, "b"), row(2, 1, "c")];
        let entries = group_verses(&rows, &NumericChapterNames);
        assert_eq!(
            entries,
            vec![
                title("Chapter 1"),
                verse(1, 1, "a"),
                verse(1, 2, "b"),
                title("Chapter 2"),
                verse(2, 1, "c"),
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(group_verses(&[], &NumericChapterNames).is_empty());
    }

    #[test]
    fn single_chapter_gets_a_single_title() {
        let rows = [row(5, 7, "x"), row(5, 8, "y")];
        let entries = group_verses(&rows, &NumericChapterNames);
        assert_eq!(entries.iter().filter(|e| e.is_title()).count(), 1);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn each_verse_appears_exactly_once() {
        // Guards against the double-append slip where a verse entry is pushed
        // twice in the success path.
        let rows = [row(1, 1, "a"), row(2, 1, "b")];
        let entries = group_verses(&rows, &NumericChapterNames);
        let verse_count = entries.iter().filter(|e| !e.is_title()).count();
        assert_eq!(verse_count, rows.len());
    }
}
