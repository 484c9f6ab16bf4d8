//! Binary entry point that glues the SQLite-backed reading engine to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we resolve the data directories, restore the persisted
//! selection, build the page collection, and drive the Ratatui event loop
//! until the user exits.
use anyhow::Context;
use scripture_reader::models::Book;
use scripture_reader::providers::{
    default_data_dir, DirectoryImageProvider, NumericChapterNames, TomlSettingsStore,
};
use scripture_reader::ui::App;
use scripture_reader::{run_app, PageReader};

/// Folder name used beneath the user's home directory for application data.
const APP_DIR_NAME: &str = ".scripture-reader";
/// Page range of the bundled book. Injected into the reader so tests (and
/// alternate books) can use smaller ranges.
const BOOK_FIRST_PAGE: i32 = 1;
const BOOK_LAST_PAGE: i32 = 604;

/// Initialize persistence, restore the reading position, and launch the
/// Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let data_dir = default_data_dir(APP_DIR_NAME)?;
    let settings = TomlSettingsStore::open(data_dir.join("settings.toml"))?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut reader = PageReader::new(
        Book::new(BOOK_FIRST_PAGE, BOOK_LAST_PAGE),
        data_dir.join("translations"),
        Box::new(settings),
        Box::new(DirectoryImageProvider::new(data_dir.join("images"))),
        Box::new(NumericChapterNames),
    );
    runtime.block_on(reader.initialize());

    let mut app = App::new(reader, runtime);
    run_app(&mut app)
}
