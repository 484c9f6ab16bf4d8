//! External collaborators the reader consumes: the settings store, the page
//! image provider, and the chapter-name resolver. Each is a trait so the
//! tests can swap in-memory fakes, plus a default implementation wired to the
//! local filesystem the same way the rest of the app resolves its data paths.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;

/// Preference keys shared between the reader and the settings store.
pub mod keys {
    /// File name of the active translation store.
    pub const ACTIVE_TRANSLATION: &str = "active_translation";
    /// Whether translation text is rendered alongside the page image.
    pub const SHOW_TRANSLATION: &str = "show_translation";
    /// Translation text size preference.
    pub const TRANSLATION_TEXT_SIZE: &str = "translation_text_size";
    /// Last page the user was viewing, restored on the next launch.
    pub const LAST_PAGE: &str = "last_page";
}

/// Key-value persistence for user preferences. Setters are write-through;
/// implementations must never fail a read (absent keys are `None`).
pub trait SettingsStore {
    /// Read an integer preference.
    fn get_int(&self, key: &str) -> Option<i64>;
    /// Write an integer preference.
    fn set_int(&mut self, key: &str, value: i64);
    /// Read a boolean preference.
    fn get_bool(&self, key: &str) -> Option<bool>;
    /// Write a boolean preference.
    fn set_bool(&mut self, key: &str, value: bool);
    /// Read a string preference.
    fn get_string(&self, key: &str) -> Option<String>;
    /// Write a string preference.
    fn set_string(&mut self, key: &str, value: &str);
}

/// Settings store backed by a TOML file. Values are kept in memory and
/// written through on every set; a failed write is logged and swallowed so a
/// read-only disk never takes the reader down with it.
pub struct TomlSettingsStore {
    path: PathBuf,
    values: toml::Table,
}

impl TomlSettingsStore {
    /// Open (or create) the settings file at `path`. A file that fails to
    /// parse is treated as empty rather than erroring, so a corrupted
    /// settings file cannot brick startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create settings directory")?;
        }

        let values = match fs::read_to_string(&path) {
            Ok(raw) => raw.parse::<toml::Table>().unwrap_or_else(|err| {
                warn!("settings file {} unreadable: {err}", path.display());
                toml::Table::new()
            }),
            Err(_) => toml::Table::new(),
        };

        Ok(Self { path, values })
    }

    fn write_through(&self) {
        match toml::to_string(&self.values) {
            Ok(raw) => {
                if let Err(err) = fs::write(&self.path, raw) {
                    warn!("failed to persist settings to {}: {err}", self.path.display());
                }
            }
            Err(err) => warn!("failed to serialize settings: {err}"),
        }
    }

    fn set_value(&mut self, key: &str, value: toml::Value) {
        self.values.insert(key.to_string(), value);
        self.write_through();
    }
}

impl SettingsStore for TomlSettingsStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(toml::Value::as_integer)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set_value(key, toml::Value::Integer(value));
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(toml::Value::as_bool)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set_value(key, toml::Value::Boolean(value));
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(toml::Value::as_str)
            .map(str::to_string)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.set_value(key, toml::Value::String(value.to_string()));
    }
}

/// In-memory settings store for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    ints: BTreeMap<String, i64>,
    bools: BTreeMap<String, bool>,
    strings: BTreeMap<String, String>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.ints.insert(key.to_string(), value);
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.bools.get(key).copied()
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.bools.insert(key.to_string(), value);
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }
}

/// Resolves a page file name to an image reference. Lookup failures are a
/// normal condition (the page simply has no image yet), never an error.
pub trait ImageProvider {
    /// Resolve `file_name` to an on-disk image, or `None` if absent.
    fn page_image(&self, file_name: &str) -> Option<PathBuf>;
}

/// Image provider that serves pre-downloaded page images out of a directory.
pub struct DirectoryImageProvider {
    dir: PathBuf,
}

impl DirectoryImageProvider {
    /// Serve images from `dir`. The directory does not have to exist; every
    /// lookup will simply miss until it does.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageProvider for DirectoryImageProvider {
    fn page_image(&self, file_name: &str) -> Option<PathBuf> {
        let path = self.dir.join(file_name);
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }
}

/// Resolves chapter numbers to display names for the grouping transform.
pub trait ChapterNameResolver {
    /// Display name for `chapter`; `full` selects the long form.
    fn chapter_name(&self, chapter: i32, full: bool) -> String;
}

/// Fallback resolver that renders plain numeric chapter names. Deployments
/// with localized chapter-name tables supply their own resolver.
#[derive(Debug, Default)]
pub struct NumericChapterNames;

impl ChapterNameResolver for NumericChapterNames {
    fn chapter_name(&self, chapter: i32, full: bool) -> String {
        if full {
            format!("Chapter {chapter}")
        } else {
            format!("Ch. {chapter}")
        }
    }
}

/// Resolve the default application data directory under the user's home.
pub fn default_data_dir(app_dir_name: &str) -> Result<PathBuf> {
    let base_dirs = directories::BaseDirs::new()
        .context("could not locate home directory")?;
    Ok(base_dirs.home_dir().join(app_dir_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_store_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = TomlSettingsStore::open(&path).unwrap();
        store.set_int(keys::LAST_PAGE, 42);
        store.set_bool(keys::SHOW_TRANSLATION, true);
        store.set_string(keys::ACTIVE_TRANSLATION, "english.db");

        // Reopen to prove the write-through actually hit the disk.
        let reopened = TomlSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get_int(keys::LAST_PAGE), Some(42));
        assert_eq!(reopened.get_bool(keys::SHOW_TRANSLATION), Some(true));
        assert_eq!(
            reopened.get_string(keys::ACTIVE_TRANSLATION),
            Some("english.db".to_string())
        );
        assert_eq!(reopened.get_int("unknown"), None);
    }

    #[test]
    fn corrupt_settings_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not [ valid toml").unwrap();

        let store = TomlSettingsStore::open(&path).unwrap();
        assert_eq!(store.get_int(keys::LAST_PAGE), None);
    }

    #[test]
    fn directory_image_provider_misses_absent_files() {
        let dir = tempfile::tempdir().unwrap();
        let provider = DirectoryImageProvider::new(dir.path());
        assert_eq!(provider.page_image("page001.png"), None);

        fs::write(dir.path().join("page001.png"), b"png").unwrap();
        assert!(provider.page_image("page001.png").is_some());
    }

    #[test]
    fn numeric_chapter_names_have_long_and_short_forms() {
        let names = NumericChapterNames;
        assert_eq!(names.chapter_name(2, true), "Chapter 2");
        assert_eq!(names.chapter_name(2, false), "Ch. 2");
    }
}
