//! Store persistence.
//!
//! The surrounding application survives restarts through a string-keyed
//! key-value collaborator. [`attach`] wires one subscriber per persisted
//! field; [`hydrate`] restores the cached values on startup. Hydrate
//! before attaching, or the restore itself gets echoed back into the
//! backing file.
//!
//! Persistence failures are logged and swallowed: a broken disk must not
//! take the UI down, and the value will be rewritten on the next change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use parking_lot::Mutex;
use tracing::warn;

use super::{Field, MemeTab, StarMeme, Store};

pub const ROOT_PATH_KEY: &str = "meme-root-path";
pub const MEME_TABS_KEY: &str = "meme-all-paths";
pub const STAR_MEMES_KEY: &str = "meme-stars";
pub const THEME_KEY: &str = "meme-theme";
pub const BOT_TOKEN_KEY: &str = "meme-bot-token";
pub const PROXY_ENABLED_KEY: &str = "meme-proxy-enabled";
pub const PROXY_URL_KEY: &str = "meme-proxy-url";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read store file `{path}`: {source}")]
    ReadStore {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse store file `{path}`: {source}")]
    ParseStore {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write store file `{path}`: {source}")]
    WriteStore {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// String-keyed persistence collaborator.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// Key-value store backed by a single JSON object on disk, written through
/// on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store file, loading existing entries. A missing file is an
    /// empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|source| PersistError::ParseStore {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(PersistError::ReadStore {
                    path,
                    source,
                });
            }
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// The platform-conventional store path.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "memeboard").map(|dirs| dirs.data_dir().join("store.json"))
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PersistError::WriteStore {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = serde_json::to_string_pretty(entries).expect("string map serializes");
        fs::write(&self.path, payload).map_err(|source| PersistError::WriteStore {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}

/// Wire one persistence subscriber per persisted field.
pub fn attach(store: &Store, kv: Arc<dyn KeyValueStore>) {
    let sink = kv.clone();
    store.subscribe(Field::RootPath, move |state| {
        persist(&*sink, ROOT_PATH_KEY, &state.root_path);
    });

    let sink = kv.clone();
    store.subscribe(Field::MemeTabs, move |state| {
        persist_json(&*sink, MEME_TABS_KEY, &state.meme_tabs);
    });

    let sink = kv.clone();
    store.subscribe(Field::CurrentTheme, move |state| {
        persist(&*sink, THEME_KEY, &state.current_theme);
    });

    let sink = kv.clone();
    store.subscribe(Field::StarMemes, move |state| {
        persist_json(&*sink, STAR_MEMES_KEY, &state.star_memes);
    });

    let sink = kv.clone();
    store.subscribe(Field::BotToken, move |state| {
        persist(&*sink, BOT_TOKEN_KEY, &state.bot_token);
    });

    let sink = kv.clone();
    store.subscribe(Field::ProxyEnabled, move |state| {
        persist(&*sink, PROXY_ENABLED_KEY, &state.proxy_enabled.to_string());
    });

    let sink = kv;
    store.subscribe(Field::ProxyUrl, move |state| {
        persist(&*sink, PROXY_URL_KEY, &state.proxy_url);
    });
}

/// Restore cached values into the store. Invalid cached entries (a theme
/// name that no longer exists, undecodable JSON) are warned about and
/// skipped.
pub fn hydrate(store: &Store, kv: &dyn KeyValueStore) {
    if let Some(root_path) = kv.get(ROOT_PATH_KEY)
        && !root_path.is_empty()
    {
        store.set_root_path(root_path);
    }

    if let Some(raw) = kv.get(MEME_TABS_KEY) {
        match serde_json::from_str::<Vec<MemeTab>>(&raw) {
            Ok(tabs) if !tabs.is_empty() => {
                store.set_meme_tabs(tabs);
                // Land on the favorites tab when restoring a session.
                store.select_tab(super::STAR_TAB);
            }
            Ok(_) => {}
            Err(err) => warn!(key = MEME_TABS_KEY, error = %err, "ignoring cached value"),
        }
    }

    match kv.get(THEME_KEY) {
        Some(theme) if !theme.is_empty() => {
            // set_theme validates against the available list itself.
            store.set_theme(&theme);
        }
        _ => {}
    }

    if let Some(raw) = kv.get(STAR_MEMES_KEY) {
        match serde_json::from_str::<Vec<StarMeme>>(&raw) {
            Ok(stars) if !stars.is_empty() => {
                store.set_star_memes(stars);
            }
            Ok(_) => {}
            Err(err) => warn!(key = STAR_MEMES_KEY, error = %err, "ignoring cached value"),
        }
    }

    if let Some(token) = kv.get(BOT_TOKEN_KEY)
        && !token.is_empty()
    {
        store.set_bot_token(token);
    }

    if let Some(enabled) = kv.get(PROXY_ENABLED_KEY) {
        let enabled = enabled == "true";
        let url = kv
            .get(PROXY_URL_KEY)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| store.snapshot().proxy_url);
        store.set_proxy_settings(enabled, url);
    } else if let Some(url) = kv.get(PROXY_URL_KEY)
        && !url.is_empty()
    {
        let enabled = store.snapshot().proxy_enabled;
        store.set_proxy_settings(enabled, url);
    }
}

fn persist(kv: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = kv.set(key, value) {
        warn!(key, error = %err, "failed to persist field");
    }
}

fn persist_json<T: serde::Serialize>(kv: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(encoded) => persist(kv, key, &encoded),
        Err(err) => warn!(key, error = %err, "failed to encode field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_file_store_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let kv = JsonFileStore::open(&path).unwrap();
        assert_eq!(kv.get(THEME_KEY), None);
        kv.set(THEME_KEY, "dracula").unwrap();
        kv.set(ROOT_PATH_KEY, "/memes").unwrap();

        // Reopen and read back what was flushed.
        let kv = JsonFileStore::open(&path).unwrap();
        assert_eq!(kv.get(THEME_KEY).as_deref(), Some("dracula"));
        assert_eq!(kv.get(ROOT_PATH_KEY).as_deref(), Some("/memes"));
    }

    #[test]
    fn open_rejects_corrupt_store_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not-json").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, PersistError::ParseStore { .. }));
    }

    #[test]
    fn attach_persists_field_changes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let kv = Arc::new(JsonFileStore::open(&path).unwrap());
        let store = Store::new();
        attach(&store, kv.clone());

        store.set_theme("business");
        store.set_root_path("/memes");
        store.set_proxy_settings(true, "http://localhost:1080");
        store.star_meme("a.png", "cats");

        assert_eq!(kv.get(THEME_KEY).as_deref(), Some("business"));
        assert_eq!(kv.get(ROOT_PATH_KEY).as_deref(), Some("/memes"));
        assert_eq!(kv.get(PROXY_ENABLED_KEY).as_deref(), Some("true"));
        assert_eq!(kv.get(PROXY_URL_KEY).as_deref(), Some("http://localhost:1080"));
        let stars: Vec<StarMeme> =
            serde_json::from_str(&kv.get(STAR_MEMES_KEY).unwrap()).unwrap();
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].file_name, "a.png");
    }

    #[test]
    fn hydrate_restores_cached_state() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let kv = Arc::new(JsonFileStore::open(&path).unwrap());

        // First session: populate and persist.
        {
            let store = Store::new();
            attach(&store, kv.clone());
            store.set_root_path("/memes");
            store.set_meme_tabs(vec![MemeTab {
                name: "cats".into(),
                code: "cats".into(),
                parent_path: "/memes/cats".into(),
                icon: "a.png".into(),
                memes: vec!["a.png".into()],
                order_changed: false,
            }]);
            store.set_theme("dracula");
            store.star_meme("a.png", "cats");
            store.set_bot_token("123:abc");
            store.set_proxy_settings(true, "http://localhost:1080");
        }

        // Second session: hydrate from the same backing file.
        let store = Store::new();
        hydrate(&store, &*kv);
        let state = store.snapshot();
        assert_eq!(state.root_path, "/memes");
        assert_eq!(state.meme_tabs.len(), 1);
        assert_eq!(state.active_tab, super::super::STAR_TAB);
        assert_eq!(state.current_theme, "dracula");
        assert_eq!(state.star_memes.len(), 1);
        assert_eq!(state.bot_token, "123:abc");
        assert!(state.proxy_enabled);
        assert_eq!(state.proxy_url, "http://localhost:1080");
    }

    #[test]
    fn hydrate_ignores_invalid_cached_theme() {
        let dir = tempfile::TempDir::new().unwrap();
        let kv = JsonFileStore::open(dir.path().join("store.json")).unwrap();
        kv.set(THEME_KEY, "no-such-theme").unwrap();

        let store = Store::new();
        hydrate(&store, &kv);
        assert_eq!(store.current_theme(), super::super::DEFAULT_THEME);
    }
}
