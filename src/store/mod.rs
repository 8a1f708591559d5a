//! Application state container.
//!
//! An explicit observer over a fixed schema of named fields: callers
//! register interest per [`Field`] and every typed mutator notifies that
//! field's subscribers with a state snapshot. Persistence is wired as one
//! subscriber per persisted field (see [`persist`]) rather than implicit
//! reactivity. Everything is synchronous; callbacks run outside the state
//! lock with a cloned snapshot, so a callback may read the store freely but
//! sees the state as of its own notification.

pub mod persist;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::memefile::{MemeFolder, MemeScanner, ScanError};
use crate::theme;

/// Theme selected before any persisted choice is restored.
pub const DEFAULT_THEME: &str = "dark";
/// Proxy URL offered before the user configures one.
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:7890";
/// Tab code of the built-in favorites tab.
pub const STAR_TAB: &str = "meme-stars";

/// The observable fields of the state schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RootPath,
    MemeTabs,
    ActiveTab,
    StarMemes,
    CurrentTheme,
    BotToken,
    ProxyEnabled,
    ProxyUrl,
}

/// One tab of the meme browser: a scanned folder plus UI-side ordering
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeTab {
    pub name: String,
    pub code: String,
    pub parent_path: String,
    pub icon: String,
    pub memes: Vec<String>,
    #[serde(default)]
    pub order_changed: bool,
}

impl From<MemeFolder> for MemeTab {
    fn from(folder: MemeFolder) -> Self {
        Self {
            name: folder.name,
            code: folder.code,
            parent_path: folder.parent_path,
            icon: folder.icon,
            memes: folder.memes,
            order_changed: false,
        }
    }
}

/// A starred meme, newest first in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarMeme {
    pub id: String,
    pub file_name: String,
    pub from_folder: String,
    /// Unix timestamp in milliseconds.
    pub added_at: i64,
}

/// The full state snapshot handed to subscribers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub root_path: String,
    pub meme_tabs: Vec<MemeTab>,
    pub active_tab: String,
    pub tab_order_changed: bool,
    pub force_refresh_key: u64,
    pub star_memes: Vec<StarMeme>,
    pub current_theme: String,
    pub available_themes: Vec<String>,
    pub bot_token: String,
    pub proxy_enabled: bool,
    pub proxy_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            root_path: String::new(),
            meme_tabs: Vec::new(),
            active_tab: String::new(),
            tab_order_changed: false,
            force_refresh_key: 0,
            star_memes: Vec::new(),
            current_theme: DEFAULT_THEME.to_string(),
            available_themes: theme::available_themes(),
            bot_token: String::new(),
            proxy_enabled: false,
            proxy_url: DEFAULT_PROXY_URL.to_string(),
        }
    }
}

type Callback = Arc<dyn Fn(&AppState) + Send + Sync>;

/// The state container. Cheap to share behind an `Arc`.
#[derive(Default)]
pub struct Store {
    state: RwLock<AppState>,
    subscribers: RwLock<HashMap<Field, Vec<Callback>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    /// Register a callback for one field. The callback runs synchronously
    /// after every mutation of that field, outside the state lock.
    pub fn subscribe<F>(&self, field: Field, callback: F)
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .entry(field)
            .or_default()
            .push(Arc::new(callback));
    }

    /// Mutate state and notify one field's subscribers.
    fn update<R>(&self, field: Field, mutate: impl FnOnce(&mut AppState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.state.write();
            let result = mutate(&mut state);
            (result, state.clone())
        };
        self.notify(field, &snapshot);
        result
    }

    fn notify(&self, field: Field, snapshot: &AppState) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .read()
            .get(&field)
            .cloned()
            .unwrap_or_default();
        for callback in callbacks {
            callback(snapshot);
        }
    }

    // ─── Theme ───────────────────────────────────────────────────────────

    pub fn current_theme(&self) -> String {
        self.state.read().current_theme.clone()
    }

    pub fn available_themes(&self) -> Vec<String> {
        self.state.read().available_themes.clone()
    }

    /// Select a theme by name. Unknown names are warned about and ignored;
    /// the webview host applies the returned selection by setting the
    /// `data-theme` attribute on the document root.
    pub fn set_theme(&self, name: &str) -> bool {
        if !self.state.read().available_themes.iter().any(|t| t == name) {
            warn!(theme = name, "theme is not available");
            return false;
        }
        self.update(Field::CurrentTheme, |state| {
            state.current_theme = name.to_string();
        });
        true
    }

    /// The partial spec backing a theme name, defaulting to the current
    /// selection, with the `dark` preset as the final fallback.
    pub fn theme_config(&self, name: Option<&str>) -> theme::ThemeSpec {
        let current = self.current_theme();
        let target = name.unwrap_or(&current);
        theme::preset(target)
            .or_else(|| theme::preset(DEFAULT_THEME))
            .unwrap_or_default()
    }

    // ─── Meme tabs ───────────────────────────────────────────────────────

    pub fn root_path(&self) -> String {
        self.state.read().root_path.clone()
    }

    pub fn set_root_path(&self, path: impl Into<String>) {
        let path = path.into();
        self.update(Field::RootPath, |state| {
            state.root_path = path;
        });
    }

    pub fn meme_tabs(&self) -> Vec<MemeTab> {
        self.state.read().meme_tabs.clone()
    }

    pub fn set_meme_tabs(&self, tabs: Vec<MemeTab>) {
        self.update(Field::MemeTabs, |state| {
            state.meme_tabs = tabs;
        });
    }

    pub fn select_tab(&self, code: impl Into<String>) {
        let code = code.into();
        self.update(Field::ActiveTab, |state| {
            state.active_tab = code;
        });
    }

    /// Bump the refresh key so the view remounts the current tab.
    pub fn force_refresh(&self) -> u64 {
        let mut state = self.state.write();
        state.force_refresh_key += 1;
        state.force_refresh_key
    }

    /// Re-scan the root directory and replace the tab list. With no root
    /// configured this is a no-op.
    pub fn refresh_memes(&self, scanner: &dyn MemeScanner) -> Result<(), ScanError> {
        let root = self.root_path();
        if root.is_empty() {
            return Ok(());
        }
        match scanner.scan(root.as_ref()) {
            Ok(folders) => {
                self.set_meme_tabs(folders.into_iter().map(MemeTab::from).collect());
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "meme refresh failed");
                Err(err)
            }
        }
    }

    pub fn set_meme_order_changed(&self, code: &str, changed: bool) {
        self.update(Field::MemeTabs, |state| {
            if let Some(tab) = state.meme_tabs.iter_mut().find(|tab| tab.code == code) {
                tab.order_changed = changed;
            }
        });
    }

    pub fn set_tab_order_changed(&self, changed: bool) {
        // Not an observable field; no persistence or view keys off it.
        self.state.write().tab_order_changed = changed;
    }

    /// Drop cached tabs and favorites.
    pub fn clear_cache(&self) {
        self.update(Field::MemeTabs, |state| {
            state.meme_tabs.clear();
        });
        self.update(Field::StarMemes, |state| {
            state.star_memes.clear();
        });
    }

    // ─── Favorites ───────────────────────────────────────────────────────

    pub fn star_memes(&self) -> Vec<StarMeme> {
        self.state.read().star_memes.clone()
    }

    /// Replace the favorites list wholesale (used by hydration).
    pub fn set_star_memes(&self, stars: Vec<StarMeme>) {
        self.update(Field::StarMemes, |state| {
            state.star_memes = stars;
        });
    }

    /// Star a meme. Returns the new entry, or `None` when that file is
    /// already starred (the caller decides how to surface the duplicate).
    pub fn star_meme(&self, file_name: &str, from_folder: &str) -> Option<StarMeme> {
        if self
            .state
            .read()
            .star_memes
            .iter()
            .any(|item| item.file_name == file_name)
        {
            return None;
        }
        let item = StarMeme {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            from_folder: from_folder.to_string(),
            added_at: Utc::now().timestamp_millis(),
        };
        let inserted = item.clone();
        self.update(Field::StarMemes, |state| {
            state.star_memes.insert(0, item);
        });
        Some(inserted)
    }

    /// Remove a starred meme by id. Returns whether anything was removed.
    pub fn unstar_meme(&self, id: &str) -> bool {
        self.update(Field::StarMemes, |state| {
            let before = state.star_memes.len();
            state.star_memes.retain(|item| item.id != id);
            state.star_memes.len() != before
        })
    }

    // ─── Bot configuration ───────────────────────────────────────────────

    pub fn set_bot_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.update(Field::BotToken, |state| {
            state.bot_token = token;
        });
    }

    pub fn set_proxy_settings(&self, enabled: bool, url: impl Into<String>) {
        let url = url.into();
        self.update(Field::ProxyEnabled, |state| {
            state.proxy_enabled = enabled;
        });
        self.update(Field::ProxyUrl, |state| {
            state.proxy_url = url;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedScanner(Vec<MemeFolder>);

    impl MemeScanner for FixedScanner {
        fn scan(&self, _root: &Path) -> Result<Vec<MemeFolder>, ScanError> {
            Ok(self.0.clone())
        }
    }

    fn folder(name: &str) -> MemeFolder {
        MemeFolder {
            name: name.to_string(),
            code: name.to_string(),
            parent_path: format!("/memes/{name}"),
            icon: "a.png".to_string(),
            memes: vec!["a.png".to_string()],
        }
    }

    #[test]
    fn subscribers_fire_per_field_with_snapshots() {
        let store = Store::new();
        let theme_hits = Arc::new(AtomicUsize::new(0));
        let token_hits = Arc::new(AtomicUsize::new(0));

        let hits = theme_hits.clone();
        store.subscribe(Field::CurrentTheme, move |state| {
            assert_eq!(state.current_theme, "light");
            hits.fetch_add(1, Ordering::SeqCst);
        });
        let hits = token_hits.clone();
        store.subscribe(Field::BotToken, move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.set_theme("light"));
        assert_eq!(theme_hits.load(Ordering::SeqCst), 1);
        assert_eq!(token_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_theme_is_ignored() {
        let store = Store::new();
        assert!(!store.set_theme("solarized-disco"));
        assert_eq!(store.current_theme(), DEFAULT_THEME);
    }

    #[test]
    fn theme_config_falls_back_to_dark() {
        let store = Store::new();
        let config = store.theme_config(None);
        assert_eq!(config.base1.as_deref(), Some("#1d232a"));
        let light = store.theme_config(Some("light"));
        assert_eq!(light.base1.as_deref(), Some("#FFFFFF"));
    }

    #[test]
    fn refresh_replaces_tabs_from_scanner() {
        let store = Store::new();
        store.set_root_path("/memes");
        let scanner = FixedScanner(vec![folder("cats"), folder("dogs")]);
        store.refresh_memes(&scanner).unwrap();

        let tabs = store.meme_tabs();
        assert_eq!(tabs.len(), 2);
        assert!(!tabs[0].order_changed);

        store.set_meme_order_changed("cats", true);
        assert!(store.meme_tabs()[0].order_changed);
        assert!(!store.meme_tabs()[1].order_changed);
    }

    #[test]
    fn refresh_without_root_is_a_noop() {
        let store = Store::new();
        let scanner = FixedScanner(vec![folder("cats")]);
        store.refresh_memes(&scanner).unwrap();
        assert!(store.meme_tabs().is_empty());
    }

    #[test]
    fn starring_dedupes_by_file_name_and_prepends() {
        let store = Store::new();
        let first = store.star_meme("a.png", "cats").expect("starred");
        assert!(store.star_meme("a.png", "dogs").is_none());
        let second = store.star_meme("b.png", "cats").expect("starred");
        assert_ne!(first.id, second.id);

        let stars = store.star_memes();
        assert_eq!(stars.len(), 2);
        assert_eq!(stars[0].file_name, "b.png", "newest first");

        assert!(store.unstar_meme(&first.id));
        assert!(!store.unstar_meme(&first.id));
        assert_eq!(store.star_memes().len(), 1);
    }

    #[test]
    fn clear_cache_drops_tabs_and_stars() {
        let store = Store::new();
        store.set_meme_tabs(vec![folder("cats").into()]);
        store.star_meme("a.png", "cats");
        store.clear_cache();
        assert!(store.meme_tabs().is_empty());
        assert!(store.star_memes().is_empty());
    }

    #[test]
    fn proxy_settings_update_both_fields() {
        let store = Store::new();
        assert_eq!(store.snapshot().proxy_url, DEFAULT_PROXY_URL);
        store.set_proxy_settings(true, "http://localhost:1080");
        let state = store.snapshot();
        assert!(state.proxy_enabled);
        assert_eq!(state.proxy_url, "http://localhost:1080");
    }

    #[test]
    fn callbacks_may_read_the_store() {
        let store = Arc::new(Store::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let inner = store.clone();
        let hits = seen.clone();
        store.subscribe(Field::RootPath, move |_| {
            // Re-entrant reads are fine; only the snapshot is locked away.
            let _ = inner.snapshot();
            hits.fetch_add(1, Ordering::SeqCst);
        });
        store.set_root_path("/memes");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
