//! memeboard core.
//!
//! The non-view half of a desktop meme manager: contrast-aware theme color
//! derivation and stylesheet compilation (the build-time half), plus the
//! application state container, persistence wiring, folder scanning, and
//! path helpers the webview UI consumes at runtime.

pub mod cli;
pub mod color;
pub mod memefile;
pub mod paths;
pub mod store;
pub mod theme;
