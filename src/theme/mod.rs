//! Theme model and compiler.
//!
//! `spec` holds the slot model, default palette, and built-in presets;
//! `resolve` fills partial specs; `compile` emits the stylesheet artifact;
//! `config` loads optional user-defined presets.

pub mod compile;
pub mod config;
pub mod resolve;
pub mod spec;

pub use compile::{StylesheetError, compile, write_stylesheet};
pub use config::{ThemeFile, ThemeFileError};
pub use resolve::{ResolvedTheme, resolve};
pub use spec::{
    DEFAULT_PALETTE, PresetRegistry, Slot, ThemeSpec, available_themes, preset, preset_registry,
    theme_color, theme_colors,
};
