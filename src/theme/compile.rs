//! Stylesheet compilation.
//!
//! Maps every resolved slot through the fixed CSS custom-property table and
//! emits one `:root[data-theme=<name>]` ruleset per registry entry, one
//! line each. The surrounding application selects a theme by setting the
//! `data-theme` attribute on the document root; that attribute-name
//! contract is the only coupling between compiler and runtime.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::resolve::{ResolvedTheme, resolve};
use super::spec::{PresetRegistry, Slot};

/// Errors from the single build-time artifact write. This is the only
/// fatal path in the theme core; compilation itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum StylesheetError {
    #[error("failed to write stylesheet `{path}`: {source}")]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Compile every registry entry, in registry order, into stylesheet text.
///
/// One ruleset per line; declarations joined with `;` in slot order. An
/// empty registry compiles to empty text. A degenerate entry (nothing
/// declared) still produces a full default-palette ruleset; one bad entry
/// never blocks the rest.
pub fn compile(registry: &PresetRegistry) -> String {
    registry
        .iter()
        .map(|(name, spec)| ruleset(name, &resolve(spec)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn ruleset(name: &str, theme: &ResolvedTheme) -> String {
    let declarations = Slot::ALL
        .iter()
        .map(|slot| format!("{}: {}", slot.css_var(), theme.value(*slot)))
        .collect::<Vec<_>>()
        .join(";");
    format!(":root[data-theme={name}] {{{declarations}}}")
}

/// Write the compiled stylesheet to its artifact path.
///
/// A single, non-retried whole-file write: re-running the compiler
/// regenerates the artifact from scratch, so no partial-file or cleanup
/// logic exists.
pub fn write_stylesheet(path: &Path, css: &str) -> Result<(), StylesheetError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StylesheetError::WriteArtifact {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, css).map_err(|source| StylesheetError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), themes = css.lines().count(), "stylesheet generated");
    Ok(())
}
