//! Meme folder scanning.
//!
//! A meme root directory is a flat layout: one subdirectory per meme pack,
//! each holding image files. Scanning walks exactly one level deep and
//! produces a descriptor per subdirectory that contains at least one image;
//! imageless folders are skipped. The store consumes the [`MemeScanner`]
//! trait, not the filesystem implementation, so tests and the webview host
//! can substitute their own source of folders.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use walkdir::WalkDir;

/// Recognized image file extensions, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// One meme pack: a subdirectory of the root with its image inventory.
/// Field names serialize in the wire form the UI layer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeFolder {
    /// Display name (the directory name).
    pub name: String,
    /// Stable tab identifier (also the directory name).
    pub code: String,
    /// Full path of the pack directory.
    pub parent_path: String,
    /// File name of the pack's icon: its first image.
    pub icon: String,
    /// Image file names within the pack.
    pub memes: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read meme root `{path}`: {source}")]
    ReadRoot {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Source of meme folder descriptors for a root path.
pub trait MemeScanner: Send + Sync {
    fn scan(&self, root: &Path) -> Result<Vec<MemeFolder>, ScanError>;
}

/// Filesystem-backed scanner.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsScanner;

impl MemeScanner for FsScanner {
    fn scan(&self, root: &Path) -> Result<Vec<MemeFolder>, ScanError> {
        // Surface an unreadable root as the scan error; everything below is
        // recovered per-entry.
        std::fs::read_dir(root).map_err(|source| ScanError::ReadRoot {
            path: root.to_path_buf(),
            source,
        })?;

        let mut folders = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir_name = entry.file_name().to_string_lossy().to_string();
            let dir_path = entry.path();
            let memes = list_images(dir_path);
            let Some(icon) = memes.first().cloned() else {
                continue;
            };

            folders.push(MemeFolder {
                name: dir_name.clone(),
                code: dir_name,
                parent_path: dir_path.to_string_lossy().to_string(),
                icon,
                memes,
            });
        }
        Ok(folders)
    }
}

/// Image file names directly inside `dir`, in name order. An unreadable
/// directory yields an empty list (and the folder gets skipped upstream).
fn list_images(dir: &Path) -> Vec<String> {
    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable file");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        if is_image_file(&file_name) {
            images.push(file_name);
        }
    }
    images
}

/// Whether a file name carries a recognized image extension.
pub fn is_image_file(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}
