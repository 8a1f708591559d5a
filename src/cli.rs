//! Command-line interface.
//!
//! `generate` is the build step that bakes the preset palettes into the
//! stylesheet artifact; the remaining commands are inspection helpers for
//! theme authors.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use crate::memefile::{FsScanner, MemeScanner};
use crate::theme;

/// Default artifact path the UI build consumes.
pub const DEFAULT_STYLESHEET_PATH: &str = "styles/themes.css";

#[derive(Debug, Parser)]
#[command(
    name = "memeboard",
    version,
    about = "Theme compiler and state core for the memeboard meme manager"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile every preset theme into the stylesheet artifact.
    Generate {
        /// Output path of the generated stylesheet.
        #[arg(long, default_value = DEFAULT_STYLESHEET_PATH)]
        out: PathBuf,
        /// Optional TOML file of extra user themes, compiled after the
        /// built-ins.
        #[arg(long)]
        themes_file: Option<PathBuf>,
    },
    /// List the available theme names in registry order.
    Themes,
    /// Print the fully resolved color spec of one theme.
    Resolve {
        /// Theme name (built-in).
        name: String,
        /// Emit a JSON object instead of plain `key = value` lines.
        #[arg(long)]
        json: bool,
    },
    /// Scan a meme root directory and print its folder descriptors.
    Scan {
        /// The meme root directory.
        root: PathBuf,
        /// Emit JSON instead of a plain listing.
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate { out, themes_file } => generate(&out, themes_file.as_deref()),
        Command::Themes => {
            for name in theme::available_themes() {
                println!("{name}");
            }
            Ok(())
        }
        Command::Resolve { name, json } => resolve_theme(&name, json),
        Command::Scan { root, json } => scan(&root, json),
    }
}

fn generate(out: &Path, themes_file: Option<&Path>) -> anyhow::Result<()> {
    let mut registry = theme::preset_registry();
    if let Some(path) = themes_file {
        let file = theme::ThemeFile::load_from_path(path)
            .with_context(|| format!("loading user themes from `{}`", path.display()))?;
        registry.extend(file.into_entries());
    }

    let css = theme::compile(&registry);
    if let Err(err) = theme::write_stylesheet(out, &css) {
        // The one fatal path: report it and bail without an artifact.
        error!(error = %err, "stylesheet generation failed");
        return Err(err.into());
    }
    Ok(())
}

fn resolve_theme(name: &str, json: bool) -> anyhow::Result<()> {
    let spec = theme::preset(name)
        .ok_or_else(|| anyhow::anyhow!("unknown theme `{name}`; see `memeboard themes`"))?;
    let resolved = theme::resolve(&spec);

    if json {
        let map: serde_json::Map<String, serde_json::Value> = resolved
            .iter()
            .map(|(slot, value)| (slot.key().to_string(), value.into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (slot, value) in resolved.iter() {
            println!("{} = {value}", slot.key());
        }
    }
    Ok(())
}

fn scan(root: &Path, json: bool) -> anyhow::Result<()> {
    let folders = FsScanner.scan(root)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&folders)?);
    } else {
        for folder in &folders {
            println!("{} ({} images)", folder.name, folder.memes.len());
        }
    }
    Ok(())
}
