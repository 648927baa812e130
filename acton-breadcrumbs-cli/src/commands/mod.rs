//! CLI command implementations

pub mod check;
pub mod list;
pub mod publish;

pub use check::{CheckCommand, CheckReport};
pub use list::{ListCommand, Listing};
pub use publish::{PublishCommand, PublishTarget};

use acton_breadcrumbs::config::{BreadcrumbSettings, BreadcrumbsConfig, DEFAULT_DEFINITIONS_FILE};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load the `[breadcrumbs]` settings from a config file
///
/// Relative paths in the settings are resolved against the config file's
/// directory, so commands behave the same from any working directory.
pub(crate) fn load_settings(config: &Path) -> Result<BreadcrumbSettings> {
    let loaded = BreadcrumbsConfig::load_from(config)
        .with_context(|| format!("Failed to load {}", config.display()))?;
    let root = project_root(config);

    Ok(resolve_paths(loaded.breadcrumbs, &root))
}

fn project_root(config: &Path) -> PathBuf {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn resolve_paths(mut settings: BreadcrumbSettings, root: &Path) -> BreadcrumbSettings {
    // The default file is optional; keep it optional after resolving it
    if settings.uses_default_files() && !root.join(DEFAULT_DEFINITIONS_FILE).exists() {
        settings.files.clear();
    }

    settings.files = settings
        .files
        .into_iter()
        .map(|file| if file.is_relative() { root.join(file) } else { file })
        .collect();
    settings.views_dir = settings
        .views_dir
        .map(|dir| if dir.is_relative() { root.join(dir) } else { dir });
    settings
}
