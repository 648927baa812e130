//! Publish config, views and starter definitions into a project

use acton_breadcrumbs::config::{
    BreadcrumbSettings, DEFAULT_DEFINITIONS_FILE, DEFAULT_VIEWS_DIR,
};
use acton_breadcrumbs::definitions::STARTER_DEFINITIONS;
use acton_breadcrumbs::views::{BUILTIN_VIEWS, NAMESPACE};
use anyhow::{Context, Result};
use console::{style, Term};
use dialoguer::Confirm;
use std::fs;
use std::path::{Path, PathBuf};

/// What to publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PublishTarget {
    /// The `[breadcrumbs]` section of `config.toml`
    Config,
    /// The built-in views, for customization
    Views,
    /// A starter breadcrumb definition file
    Definitions,
}

/// Outcome for one published file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Published {
    /// File written
    Written(PathBuf),
    /// File left untouched because it already existed
    Skipped(PathBuf),
}

/// Copy package files into the project
pub struct PublishCommand {
    target: PublishTarget,
    root: PathBuf,
    force: bool,
}

impl PublishCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `target` - What to publish
    /// * `root` - Project directory
    /// * `force` - Overwrite existing files without asking
    #[must_use]
    pub const fn new(target: PublishTarget, root: PathBuf, force: bool) -> Self {
        Self {
            target,
            root,
            force,
        }
    }

    /// Execute the command
    ///
    /// Existing files are only overwritten with `--force`, or after
    /// confirmation when running in a terminal.
    pub fn execute(&self) -> Result<Vec<Published>> {
        let interactive = Term::stdout().is_term();

        let results = self.publish(|path| {
            if !interactive {
                return Ok(false);
            }
            Confirm::new()
                .with_prompt(format!("{} already exists. Overwrite?", path.display()))
                .default(false)
                .interact()
                .context("Failed to read confirmation")
        })?;

        for result in &results {
            match result {
                Published::Written(path) => {
                    println!("{} {}", style("Published").green().bold(), path.display());
                }
                Published::Skipped(path) => println!(
                    "{} {} (already exists, use --force to overwrite)",
                    style("Skipped").yellow().bold(),
                    path.display()
                ),
            }
        }

        Ok(results)
    }

    /// Publish, asking `confirm` before overwriting an existing file
    pub fn publish(&self, mut confirm: impl FnMut(&Path) -> Result<bool>) -> Result<Vec<Published>> {
        match self.target {
            PublishTarget::Config => Ok(vec![self.publish_config(&mut confirm)?]),
            PublishTarget::Views => {
                let dir = self.root.join(DEFAULT_VIEWS_DIR);
                BUILTIN_VIEWS
                    .iter()
                    .map(|(name, source)| {
                        let stem = name.strip_prefix(NAMESPACE).unwrap_or(name);
                        let path = dir.join(format!("{stem}.html"));
                        self.write(&path, source, &mut confirm)
                    })
                    .collect()
            }
            PublishTarget::Definitions => {
                let path = self.root.join(DEFAULT_DEFINITIONS_FILE);
                Ok(vec![self.write(&path, STARTER_DEFINITIONS, &mut confirm)?])
            }
        }
    }

    /// Add the `[breadcrumbs]` section to `config.toml`, keeping other sections
    fn publish_config(&self, confirm: &mut impl FnMut(&Path) -> Result<bool>) -> Result<Published> {
        let path = self.root.join("config.toml");

        let mut table = if path.exists() {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            source
                .parse::<toml::Table>()
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            toml::Table::new()
        };

        if table.contains_key("breadcrumbs") && !self.force && !confirm(&path)? {
            return Ok(Published::Skipped(path));
        }

        table.insert(
            "breadcrumbs".to_string(),
            toml::Value::try_from(BreadcrumbSettings::default())
                .context("Failed to serialize default settings")?,
        );

        let source = toml::to_string_pretty(&table).context("Failed to serialize config")?;
        fs::write(&path, source).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(Published::Written(path))
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
        confirm: &mut impl FnMut(&Path) -> Result<bool>,
    ) -> Result<Published> {
        if path.exists() && !self.force && !confirm(path)? {
            return Ok(Published::Skipped(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(Published::Written(path.to_path_buf()))
    }
}
