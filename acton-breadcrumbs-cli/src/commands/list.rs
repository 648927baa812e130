//! List registered breadcrumbs and views

use acton_breadcrumbs::manager::BreadcrumbsManager;
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

use super::load_settings;

/// Print the breadcrumbs and views a project would boot with
pub struct ListCommand {
    config: PathBuf,
}

/// Everything a project registers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Breadcrumb names, sorted
    pub breadcrumbs: Vec<String>,
    /// View names, sorted
    pub views: Vec<String>,
    /// The configured default view
    pub default_view: Option<String>,
}

impl ListCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(config: PathBuf) -> Self {
        Self { config }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<Listing> {
        let listing = self.run()?;

        println!("{}", style("Breadcrumbs:").bold());
        if listing.breadcrumbs.is_empty() {
            println!("  {}", style("(none)").dim());
        }
        for name in &listing.breadcrumbs {
            println!("  {}", style(name).cyan());
        }

        println!();
        println!("{}", style("Views:").bold());
        for view in &listing.views {
            let marker = if listing.default_view.as_deref() == Some(view.as_str()) {
                style(" (default)").green().to_string()
            } else {
                String::new()
            };
            println!("  {}{marker}", style(view).cyan());
        }

        Ok(listing)
    }

    /// Collect the listing without printing
    pub fn run(&self) -> Result<Listing> {
        let settings = load_settings(&self.config)?;
        let manager = BreadcrumbsManager::from_settings(settings)
            .context("Failed to load breadcrumbs")?;

        Ok(Listing {
            breadcrumbs: manager
                .registry()
                .names()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            views: manager.views().names(),
            default_view: manager.settings().view_name().map(ToString::to_string),
        })
    }
}
