//! Validate a project's breadcrumb configuration

use acton_breadcrumbs::definitions::DefinitionFile;
use acton_breadcrumbs::error::{BreadcrumbError, SolutionContext};
use acton_breadcrumbs::manager::BreadcrumbsManager;
use anyhow::Result;
use console::style;
use std::path::PathBuf;

use super::load_settings;

/// Result of a successful check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Number of registered breadcrumbs
    pub breadcrumbs: usize,
    /// Problems that do not stop the manager from booting
    pub warnings: Vec<String>,
}

/// Boot the manager from config and report misconfiguration
pub struct CheckCommand {
    config: PathBuf,
}

impl CheckCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `config` - Path to the application's `config.toml`
    #[must_use]
    pub const fn new(config: PathBuf) -> Self {
        Self { config }
    }

    /// Execute the command, printing the report
    pub fn execute(&self) -> Result<CheckReport> {
        match self.run() {
            Ok(report) => {
                for warning in &report.warnings {
                    println!("{} {warning}", style("warning:").yellow().bold());
                }
                println!(
                    "{} {} breadcrumbs registered",
                    style("✓").green().bold(),
                    report.breadcrumbs
                );
                Ok(report)
            }
            Err(err) => {
                eprintln!("{} {err:#}", style("error:").red().bold());
                Err(err)
            }
        }
    }

    /// Run the checks without printing
    pub fn run(&self) -> Result<CheckReport> {
        let settings = load_settings(&self.config)?;

        let manager = BreadcrumbsManager::from_settings(settings.clone())
            .map_err(|err| anyhow::anyhow!(explained(&err, &settings.files)))?;

        let mut warnings = Vec::new();

        match settings.view_name() {
            Some(view) if !manager.views().has_view(view) => {
                warnings.push(explained(&BreadcrumbError::ViewNotFound(view.to_string()), &settings.files));
            }
            Some(_) => {}
            None => warnings.push(explained(&BreadcrumbError::ViewNotSet, &settings.files)),
        }

        for file in &settings.files {
            let definitions = DefinitionFile::load(file)?;
            for definition in &definitions.breadcrumbs {
                if let Some(parent) = &definition.parent {
                    if !manager.exists(Some(parent)) {
                        warnings.push(format!(
                            "breadcrumb \"{}\" in {} has unknown parent \"{parent}\"",
                            definition.name,
                            file.display()
                        ));
                    }
                }
            }
        }

        Ok(CheckReport {
            breadcrumbs: manager.registry().len(),
            warnings,
        })
    }
}

fn explained(err: &BreadcrumbError, files: &[PathBuf]) -> String {
    match err.solution(&SolutionContext::new(files)) {
        Some(solution) => format!("{err}\n\n{solution}"),
        None => err.to_string(),
    }
}
