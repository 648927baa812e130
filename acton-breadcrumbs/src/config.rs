//! Configuration management for acton-breadcrumbs
//!
//! Breadcrumb settings live in the `[breadcrumbs]` table of the application's
//! `config.toml`. Configuration is loaded from multiple sources with clear
//! precedence:
//!
//! 1. Environment variables (highest priority, `ACTON_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/acton-breadcrumbs/{service}/config.toml` (user config, XDG)
//! 4. `/etc/acton-breadcrumbs/{service}/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Example: `ACTON_BREADCRUMBS__VIEW=breadcrumbs::bulma`
//!
//! # Example Configuration
//!
//! ```toml
//! [breadcrumbs]
//! view = "breadcrumbs::tailwind"
//! files = ["config/breadcrumbs.toml"]
//! views_dir = "templates/vendor/breadcrumbs"
//! unnamed_route_error = true
//! missing_route_bound_breadcrumb_error = true
//! invalid_named_breadcrumb_error = true
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Definition file loaded when `files` is not configured
pub const DEFAULT_DEFINITIONS_FILE: &str = "config/breadcrumbs.toml";

/// Directory searched for view overrides when `views_dir` is not configured
pub const DEFAULT_VIEWS_DIR: &str = "templates/vendor/breadcrumbs";

/// Breadcrumb settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbSettings {
    /// View used by `render`; `None` or `""` makes `render` fail
    pub view: Option<String>,

    /// Breadcrumb definition files loaded at boot
    pub files: Vec<PathBuf>,

    /// Directory of `*.html` view overrides
    pub views_dir: Option<PathBuf>,

    /// Fail when the current route has no name (otherwise render nothing)
    pub unnamed_route_error: bool,

    /// Fail when the current route's name has no breadcrumb
    pub missing_route_bound_breadcrumb_error: bool,

    /// Fail when an explicitly named breadcrumb does not exist
    pub invalid_named_breadcrumb_error: bool,
}

impl Default for BreadcrumbSettings {
    fn default() -> Self {
        Self {
            view: Some("breadcrumbs::tailwind".to_string()),
            files: vec![PathBuf::from(DEFAULT_DEFINITIONS_FILE)],
            views_dir: Some(PathBuf::from(DEFAULT_VIEWS_DIR)),
            unnamed_route_error: true,
            missing_route_bound_breadcrumb_error: true,
            invalid_named_breadcrumb_error: true,
        }
    }
}

impl BreadcrumbSettings {
    /// Settings that never fail on unknown names or unnamed routes
    ///
    /// Useful for applications where only some pages have breadcrumbs.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            unnamed_route_error: false,
            missing_route_bound_breadcrumb_error: false,
            invalid_named_breadcrumb_error: false,
            ..Self::default()
        }
    }

    /// The configured view, treating a blank name as no view
    ///
    /// TOML has no null, so `view = ""` is how a config file unsets it.
    #[must_use]
    pub fn view_name(&self) -> Option<&str> {
        self.view.as_deref().filter(|view| !view.trim().is_empty())
    }

    /// Whether `files` is still the single default definition file
    #[must_use]
    pub fn uses_default_files(&self) -> bool {
        matches!(self.files.as_slice(), [file] if file == Path::new(DEFAULT_DEFINITIONS_FILE))
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbsConfig {
    /// Breadcrumb settings
    #[serde(default)]
    pub breadcrumbs: BreadcrumbSettings,
}

impl BreadcrumbsConfig {
    /// Load configuration for a specific service
    ///
    /// # Errors
    ///
    /// Returns error if a configuration file exists but cannot be parsed, or
    /// an environment variable has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use acton_breadcrumbs::config::BreadcrumbsConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = BreadcrumbsConfig::load_for_service("my-app")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_for_service(service_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 5. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 4. System config: /etc/acton-breadcrumbs/{service_name}/config.toml
        let system_config = PathBuf::from("/etc/acton-breadcrumbs")
            .join(service_name)
            .join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        // 3. User config: ~/.config/acton-breadcrumbs/{service_name}/config.toml
        if let Some(user_config) = Self::recommended_path(service_name) {
            if user_config.exists() {
                figment = figment.merge(Toml::file(&user_config));
            }
        }

        // 2. Local config: ./config.toml
        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // 1. Environment variables (highest priority, double underscore for nesting)
        figment = figment.merge(Env::prefixed("ACTON_").split("__").lowercase(true));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file yields the defaults (plus environment overrides).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("ACTON_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// XDG config path for a service
    ///
    /// `$XDG_CONFIG_HOME/acton-breadcrumbs/{service}/config.toml`, falling back
    /// to `~/.config`.
    #[must_use]
    pub fn recommended_path(service_name: &str) -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir)?;
        Some(
            base.join("acton-breadcrumbs")
                .join(service_name)
                .join("config.toml"),
        )
    }

    /// The default configuration as a `config.toml` fragment
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Self::default())
    }
}
