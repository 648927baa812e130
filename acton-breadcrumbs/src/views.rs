//! Breadcrumb views with override directory and hot reload support
//!
//! Views are minijinja templates addressed by name. The built-in views live
//! in the `breadcrumbs::` namespace:
//!
//! - `breadcrumbs::tailwind`
//! - `breadcrumbs::bootstrap5`
//! - `breadcrumbs::bulma`
//! - `breadcrumbs::json-ld`
//!
//! Views are resolved in order:
//! 1. Views added with [`BreadcrumbViews::add_view`]
//! 2. `<views_dir>/<stem>.html`, registered as `breadcrumbs::<stem>`
//! 3. The built-in views compiled into the binary
//!
//! Every view receives `breadcrumbs` (the trail) and `current_url`.
//! Output is HTML-escaped for `&`, `<`, `>`, `"` and `'`; slashes in URLs are
//! left alone.
//!
//! # Example
//!
//! ```rust
//! use acton_breadcrumbs::breadcrumb::{Breadcrumb, Trail};
//! use acton_breadcrumbs::views::BreadcrumbViews;
//!
//! # fn example() -> Result<(), acton_breadcrumbs::error::BreadcrumbError> {
//! let views = BreadcrumbViews::new(None)?;
//! let trail = Trail::from(vec![Breadcrumb::new("Home").with_url("/")]);
//!
//! let html = views.render("breadcrumbs::bootstrap5", &trail, None)?;
//! assert!(html.contains("breadcrumb-item"));
//! # Ok(())
//! # }
//! ```

use minijinja::{context, escape_formatter, AutoEscape, Environment, Error, ErrorKind, Output, State, Value};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::breadcrumb::Trail;
use crate::error::BreadcrumbError;

/// Prefix of the built-in and directory-loaded views
pub const NAMESPACE: &str = "breadcrumbs::";

/// Built-in views as `(name, source)` pairs
pub const BUILTIN_VIEWS: &[(&str, &str)] = &[
    ("breadcrumbs::tailwind", include_str!("../templates/tailwind.html")),
    ("breadcrumbs::bootstrap5", include_str!("../templates/bootstrap5.html")),
    ("breadcrumbs::bulma", include_str!("../templates/bulma.html")),
    ("breadcrumbs::json-ld", include_str!("../templates/json-ld.html")),
];

/// Write a value, escaping it as HTML text unless it is marked safe
fn html_formatter(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    if state.auto_escape() != AutoEscape::Html || value.is_safe() {
        return escape_formatter(out, state, value);
    }

    let text = value.to_string();
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }

    out.write_str(&escaped).map_err(Error::from)
}

/// Thread-safe view environment
///
/// Cloning is cheap; clones share the environment so a [`reload`](Self::reload)
/// is seen everywhere.
#[derive(Debug, Clone)]
pub struct BreadcrumbViews {
    env: Arc<RwLock<Environment<'static>>>,
    custom: Arc<RwLock<BTreeMap<String, String>>>,
    views_dir: Option<PathBuf>,
}

impl BreadcrumbViews {
    /// Load the built-in views plus any overrides in `views_dir`
    ///
    /// A missing directory is not an error; it simply has no overrides.
    ///
    /// # Errors
    ///
    /// Returns error if an override cannot be read or does not compile.
    pub fn new(views_dir: Option<PathBuf>) -> Result<Self, BreadcrumbError> {
        let custom = BTreeMap::new();
        let env = Self::create_environment(views_dir.as_deref(), &custom)?;

        Ok(Self {
            env: Arc::new(RwLock::new(env)),
            custom: Arc::new(RwLock::new(custom)),
            views_dir,
        })
    }

    fn create_environment(
        views_dir: Option<&Path>,
        custom: &BTreeMap<String, String>,
    ) -> Result<Environment<'static>, BreadcrumbError> {
        let mut env = Environment::new();

        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        // View names carry no extension, so escaping is not inferred from them
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_formatter(html_formatter);

        for &(name, source) in BUILTIN_VIEWS {
            env.add_template(name, source)?;
        }

        if let Some(dir) = views_dir {
            for (name, source) in Self::read_dir(dir)? {
                env.add_template_owned(name, source)?;
            }
        }

        for (name, source) in custom {
            env.add_template_owned(name.clone(), source.clone())?;
        }

        Ok(env)
    }

    fn read_dir(dir: &Path) -> Result<Vec<(String, String)>, BreadcrumbError> {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "No breadcrumb view overrides");
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(dir).map_err(|source| BreadcrumbError::ReadFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut views = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| BreadcrumbError::ReadFailed {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let source = std::fs::read_to_string(&path).map_err(|source| {
                BreadcrumbError::ReadFailed {
                    path: path.clone(),
                    source,
                }
            })?;

            tracing::debug!(view = %stem, path = %path.display(), "Loaded breadcrumb view override");
            views.push((format!("{NAMESPACE}{stem}"), source));
        }

        Ok(views)
    }

    /// Register a view from source
    ///
    /// Replaces any view with the same name and survives [`reload`](Self::reload).
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::Render`] if the source does not compile.
    pub fn add_view(
        &self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), BreadcrumbError> {
        let name = name.into();
        let source = source.into();

        // Held across both updates so a concurrent reload sees the new view
        let mut custom = self.custom.write();
        self.env
            .write()
            .add_template_owned(name.clone(), source.clone())?;
        custom.insert(name, source);
        Ok(())
    }

    /// Whether a view with this name is registered
    #[must_use]
    pub fn has_view(&self, name: &str) -> bool {
        self.env.read().get_template(name).is_ok()
    }

    /// Names of all registered views
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .env
            .read()
            .templates()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Render a trail with the named view
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::ViewNotFound`] for an unknown view, or
    /// [`BreadcrumbError::Render`] if rendering fails.
    pub fn render(
        &self,
        view: &str,
        trail: &Trail,
        current_url: Option<&str>,
    ) -> Result<String, BreadcrumbError> {
        let env = self.env.read();
        let template = env.get_template(view).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => BreadcrumbError::ViewNotFound(view.to_string()),
            _ => BreadcrumbError::Render(err),
        })?;

        let html = template.render(context! {
            breadcrumbs => Value::from_serialize(trail),
            current_url => current_url,
        })?;

        Ok(html.trim().to_string())
    }

    /// Reload overrides from disk
    ///
    /// Builds a new environment and swaps it in atomically.
    ///
    /// # Errors
    ///
    /// Fails like [`new`](Self::new); the current views stay in place.
    pub fn reload(&self) -> Result<(), BreadcrumbError> {
        let custom = self.custom.read();
        let new_env = Self::create_environment(self.views_dir.as_deref(), &custom)?;

        *self.env.write() = new_env;
        drop(custom);

        tracing::debug!("Breadcrumb views reloaded");
        Ok(())
    }

    /// The override directory, if configured
    #[must_use]
    pub fn views_dir(&self) -> Option<&Path> {
        self.views_dir.as_deref()
    }
}
