//! Breadcrumb definition files
//!
//! Simple pages don't need Rust callbacks; they can be declared in TOML and
//! listed under `files` in the `[breadcrumbs]` config:
//!
//! ```toml
//! [[breadcrumb]]
//! name = "home"
//! title = "Home"
//! url = "/"
//!
//! [[breadcrumb]]
//! name = "posts.show"
//! title = "Post {0}"
//! url = "/posts/{0}"
//! parent = "home"
//! parent_params = []
//!
//! [breadcrumb.data]
//! icon = "file"
//! ```
//!
//! `{0}`, `{1}`, ... in `title`, `url` and `parent_params` are replaced with
//! the page's parameters. Without `parent_params` the parent receives the
//! page's own parameters.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::breadcrumb::{Breadcrumb, Params};
use crate::error::BreadcrumbError;
use crate::manager::BreadcrumbsManager;

/// Starter definitions written by `acton-breadcrumbs publish definitions`
pub const STARTER_DEFINITIONS: &str = include_str!("../stubs/breadcrumbs.toml");

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("Invalid regex"));

/// One `[[breadcrumb]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    /// Breadcrumb name, usually the route name
    pub name: String,
    /// Title template
    pub title: String,
    /// URL template; omitted for unlinked breadcrumbs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Parent breadcrumb
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Parameter templates for the parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_params: Option<Vec<String>>,
    /// Extra fields passed to the view
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl Definition {
    /// Add this definition's breadcrumbs to a trail
    fn apply(
        &self,
        trail: &mut crate::generator::Generator<'_>,
        params: &Params,
    ) -> Result<(), BreadcrumbError> {
        if let Some(parent) = &self.parent {
            let parent_params = match &self.parent_params {
                Some(templates) => templates
                    .iter()
                    .map(|template| Value::String(expand(template, params)))
                    .collect(),
                None => params.clone(),
            };
            trail.parent(parent, parent_params)?;
        }

        let mut breadcrumb =
            Breadcrumb::new(expand(&self.title, params)).with_extra(self.data.clone());
        if let Some(url) = &self.url {
            breadcrumb = breadcrumb.with_url(expand(url, params));
        }
        trail.push_breadcrumb(breadcrumb);
        Ok(())
    }
}

/// Contents of a definition file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionFile {
    /// Definitions in file order
    #[serde(rename = "breadcrumb", default)]
    pub breadcrumbs: Vec<Definition>,
}

impl DefinitionFile {
    /// Read and parse a definition file
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::FileNotFound`] if the file does not exist,
    /// [`BreadcrumbError::ReadFailed`] if it cannot be read, or
    /// [`BreadcrumbError::InvalidFile`] if it is not a valid definition file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BreadcrumbError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BreadcrumbError::FileNotFound(path.to_path_buf()));
        }

        let source = std::fs::read_to_string(path).map_err(|source| BreadcrumbError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&source, path)
    }

    /// Parse definitions; `path` is only used for error reporting
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::InvalidFile`] if the source is not a valid
    /// definition file.
    pub fn parse(source: &str, path: impl Into<PathBuf>) -> Result<Self, BreadcrumbError> {
        toml::from_str(source).map_err(|source| BreadcrumbError::InvalidFile {
            path: path.into(),
            source,
        })
    }

    /// Register every definition with the manager
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::DuplicateBreadcrumb`] if a name is already
    /// registered.
    pub fn register(self, manager: &mut BreadcrumbsManager) -> Result<(), BreadcrumbError> {
        for definition in self.breadcrumbs {
            let name = definition.name.clone();
            manager.define(name, move |trail, params| definition.apply(trail, params))?;
        }
        Ok(())
    }

    /// Names defined in this file, in file order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.breadcrumbs.iter().map(|def| def.name.as_str()).collect()
    }
}

/// Load every file listed in the manager's settings
///
/// An empty list loads nothing. When the list is just the default file and it
/// does not exist, nothing is loaded either; any other missing file is an
/// error.
///
/// # Errors
///
/// Fails like [`DefinitionFile::load`] and [`DefinitionFile::register`].
pub fn load_files(manager: &mut BreadcrumbsManager) -> Result<(), BreadcrumbError> {
    let settings = manager.settings().clone();

    if settings.uses_default_files() && settings.files.iter().all(|file| !file.exists()) {
        tracing::debug!("No breadcrumb definition file, skipping");
        return Ok(());
    }

    for file in &settings.files {
        let definitions = DefinitionFile::load(file)?;
        tracing::debug!(
            file = %file.display(),
            count = definitions.breadcrumbs.len(),
            "Loading breadcrumb definitions"
        );
        definitions.register(manager)?;
    }

    Ok(())
}

/// Replace `{n}` placeholders with the matching parameter
///
/// Missing parameters expand to an empty string.
#[must_use]
pub fn expand(template: &str, params: &Params) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let display = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.display(index));

            display.unwrap_or_else(|| {
                tracing::warn!(
                    placeholder = &caps[0],
                    template,
                    "Breadcrumb parameter missing, expanding to empty string"
                );
                String::new()
            })
        })
        .into_owned()
}
