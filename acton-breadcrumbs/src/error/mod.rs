//! Error types and error handling
//!
//! Every misconfiguration has its own variant, and most of them can explain
//! how to fix themselves through [`BreadcrumbError::solution`].

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

mod solution;

pub use solution::{DocumentationLink, Solution, SolutionContext};

/// Breadcrumb error type
#[derive(Debug, Error)]
pub enum BreadcrumbError {
    /// A breadcrumb with this name has already been defined
    #[error("Breadcrumb name \"{name}\" has already been registered")]
    DuplicateBreadcrumb {
        /// The duplicated name
        name: String,
    },

    /// No breadcrumb is defined for this name (or one of its ancestors)
    #[error("Breadcrumb not found with name \"{name}\"")]
    InvalidBreadcrumb {
        /// The missing name
        name: String,
        /// Whether the name was derived from the current route
        route_bound: bool,
    },

    /// The current route has no name to look breadcrumbs up by
    #[error("The current route \"{method} {uri}\" is not named")]
    UnnamedRoute {
        /// Request method
        method: Method,
        /// Route pattern, e.g. `/posts/{id}`
        uri: String,
    },

    /// `render` was called but no default view is configured
    #[error("Breadcrumbs view not specified (check the [breadcrumbs] section of config.toml)")]
    ViewNotSet,

    /// The requested view is not registered
    #[error("Breadcrumbs view \"{0}\" not found")]
    ViewNotFound(String),

    /// A configured breadcrumb file is missing
    #[error("The breadcrumb file \"{}\" does not exist.", .0.display())]
    FileNotFound(PathBuf),

    /// A breadcrumb file or view override could not be read
    #[error("failed to read '{}': {source}", .path.display())]
    ReadFailed {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A breadcrumb file is not valid TOML or has the wrong shape
    #[error("invalid breadcrumb file '{}': {source}", .path.display())]
    InvalidFile {
        /// Offending file
        path: PathBuf,
        /// Parse error
        #[source]
        source: toml::de::Error,
    },

    /// A callback parameter is missing or has the wrong type
    #[error("breadcrumb parameter {index} is invalid: {reason}")]
    InvalidParameter {
        /// Position of the parameter
        index: usize,
        /// What went wrong
        reason: String,
    },

    /// Parent calls nested deeper than the generator allows
    #[error("breadcrumb \"{name}\" exceeded the maximum parent depth of {limit}")]
    RecursionLimit {
        /// Name being called when the limit was hit
        name: String,
        /// The depth limit
        limit: usize,
    },

    /// View rendering failed
    #[error("breadcrumb view render error: {0}")]
    Render(#[from] minijinja::Error),
}

impl BreadcrumbError {
    /// Unknown, explicitly named breadcrumb
    pub fn invalid(name: impl Into<String>) -> Self {
        Self::InvalidBreadcrumb {
            name: name.into(),
            route_bound: false,
        }
    }

    /// Whether this is an unknown-name error raised for a route-bound lookup
    #[must_use]
    pub const fn is_route_bound(&self) -> bool {
        matches!(self, Self::InvalidBreadcrumb { route_bound: true, .. })
    }

    /// Mark an unknown-name error as coming from the current route
    #[must_use]
    pub fn into_route_bound(self) -> Self {
        match self {
            Self::InvalidBreadcrumb { name, .. } => Self::InvalidBreadcrumb {
                name,
                route_bound: true,
            },
            other => other,
        }
    }
}

impl IntoResponse for BreadcrumbError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Breadcrumb rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Breadcrumb rendering failed").into_response()
    }
}
