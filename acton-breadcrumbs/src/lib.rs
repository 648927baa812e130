//! acton-breadcrumbs: Breadcrumb trails for axum and HTMX applications
//!
//! Pages register a callback (or a TOML definition) that builds their
//! breadcrumbs, usually by asking for their parent's breadcrumbs first. A
//! trail is then generated for a page by name, or for whatever route is
//! serving the request, and rendered with one of the built-in views or your
//! own.
//!
//! # Design Principles
//!
//! 1. **Convention Over Configuration**: breadcrumb names follow route names
//! 2. **Fail Loudly in Development**: misconfiguration errors come with a
//!    suggested fix ([`error::Solution`]), and can be relaxed per setting
//! 3. **Boot Once, Clone Per Request**: the registry and views are shared
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use acton_breadcrumbs::prelude::*;
//! use axum::{response::Html, routing::get, Router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     acton_breadcrumbs::observability::init()?;
//!
//!     let config = BreadcrumbsConfig::load_for_service("my-app")?;
//!     let mut breadcrumbs = BreadcrumbsManager::from_settings(config.breadcrumbs)?;
//!
//!     breadcrumbs.define("home", |trail, _| {
//!         trail.push("Home", "/");
//!         Ok(())
//!     })?;
//!     breadcrumbs.name_route("/", "home");
//!
//!     let app = Router::new()
//!         .route("/", get(index))
//!         .with_state(breadcrumbs);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//!
//! async fn index(breadcrumbs: Breadcrumbs) -> Result<Html<String>, BreadcrumbError> {
//!     Ok(Html(breadcrumbs.render(None, ())?))
//! }
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml
#![allow(clippy::module_name_repetitions)]

pub mod breadcrumb;
pub mod config;
pub mod definitions;
pub mod error;
pub mod extract;
pub mod generator;
pub mod manager;
pub mod observability;
pub mod registry;
pub mod route;
pub mod views;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use acton_breadcrumbs::prelude::*;
    //! ```

    pub use crate::breadcrumb::{Breadcrumb, Params, Trail};
    pub use crate::config::{BreadcrumbSettings, BreadcrumbsConfig};
    pub use crate::definitions::DefinitionFile;
    pub use crate::error::{BreadcrumbError, Solution};
    pub use crate::extract::Breadcrumbs;
    pub use crate::generator::{DefaultGenerator, Generator, TrailGenerator};
    pub use crate::manager::BreadcrumbsManager;
    pub use crate::route::{CurrentRoute, RouteNames, RouteResolver};
    pub use crate::views::BreadcrumbViews;

    pub use crate::params;
}
