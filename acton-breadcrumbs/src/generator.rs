//! Breadcrumb generation
//!
//! A [`Generator`] is handed to every breadcrumb callback. Callbacks call
//! [`Generator::parent`] to emit their ancestors first and then push their own
//! records, so the finished [`Trail`] reads from the root down.
//!
//! # Examples
//!
//! ```rust
//! use acton_breadcrumbs::generator::{DefaultGenerator, TrailGenerator};
//! use acton_breadcrumbs::registry::Registry;
//! use acton_breadcrumbs::params;
//!
//! # fn example() -> Result<(), acton_breadcrumbs::error::BreadcrumbError> {
//! let mut registry = Registry::new();
//! registry.define("home", |trail, _| {
//!     trail.push("Home", "/");
//!     Ok(())
//! })?;
//! registry.define("post", |trail, params| {
//!     trail.parent("home", ())?;
//!     let id: u64 = params.parse(0)?;
//!     trail.push(format!("Post {id}"), format!("/posts/{id}"));
//!     Ok(())
//! })?;
//!
//! let trail = DefaultGenerator.generate(&registry, "post", &params![7], None)?;
//! assert_eq!(trail.titles(), vec!["Home", "Post 7"]);
//! # Ok(())
//! # }
//! ```

use crate::breadcrumb::{Breadcrumb, Params, Trail};
use crate::error::BreadcrumbError;
use crate::registry::Registry;
use crate::route::CurrentRoute;

/// Deepest parent chain a trail may have
pub const MAX_DEPTH: usize = 64;

/// Accumulates one trail while callbacks run
pub struct Generator<'r> {
    registry: &'r Registry,
    route: Option<&'r CurrentRoute>,
    trail: Trail,
    depth: usize,
}

impl<'r> Generator<'r> {
    /// Start an empty trail over `registry`
    #[must_use]
    pub const fn new(registry: &'r Registry) -> Self {
        Self::for_route(registry, None)
    }

    /// Start an empty trail for a request served by `route`
    #[must_use]
    pub const fn for_route(registry: &'r Registry, route: Option<&'r CurrentRoute>) -> Self {
        Self {
            registry,
            route,
            trail: Trail::new(),
            depth: 0,
        }
    }

    /// The route serving the request, if generating inside one
    ///
    /// Hooks use this to add breadcrumbs from request data, such as a
    /// `?page=` query parameter.
    #[must_use]
    pub const fn route(&self) -> Option<&'r CurrentRoute> {
        self.route
    }

    /// Run the callback registered for `name`
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::InvalidBreadcrumb`] if nothing is registered
    /// under `name`, [`BreadcrumbError::RecursionLimit`] if parent calls nest
    /// deeper than [`MAX_DEPTH`], or whatever the callback returns.
    pub fn call(&mut self, name: &str, params: &Params) -> Result<(), BreadcrumbError> {
        let registry = self.registry;
        let callback = registry
            .callback(name)
            .ok_or_else(|| BreadcrumbError::invalid(name))?;

        if self.depth >= MAX_DEPTH {
            return Err(BreadcrumbError::RecursionLimit {
                name: name.to_string(),
                limit: MAX_DEPTH,
            });
        }

        self.depth += 1;
        let result = callback(self, params);
        self.depth -= 1;
        result
    }

    /// Add the breadcrumbs of a parent page
    ///
    /// Call this before pushing the current page's own breadcrumbs.
    ///
    /// # Errors
    ///
    /// Fails like [`call`](Self::call) if the parent (or any of its ancestors)
    /// is not registered.
    pub fn parent(&mut self, name: &str, params: impl Into<Params>) -> Result<(), BreadcrumbError> {
        self.call(name, &params.into())
    }

    /// Add a linked breadcrumb
    pub fn push(&mut self, title: impl Into<String>, url: impl Into<String>) {
        self.trail.push(Breadcrumb::new(title).with_url(url));
    }

    /// Add a breadcrumb without a link
    pub fn push_title(&mut self, title: impl Into<String>) {
        self.trail.push(Breadcrumb::new(title));
    }

    /// Add a fully built breadcrumb, including extra view data
    pub fn push_breadcrumb(&mut self, breadcrumb: Breadcrumb) {
        self.trail.push(breadcrumb);
    }

    /// Breadcrumbs pushed so far
    #[must_use]
    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Finish generation
    #[must_use]
    pub fn into_trail(self) -> Trail {
        self.trail
    }
}

/// Produces a trail for a named page
///
/// [`DefaultGenerator`] is what the manager uses unless told otherwise.
#[cfg_attr(test, mockall::automock)]
pub trait TrailGenerator: Send + Sync {
    /// Generate the trail for `name`
    ///
    /// `route` is the route serving the request, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::InvalidBreadcrumb`] if the name is (or any
    /// ancestor names are) not registered.
    // mockall needs the lifetime of `route` spelled out
    #[allow(clippy::needless_lifetimes)]
    fn generate<'a>(
        &self,
        registry: &Registry,
        name: &str,
        params: &Params,
        route: Option<&'a CurrentRoute>,
    ) -> Result<Trail, BreadcrumbError>;
}

/// Runs before hooks, the page's callback, then after hooks
///
/// Before hooks may change the name and parameters of the page; the
/// callback and the after hooks see the changed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGenerator;

impl TrailGenerator for DefaultGenerator {
    fn generate(
        &self,
        registry: &Registry,
        name: &str,
        params: &Params,
        route: Option<&CurrentRoute>,
    ) -> Result<Trail, BreadcrumbError> {
        let mut generator = Generator::for_route(registry, route);
        let mut name = name.to_string();
        let mut params = params.clone();

        for hook in registry.before_hooks() {
            hook(&mut generator, &mut name, &mut params)?;
        }

        generator.call(&name, &params)?;

        for hook in registry.after_hooks() {
            hook(&mut generator, &name, &params)?;
        }

        let trail = generator.into_trail();
        tracing::debug!(breadcrumb = %name, count = trail.len(), "Breadcrumbs generated");
        Ok(trail)
    }
}
