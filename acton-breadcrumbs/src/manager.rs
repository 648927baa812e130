//! Breadcrumbs manager
//!
//! The manager owns the registry of breadcrumb callbacks, the views and the
//! settings. It is built once at boot, stored in application state and cloned
//! per request (see [`crate::extract::Breadcrumbs`]); clones share everything
//! except the request-scoped route.
//!
//! # Example
//!
//! ```rust
//! use acton_breadcrumbs::prelude::*;
//!
//! # fn example() -> Result<(), BreadcrumbError> {
//! let mut manager = BreadcrumbsManager::from_settings(BreadcrumbSettings {
//!     files: Vec::new(),
//!     views_dir: None,
//!     ..BreadcrumbSettings::default()
//! })?;
//!
//! manager.define("home", |trail, _| {
//!     trail.push("Home", "/");
//!     Ok(())
//! })?;
//! manager.define("blog", |trail, _| {
//!     trail.parent("home", ())?;
//!     trail.push("Blog", "/blog");
//!     Ok(())
//! })?;
//!
//! let trail = manager.generate(Some("blog"), ())?;
//! assert_eq!(trail.titles(), vec!["Home", "Blog"]);
//!
//! let html = manager.render(Some("blog"), ())?;
//! assert!(html.contains(r#"<a href="/">Home</a>"#));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::breadcrumb::{Breadcrumb, Params, Trail};
use crate::config::BreadcrumbSettings;
use crate::definitions;
use crate::error::{BreadcrumbError, Solution, SolutionContext};
use crate::generator::{DefaultGenerator, Generator, TrailGenerator};
use crate::registry::Registry;
use crate::route::{CurrentRoute, NoRoute, RouteNames, RouteResolver, NOT_FOUND_ROUTE};
use crate::views::BreadcrumbViews;

/// Registers breadcrumbs and generates or renders trails
#[derive(Clone)]
pub struct BreadcrumbsManager {
    registry: Arc<Registry>,
    generator: Arc<dyn TrailGenerator>,
    router: Arc<dyn RouteResolver>,
    views: BreadcrumbViews,
    settings: Arc<BreadcrumbSettings>,
    route_names: Arc<RouteNames>,
    route: Option<(String, Params)>,
}

impl BreadcrumbsManager {
    /// Assemble a manager from its parts
    ///
    /// Most applications want [`from_settings`](Self::from_settings); this is
    /// the seam for custom generators and route resolvers.
    pub fn new(
        generator: impl TrailGenerator + 'static,
        router: impl RouteResolver + 'static,
        views: BreadcrumbViews,
        settings: BreadcrumbSettings,
    ) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            generator: Arc::new(generator),
            router: Arc::new(router),
            views,
            settings: Arc::new(settings),
            route_names: Arc::new(RouteNames::new()),
            route: None,
        }
    }

    /// Boot a manager from configuration
    ///
    /// Loads the views (built-ins plus `views_dir` overrides) and registers
    /// every definition file in `files`.
    ///
    /// # Errors
    ///
    /// Returns error if a view override cannot be read or compiled, or a
    /// definition file is missing, unreadable or invalid.
    pub fn from_settings(settings: BreadcrumbSettings) -> Result<Self, BreadcrumbError> {
        let views = BreadcrumbViews::new(settings.views_dir.clone())?;
        let mut manager = Self::new(DefaultGenerator, NoRoute, views, settings);

        definitions::load_files(&mut manager)?;

        tracing::info!(
            breadcrumbs = manager.registry.len(),
            "Breadcrumbs manager initialized"
        );
        Ok(manager)
    }

    /// Register the callback for a page
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::DuplicateBreadcrumb`] if the name is taken.
    pub fn define<F>(&mut self, name: impl Into<String>, callback: F) -> Result<(), BreadcrumbError>
    where
        F: Fn(&mut Generator<'_>, &Params) -> Result<(), BreadcrumbError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.registry).define(name, callback)
    }

    /// Add a hook that runs before every page's callback
    ///
    /// The hook may replace the page's name and parameters.
    pub fn before<F>(&mut self, hook: F)
    where
        F: Fn(&mut Generator<'_>, &mut String, &mut Params) -> Result<(), BreadcrumbError>
            + Send
            + Sync
            + 'static,
    {
        Arc::make_mut(&mut self.registry).before(hook);
    }

    /// Add a hook that runs after every page's callback
    ///
    /// [`Generator::route`] gives the hook access to the request, e.g. to add
    /// a "Page 2" breadcrumb for `?page=2`.
    pub fn after<F>(&mut self, hook: F)
    where
        F: Fn(&mut Generator<'_>, &str, &Params) -> Result<(), BreadcrumbError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.registry).after(hook);
    }

    /// Whether a breadcrumb is registered
    ///
    /// With `None`, checks the current route's name instead; an unnamed route
    /// has no breadcrumb.
    #[must_use]
    pub fn exists(&self, name: Option<&str>) -> bool {
        match name {
            Some(name) => self.registry.contains(name),
            None => {
                let current = if self.route.is_some() {
                    None
                } else {
                    self.router.current()
                };
                self.resolve_route(current.as_ref())
                    .is_ok_and(|(name, _)| self.registry.contains(&name))
            }
        }
    }

    /// Generate a trail
    ///
    /// With `None`, the name and parameters come from the route set with
    /// [`set_current_route`](Self::set_current_route) or, failing that, the
    /// route serving the request (`params` is then ignored). A request that
    /// matched no route uses the `errors.404` breadcrumb.
    ///
    /// # Errors
    ///
    /// - [`BreadcrumbError::UnnamedRoute`] if the current route has no name
    ///   and `unnamed_route_error` is set
    /// - [`BreadcrumbError::InvalidBreadcrumb`] if the breadcrumb is unknown
    ///   and the matching `*_error` setting is set
    /// - any error raised by a breadcrumb callback
    pub fn generate(
        &self,
        name: Option<&str>,
        params: impl Into<Params>,
    ) -> Result<Trail, BreadcrumbError> {
        self.generate_in(name, params.into(), self.router.current())
    }

    fn generate_in(
        &self,
        name: Option<&str>,
        params: Params,
        current: Option<CurrentRoute>,
    ) -> Result<Trail, BreadcrumbError> {
        let route_bound = name.is_none();
        let (name, params) = match name {
            Some(name) => (name.to_string(), params),
            None => match self.resolve_route(current.as_ref()) {
                Ok(resolved) => resolved,
                Err(err) if !self.settings.unnamed_route_error => {
                    tracing::warn!(error = %err, "Rendering no breadcrumbs for unnamed route");
                    return Ok(Trail::new());
                }
                Err(err) => return Err(err),
            },
        };

        match self
            .generator
            .generate(&self.registry, &name, &params, current.as_ref())
        {
            Ok(trail) => Ok(trail),
            Err(err @ BreadcrumbError::InvalidBreadcrumb { .. }) => {
                let fail = if route_bound {
                    self.settings.missing_route_bound_breadcrumb_error
                } else {
                    self.settings.invalid_named_breadcrumb_error
                };

                if fail {
                    Err(if route_bound { err.into_route_bound() } else { err })
                } else {
                    tracing::warn!(error = %err, breadcrumb = %name, "Rendering no breadcrumbs");
                    Ok(Trail::new())
                }
            }
            Err(err) => Err(err),
        }
    }

    fn resolve_route(
        &self,
        current: Option<&CurrentRoute>,
    ) -> Result<(String, Params), BreadcrumbError> {
        if let Some((name, params)) = &self.route {
            return Ok((name.clone(), params.clone()));
        }

        let Some(route) = current else {
            return Ok((NOT_FOUND_ROUTE.to_string(), Params::new()));
        };

        match &route.name {
            Some(name) => Ok((name.clone(), route.params.clone())),
            None => Err(BreadcrumbError::UnnamedRoute {
                method: route.method.clone(),
                uri: route.path.clone(),
            }),
        }
    }

    /// The current page's breadcrumb
    ///
    /// The last breadcrumb of the route-bound trail that is not marked
    /// `current: false`.
    ///
    /// # Errors
    ///
    /// Fails like [`generate`](Self::generate) with no name.
    pub fn current(&self) -> Result<Option<Breadcrumb>, BreadcrumbError> {
        let trail = self.generate(None, ())?;
        Ok(trail.current().cloned())
    }

    /// Render a trail with the named view
    ///
    /// # Errors
    ///
    /// Fails like [`generate`](Self::generate), or with
    /// [`BreadcrumbError::ViewNotFound`] if the view does not exist.
    pub fn view(
        &self,
        view: &str,
        name: Option<&str>,
        params: impl Into<Params>,
    ) -> Result<String, BreadcrumbError> {
        let current = self.router.current();
        let current_url = current.as_ref().map(|route| route.uri.clone());

        let trail = self.generate_in(name, params.into(), current)?;
        self.views.render(view, &trail, current_url.as_deref())
    }

    /// Render a trail with the configured view
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::ViewNotSet`] if no view is configured (an
    /// empty `view` setting counts as none), otherwise fails like
    /// [`view`](Self::view).
    pub fn render(&self, name: Option<&str>, params: impl Into<Params>) -> Result<String, BreadcrumbError> {
        let view = self.settings.view_name().ok_or(BreadcrumbError::ViewNotSet)?;

        self.view(view, name, params)
    }

    /// Use this breadcrumb for route-bound generation
    ///
    /// Takes precedence over the route serving the request.
    pub fn set_current_route(&mut self, name: impl Into<String>, params: impl Into<Params>) {
        self.route = Some((name.into(), params.into()));
    }

    /// Go back to the route serving the request
    pub fn clear_current_route(&mut self) {
        self.route = None;
    }

    /// Attach a breadcrumb name to an axum route pattern
    pub fn name_route(&mut self, pattern: impl Into<String>, name: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.route_names).name(pattern, name);
        self
    }

    /// Names attached to route patterns
    #[must_use]
    pub fn route_names(&self) -> &RouteNames {
        &self.route_names
    }

    /// A copy of this manager resolving routes with `router`
    ///
    /// The copy starts without a manually set route.
    #[must_use]
    pub fn with_router(&self, router: impl RouteResolver + 'static) -> Self {
        Self {
            router: Arc::new(router),
            route: None,
            ..self.clone()
        }
    }

    /// How to fix a breadcrumb error in this application
    #[must_use]
    pub fn explain(&self, err: &BreadcrumbError) -> Option<Solution> {
        let route = self.router.current();
        let cwd = std::env::current_dir().ok();

        let mut ctx = SolutionContext::new(&self.settings.files).with_route(route.as_ref());
        if let Some(cwd) = cwd.as_deref() {
            ctx = ctx.with_base_path(cwd);
        }

        err.solution(&ctx)
    }

    /// Registered callbacks and hooks
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The view environment
    #[must_use]
    pub const fn views(&self) -> &BreadcrumbViews {
        &self.views
    }

    /// The settings the manager was built with
    #[must_use]
    pub fn settings(&self) -> &BreadcrumbSettings {
        &self.settings
    }
}

impl fmt::Debug for BreadcrumbsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreadcrumbsManager")
            .field("registry", &self.registry)
            .field("views", &self.views)
            .field("settings", &self.settings)
            .field("route_names", &self.route_names)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockTrailGenerator;
    use crate::params;
    use crate::route::MockRouteResolver;
    use axum::http::Method;

    fn settings() -> BreadcrumbSettings {
        BreadcrumbSettings {
            files: Vec::new(),
            views_dir: None,
            ..BreadcrumbSettings::default()
        }
    }

    fn manager_with(
        generator: MockTrailGenerator,
        router: MockRouteResolver,
        settings: BreadcrumbSettings,
    ) -> BreadcrumbsManager {
        let views = BreadcrumbViews::new(None).unwrap();
        BreadcrumbsManager::new(generator, router, views, settings)
    }

    fn named_route() -> CurrentRoute {
        CurrentRoute::named("test", "/test")
    }

    fn unnamed_route() -> CurrentRoute {
        CurrentRoute::unnamed(Method::GET, "/test")
    }

    fn noop(_: &mut Generator<'_>, _: &Params) -> Result<(), BreadcrumbError> {
        Ok(())
    }

    #[test]
    fn test_a_callback_is_registered() {
        let mut manager = manager_with(MockTrailGenerator::new(), MockRouteResolver::new(), settings());
        manager.define("test", noop).unwrap();

        assert!(manager.exists(Some("test")));
        assert!(!manager.exists(Some("not-present")));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut manager = manager_with(MockTrailGenerator::new(), MockRouteResolver::new(), settings());
        manager.define("test", noop).unwrap();

        let err = manager.define("test", noop).unwrap_err();
        assert!(matches!(err, BreadcrumbError::DuplicateBreadcrumb { name } if name == "test"));
    }

    #[test]
    fn test_exists_checks_the_route_name() {
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(named_route()));

        let mut manager = manager_with(MockTrailGenerator::new(), router, settings());
        manager.define("test", noop).unwrap();

        assert!(manager.exists(None));
    }

    #[test]
    fn test_exists_checks_the_not_found_route() {
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(None::<CurrentRoute>);

        let mut manager = manager_with(MockTrailGenerator::new(), router, settings());
        manager.define(NOT_FOUND_ROUTE, noop).unwrap();

        assert!(manager.exists(None));
    }

    #[test]
    fn test_exists_checks_a_manually_set_route() {
        let mut router = MockRouteResolver::new();
        router.expect_current().never();

        let mut manager = manager_with(MockTrailGenerator::new(), router, settings());
        manager.define("test", noop).unwrap();
        manager.set_current_route("test", ());

        assert!(manager.exists(None));
    }

    #[test]
    fn test_exists_is_false_for_unnamed_routes() {
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(unnamed_route()));

        let manager = manager_with(MockTrailGenerator::new(), router, settings());
        assert!(!manager.exists(None));
    }

    #[test]
    fn test_generate_named() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .withf(|_, name, params, route| name == "test" && params.len() == 1 && route.is_none())
            .times(1)
            .returning(|_, _, _, _| Ok(Trail::new()));
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(None::<CurrentRoute>);

        let manager = manager_with(generator, router, settings());
        assert!(manager.generate(Some("test"), params![1]).unwrap().is_empty());
    }

    #[test]
    fn test_generate_from_manually_set_route() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .withf(|_, name, params, route| {
                name == "test"
                    && params.str(0) == Some("slug")
                    && route.is_some_and(|route| route.uri == "/other")
            })
            .times(1)
            .returning(|_, _, _, _| Ok(Trail::new()));
        let mut router = MockRouteResolver::new();
        router
            .expect_current()
            .times(1)
            .return_const(Some(CurrentRoute::unnamed(Method::GET, "/other")));

        let mut manager = manager_with(generator, router, settings());
        manager.set_current_route("test", params!["slug"]);

        assert!(manager.generate(None, ()).is_ok());
    }

    #[test]
    fn test_generate_uses_route_params() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .withf(|_, name, params, _| name == "posts.show" && params.str(0) == Some("42"))
            .times(1)
            .returning(|_, _, _, _| Ok(Trail::new()));
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(
            CurrentRoute::named("posts.show", "/posts/{id}")
                .with_uri("/posts/42")
                .with_params(params!["42"]),
        ));

        let manager = manager_with(generator, router, settings());
        assert!(manager.generate(None, params!["ignored"]).is_ok());
    }

    #[test]
    fn test_generate_with_no_route_uses_not_found() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .withf(|_, name, params, _| name == NOT_FOUND_ROUTE && params.is_empty())
            .times(1)
            .returning(|_, _, _, _| Ok(Trail::new()));
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(None::<CurrentRoute>);

        let manager = manager_with(generator, router, settings());
        assert!(manager.generate(None, ()).is_ok());
    }

    #[test]
    fn test_unnamed_route_yields_empty_when_lenient() {
        let mut generator = MockTrailGenerator::new();
        generator.expect_generate().never();
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(unnamed_route()));

        let manager = manager_with(
            generator,
            router,
            BreadcrumbSettings {
                unnamed_route_error: false,
                ..settings()
            },
        );

        assert!(manager.generate(None, ()).unwrap().is_empty());
    }

    #[test]
    fn test_unnamed_route_fails_when_strict() {
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(unnamed_route()));

        let manager = manager_with(MockTrailGenerator::new(), router, settings());
        let err = manager.generate(None, ()).unwrap_err();

        assert!(matches!(
            err,
            BreadcrumbError::UnnamedRoute { method: Method::GET, ref uri } if uri == "/test"
        ));
    }

    #[test]
    fn test_missing_route_bound_breadcrumb_yields_empty_when_lenient() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _, _, _| Err(BreadcrumbError::invalid("test")));
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(named_route()));

        let manager = manager_with(
            generator,
            router,
            BreadcrumbSettings {
                missing_route_bound_breadcrumb_error: false,
                invalid_named_breadcrumb_error: false,
                ..settings()
            },
        );

        assert!(manager.generate(None, ()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_route_bound_breadcrumb_is_marked_route_bound() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _, _, _| Err(BreadcrumbError::invalid("test")));
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(named_route()));

        let manager = manager_with(
            generator,
            router,
            BreadcrumbSettings {
                invalid_named_breadcrumb_error: false,
                ..settings()
            },
        );

        let err = manager.generate(None, ()).unwrap_err();
        assert!(err.is_route_bound());
    }

    #[test]
    fn test_invalid_named_breadcrumb_is_not_route_bound() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _, _, _| Err(BreadcrumbError::invalid("test")));
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(None::<CurrentRoute>);

        let manager = manager_with(
            generator,
            router,
            BreadcrumbSettings {
                missing_route_bound_breadcrumb_error: false,
                ..settings()
            },
        );

        let err = manager.generate(Some("test"), ()).unwrap_err();
        assert!(matches!(err, BreadcrumbError::InvalidBreadcrumb { .. }));
        assert!(!err.is_route_bound());
    }

    #[test]
    fn test_other_errors_propagate_when_lenient() {
        let mut generator = MockTrailGenerator::new();
        generator.expect_generate().times(1).returning(|_, _, _, _| {
            Err(BreadcrumbError::InvalidParameter {
                index: 0,
                reason: "missing".into(),
            })
        });

        let mut router = MockRouteResolver::new();
        router.expect_current().return_const(None::<CurrentRoute>);

        let manager = manager_with(generator, router, BreadcrumbSettings::lenient());
        assert!(matches!(
            manager.generate(Some("test"), ()),
            Err(BreadcrumbError::InvalidParameter { index: 0, .. })
        ));
    }

    #[test]
    fn test_view_renders_the_generated_trail() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _, _, _| Ok(Trail::from(vec![Breadcrumb::new("Test").with_url("/test")])));
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(named_route()));

        let manager = manager_with(generator, router, settings());
        manager
            .views()
            .add_view("breadcrumbs", "{{ breadcrumbs|length }}:{{ current_url }}")
            .unwrap();

        assert_eq!(manager.view("breadcrumbs", Some("test"), ()).unwrap(), "1:/test");
    }

    #[test]
    fn test_render_uses_the_configured_view() {
        let mut generator = MockTrailGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _, _, _| Ok(Trail::new()));
        let mut router = MockRouteResolver::new();
        router.expect_current().return_const(None::<CurrentRoute>);

        let manager = manager_with(
            generator,
            router,
            BreadcrumbSettings {
                view: Some("breadcrumbs".into()),
                ..settings()
            },
        );
        manager.views().add_view("breadcrumbs", "rendered").unwrap();

        assert_eq!(manager.render(Some("test"), ()).unwrap(), "rendered");
    }

    #[test]
    fn test_render_without_a_view_fails() {
        let mut generator = MockTrailGenerator::new();
        generator.expect_generate().never();

        let manager = manager_with(
            generator,
            MockRouteResolver::new(),
            BreadcrumbSettings {
                view: None,
                ..settings()
            },
        );

        assert!(matches!(
            manager.render(Some("test"), ()),
            Err(BreadcrumbError::ViewNotSet)
        ));
    }

    #[test]
    fn test_render_with_a_blank_view_fails() {
        for view in ["", "   "] {
            let manager = manager_with(
                MockTrailGenerator::new(),
                MockRouteResolver::new(),
                BreadcrumbSettings {
                    view: Some(view.to_string()),
                    ..settings()
                },
            );

            assert!(matches!(
                manager.render(Some("test"), ()),
                Err(BreadcrumbError::ViewNotSet)
            ));
        }
    }

    #[test]
    fn test_hooks_see_the_request_route() {
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(
            CurrentRoute::named("blog", "/blog").with_query("page", "3"),
        ));

        let mut manager = BreadcrumbsManager::new(
            DefaultGenerator,
            router,
            BreadcrumbViews::new(None).unwrap(),
            settings(),
        );
        manager
            .define("blog", |trail, _| {
                trail.push("Blog", "/blog");
                Ok(())
            })
            .unwrap();
        manager.after(|trail, name, _| {
            if let Some(page) = trail.route().and_then(|route| route.query_param("page")) {
                trail.push_title(format!("{name} page {page}"));
            }
            Ok(())
        });

        let trail = manager.generate(None, ()).unwrap();
        assert_eq!(trail.titles(), vec!["Blog", "blog page 3"]);
    }

    #[test]
    fn test_current_breadcrumb() {
        let mut generator = MockTrailGenerator::new();
        generator.expect_generate().times(1).returning(|_, _, _, _| {
            Ok(Trail::from(vec![
                Breadcrumb::new("Test").with_url("/test").with("current", true),
                Breadcrumb::new("Page 2").with("current", false),
            ]))
        });
        let mut router = MockRouteResolver::new();
        router.expect_current().times(1).return_const(Some(named_route()));

        let manager = manager_with(generator, router, settings());
        let current = manager.current().unwrap().unwrap();

        assert_eq!(current.title, "Test");
    }

    #[test]
    fn test_with_router_clears_manual_route() {
        let mut manager = manager_with(MockTrailGenerator::new(), MockRouteResolver::new(), settings());
        manager.define("test", noop).unwrap();
        manager.set_current_route("test", ());

        let scoped = manager.with_router(CurrentRoute::unnamed(Method::GET, "/other"));
        assert!(manager.exists(None));
        assert!(!scoped.exists(None));
        assert!(scoped.exists(Some("test")));
    }

    #[test]
    fn test_clear_current_route() {
        let mut manager = BreadcrumbsManager::from_settings(settings()).unwrap();
        manager.define("test", noop).unwrap();
        manager.set_current_route("test", ());
        assert!(manager.exists(None));

        manager.clear_current_route();
        assert!(!manager.exists(None));
    }

    #[test]
    fn test_name_route_does_not_leak_into_clones() {
        let mut manager = BreadcrumbsManager::from_settings(settings()).unwrap();
        let before = manager.clone();

        manager.name_route("/", "home").name_route("/blog", "blog");
        assert_eq!(manager.route_names().lookup("/blog"), Some("blog"));
        assert!(before.route_names().is_empty());
    }

    #[test]
    fn test_explain_uses_the_current_route() {
        let manager = BreadcrumbsManager::from_settings(settings())
            .unwrap()
            .with_router(CurrentRoute::named("posts.show", "/posts/{id}").with_uri("/posts/42"));

        let solution = manager
            .explain(&BreadcrumbError::invalid("posts.show").into_route_bound())
            .unwrap();
        assert!(solution.description.contains("/posts/42"));
    }
}
