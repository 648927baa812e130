//! Current route resolution
//!
//! Route-bound breadcrumbs are looked up by the name of the route serving the
//! request. axum routes have no names of their own, so applications attach
//! them to route patterns through [`RouteNames`].
//!
//! ```rust
//! use acton_breadcrumbs::route::RouteNames;
//!
//! let mut names = RouteNames::new();
//! names.name("/", "home").name("/posts/{id}", "posts.show");
//!
//! assert_eq!(names.lookup("/posts/{id}"), Some("posts.show"));
//! assert_eq!(names.lookup("/about"), None);
//! ```

use axum::{
    extract::{FromRequestParts, MatchedPath, Query, RawPathParams},
    http::{request::Parts, Method},
};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::breadcrumb::Params;

/// Breadcrumb name used when the request matched no route at all
pub const NOT_FOUND_ROUTE: &str = "errors.404";

/// The route serving the current request
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentRoute {
    /// Name attached to the route pattern, if any
    pub name: Option<String>,
    /// Request method
    pub method: Method,
    /// Matched route pattern, e.g. `/posts/{id}`
    pub path: String,
    /// Request path, e.g. `/posts/42`
    pub uri: String,
    /// Path parameters in pattern order
    pub params: Params,
    /// Query string parameters; repeated keys keep the last value
    pub query: BTreeMap<String, String>,
}

impl CurrentRoute {
    /// A named `GET` route without parameters
    pub fn named(name: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: Some(name.into()),
            method: Method::GET,
            uri: path.clone(),
            path,
            params: Params::new(),
            query: BTreeMap::new(),
        }
    }

    /// An unnamed route
    pub fn unnamed(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: None,
            method,
            uri: path.clone(),
            path,
            params: Params::new(),
            query: BTreeMap::new(),
        }
    }

    /// Set the request path when it differs from the pattern
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Set the path parameters
    #[must_use]
    pub fn with_params(mut self, params: impl Into<Params>) -> Self {
        self.params = params.into();
        self
    }

    /// Add a query string parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// A query string parameter of the request
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Source of the current route
///
/// The manager asks its resolver only when breadcrumbs are generated without
/// an explicit name.
#[cfg_attr(test, mockall::automock)]
pub trait RouteResolver: Send + Sync {
    /// The route serving the current request, `None` when nothing matched
    fn current(&self) -> Option<CurrentRoute>;
}

/// Resolver for code running outside a request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRoute;

impl RouteResolver for NoRoute {
    fn current(&self) -> Option<CurrentRoute> {
        None
    }
}

impl RouteResolver for CurrentRoute {
    fn current(&self) -> Option<CurrentRoute> {
        Some(self.clone())
    }
}

/// Route of an axum request
///
/// Built from the request's [`MatchedPath`] and [`RawPathParams`]; requests
/// handled by a fallback have no matched path and therefore no route.
#[derive(Debug, Clone, Default)]
pub struct RequestRoute(Option<CurrentRoute>);

impl RequestRoute {
    /// Resolve the route of a request
    pub async fn from_parts<S>(parts: &mut Parts, state: &S, names: &RouteNames) -> Self
    where
        S: Send + Sync,
    {
        let Some(matched) = parts.extensions.get::<MatchedPath>() else {
            return Self(None);
        };
        let path = matched.as_str().to_string();

        let params = match RawPathParams::from_request_parts(parts, state).await {
            Ok(raw) => raw
                .iter()
                .map(|(_, value)| Value::String(value.to_string()))
                .collect(),
            Err(rejection) => {
                tracing::debug!(%rejection, "Route parameters unavailable for breadcrumbs");
                Params::new()
            }
        };

        let query = match Query::<BTreeMap<String, String>>::try_from_uri(&parts.uri) {
            Ok(Query(query)) => query,
            Err(rejection) => {
                tracing::debug!(%rejection, "Query string unavailable for breadcrumbs");
                BTreeMap::new()
            }
        };

        Self(Some(CurrentRoute {
            name: names.lookup(&path).map(ToString::to_string),
            method: parts.method.clone(),
            uri: parts.uri.path().to_string(),
            path,
            params,
            query,
        }))
    }

    /// The resolved route
    #[must_use]
    pub const fn route(&self) -> Option<&CurrentRoute> {
        self.0.as_ref()
    }
}

impl From<Option<CurrentRoute>> for RequestRoute {
    fn from(route: Option<CurrentRoute>) -> Self {
        Self(route)
    }
}

impl RouteResolver for RequestRoute {
    fn current(&self) -> Option<CurrentRoute> {
        self.0.clone()
    }
}

/// Names attached to axum route patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteNames {
    names: HashMap<String, String>,
}

impl RouteNames {
    /// No named routes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name a route pattern, exactly as passed to `Router::route`
    pub fn name(&mut self, pattern: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.names.insert(pattern.into(), name.into());
        self
    }

    /// Name attached to a pattern
    #[must_use]
    pub fn lookup(&self, pattern: &str) -> Option<&str> {
        self.names.get(pattern).map(String::as_str)
    }

    /// Number of named patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no pattern is named
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_route_names_replace_existing() {
        let mut names = RouteNames::new();
        names.name("/", "home").name("/", "index");
        assert_eq!(names.lookup("/"), Some("index"));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_fixed_resolvers() {
        assert!(NoRoute.current().is_none());

        let route = CurrentRoute::named("home", "/");
        assert_eq!(route.current(), Some(route.clone()));
    }

    #[tokio::test]
    async fn test_request_route_from_matched_path() {
        async fn handler(request: Request<Body>) -> String {
            let (mut parts, _) = request.into_parts();
            let mut names = RouteNames::new();
            names.name("/posts/{id}/comments/{comment}", "comments.show");

            let route = RequestRoute::from_parts(&mut parts, &(), &names).await;
            let current = route.current().unwrap();
            format!(
                "{}|{}|{}|{}|{}",
                current.name.as_deref().unwrap_or_default(),
                current.path,
                current.uri,
                serde_json::to_string(&current.params).unwrap(),
                current.query_param("page").unwrap_or_default()
            )
        }

        let app = Router::new().route("/posts/{id}/comments/{comment}", get(handler));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/posts/42/comments/7?page=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            r#"comments.show|/posts/{id}/comments/{comment}|/posts/42/comments/7|["42","7"]|2"#
        );
    }

    #[tokio::test]
    async fn test_request_without_matched_path_has_no_route() {
        let (mut parts, ()) = Request::builder()
            .uri("/missing")
            .body(())
            .unwrap()
            .into_parts();

        let route = RequestRoute::from_parts(&mut parts, &(), &RouteNames::new()).await;
        assert!(route.current().is_none());
    }
}
