//! Axum extractor
//!
//! [`Breadcrumbs`] hands handlers a manager bound to the route serving the
//! request, so route-bound generation (`generate(None, ..)`,
//! `render(None, ..)`, `current()`) just works.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use std::ops::{Deref, DerefMut};

use crate::manager::BreadcrumbsManager;
use crate::route::RequestRoute;

/// Request-scoped breadcrumbs manager
///
/// Requires the manager to be reachable from the router state through
/// [`FromRef`]; a state that *is* the manager works out of the box.
///
/// # Example
///
/// ```rust,no_run
/// use acton_breadcrumbs::prelude::*;
/// use axum::{response::Html, routing::get, Router};
///
/// async fn show_post(breadcrumbs: Breadcrumbs) -> Result<Html<String>, BreadcrumbError> {
///     let trail = breadcrumbs.render(None, ())?;
///     Ok(Html(format!("{trail}<h1>Post</h1>")))
/// }
///
/// # fn example() -> Result<(), BreadcrumbError> {
/// let mut manager = BreadcrumbsManager::from_settings(BreadcrumbSettings::default())?;
/// manager.name_route("/posts/{id}", "posts.show");
///
/// let app: Router = Router::new()
///     .route("/posts/{id}", get(show_post))
///     .with_state(manager);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Breadcrumbs(pub BreadcrumbsManager);

impl<S> FromRequestParts<S> for Breadcrumbs
where
    S: Send + Sync,
    BreadcrumbsManager: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let manager = BreadcrumbsManager::from_ref(state);
        let route = RequestRoute::from_parts(parts, state, manager.route_names()).await;

        if let Some(current) = route.route() {
            tracing::trace!(
                route = current.name.as_deref().unwrap_or("<unnamed>"),
                path = %current.path,
                "Breadcrumbs bound to request route"
            );
        }

        Ok(Self(manager.with_router(route)))
    }
}

impl Deref for Breadcrumbs {
    type Target = BreadcrumbsManager;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Breadcrumbs {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
