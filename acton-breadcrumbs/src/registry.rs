//! Registry of breadcrumb callbacks and generation hooks

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::breadcrumb::Params;
use crate::error::BreadcrumbError;
use crate::generator::Generator;

/// Breadcrumb-generating callback
///
/// Receives the generator and the page's parameters. It may call
/// [`Generator::parent`] for ancestor pages and then push its own records.
pub type Callback =
    Arc<dyn Fn(&mut Generator<'_>, &Params) -> Result<(), BreadcrumbError> + Send + Sync>;

/// Hook run before the page's callback
///
/// Receives the generator plus the page's name and parameters, which it may
/// replace.
pub type BeforeHook = Arc<
    dyn Fn(&mut Generator<'_>, &mut String, &mut Params) -> Result<(), BreadcrumbError>
        + Send
        + Sync,
>;

/// Hook run after the page's callback with the name and parameters it used
pub type AfterHook =
    Arc<dyn Fn(&mut Generator<'_>, &str, &Params) -> Result<(), BreadcrumbError> + Send + Sync>;

/// Name → callback map plus before/after hooks
///
/// Built once at boot and shared read-only by every request.
#[derive(Clone, Default)]
pub struct Registry {
    callbacks: HashMap<String, Callback>,
    before: Vec<BeforeHook>,
    after: Vec<AfterHook>,
}

impl Registry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback for a page
    ///
    /// # Errors
    ///
    /// Returns [`BreadcrumbError::DuplicateBreadcrumb`] if the name is taken;
    /// the existing callback is kept.
    pub fn define<F>(&mut self, name: impl Into<String>, callback: F) -> Result<(), BreadcrumbError>
    where
        F: Fn(&mut Generator<'_>, &Params) -> Result<(), BreadcrumbError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.callbacks.contains_key(&name) {
            return Err(BreadcrumbError::DuplicateBreadcrumb { name });
        }

        tracing::trace!(breadcrumb = %name, "Breadcrumb defined");
        self.callbacks.insert(name, Arc::new(callback));
        Ok(())
    }

    /// Add a hook that runs before every page's callback
    pub fn before<F>(&mut self, hook: F)
    where
        F: Fn(&mut Generator<'_>, &mut String, &mut Params) -> Result<(), BreadcrumbError>
            + Send
            + Sync
            + 'static,
    {
        self.before.push(Arc::new(hook));
    }

    /// Add a hook that runs after every page's callback
    pub fn after<F>(&mut self, hook: F)
    where
        F: Fn(&mut Generator<'_>, &str, &Params) -> Result<(), BreadcrumbError> + Send + Sync + 'static,
    {
        self.after.push(Arc::new(hook));
    }

    /// Whether a callback is registered for `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Callback registered for `name`
    #[must_use]
    pub fn callback(&self, name: &str) -> Option<&Callback> {
        self.callbacks.get(name)
    }

    /// Hooks run before the page's callback, in registration order
    #[must_use]
    pub fn before_hooks(&self) -> &[BeforeHook] {
        &self.before
    }

    /// Hooks run after the page's callback, in registration order
    #[must_use]
    pub fn after_hooks(&self) -> &[AfterHook] {
        &self.after
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered callbacks
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callback is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("callbacks", &self.names())
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}
