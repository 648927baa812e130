//! Breadcrumb records, trails and callback parameters
//!
//! A [`Trail`] is the ordered list of [`Breadcrumb`]s produced for a page.
//! Records carry a title, an optional URL and an open map of extra fields
//! that are passed through to views untouched.
//!
//! # Examples
//!
//! ```rust
//! use acton_breadcrumbs::breadcrumb::Breadcrumb;
//!
//! let crumb = Breadcrumb::new("Blog")
//!     .with_url("/blog")
//!     .with("icon", "book");
//!
//! assert_eq!(crumb.url.as_deref(), Some("/blog"));
//! assert_eq!(crumb.get("icon").and_then(|v| v.as_str()), Some("book"));
//! assert!(crumb.is_current());
//! ```

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BreadcrumbError;

/// Extra field consulted by [`Trail::current`]
pub const CURRENT_FIELD: &str = "current";

/// A single link or label in a navigational trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Text shown for the page
    pub title: String,

    /// Link target, `None` for plain labels
    pub url: Option<String>,

    /// Additional data passed to the view (icons, images, `current`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Breadcrumb {
    /// Create a breadcrumb without a URL
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            extra: Map::new(),
        }
    }

    /// Set the link target
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach an extra field
    ///
    /// `title` and `url` are owned by the record itself and are ignored here.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merge a map of extra fields, ignoring `title` and `url`
    #[must_use]
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        for (key, value) in extra {
            self.insert(key, value);
        }
        self
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if key == "title" || key == "url" {
            return;
        }
        self.extra.insert(key, value.into());
    }

    /// Look up an extra field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Whether this record may stand for the current page
    ///
    /// Only an explicit `current = false` opts a record out.
    #[must_use]
    pub fn is_current(&self) -> bool {
        !matches!(self.extra.get(CURRENT_FIELD), Some(Value::Bool(false)))
    }
}

/// Ordered sequence of breadcrumbs for a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trail(Vec<Breadcrumb>);

impl Trail {
    /// Create an empty trail
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, breadcrumb: Breadcrumb) {
        self.0.push(breadcrumb);
    }

    /// Number of breadcrumbs
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the trail has no breadcrumbs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in display order (ancestors first)
    pub fn iter(&self) -> std::slice::Iter<'_, Breadcrumb> {
        self.0.iter()
    }

    /// First breadcrumb, usually the home page
    #[must_use]
    pub fn first(&self) -> Option<&Breadcrumb> {
        self.0.first()
    }

    /// Last breadcrumb
    #[must_use]
    pub fn last(&self) -> Option<&Breadcrumb> {
        self.0.last()
    }

    /// Last breadcrumb that has not opted out with `current = false`
    #[must_use]
    pub fn current(&self) -> Option<&Breadcrumb> {
        self.0.iter().rev().find(|crumb| crumb.is_current())
    }

    /// Titles in display order
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.0.iter().map(|crumb| crumb.title.as_str()).collect()
    }

    /// Borrow as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Breadcrumb] {
        &self.0
    }

    /// Take the underlying records
    #[must_use]
    pub fn into_vec(self) -> Vec<Breadcrumb> {
        self.0
    }
}

impl From<Vec<Breadcrumb>> for Trail {
    fn from(crumbs: Vec<Breadcrumb>) -> Self {
        Self(crumbs)
    }
}

impl IntoIterator for Trail {
    type Item = Breadcrumb;
    type IntoIter = std::vec::IntoIter<Breadcrumb>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trail {
    type Item = &'a Breadcrumb;
    type IntoIter = std::slice::Iter<'a, Breadcrumb>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Positional parameters passed to a breadcrumb callback
///
/// Route-bound parameters are the matched path segments, as strings.
/// [`Params::parse`] accepts those for numeric and boolean targets too.
///
/// # Examples
///
/// ```rust
/// use acton_breadcrumbs::params;
///
/// let params = params!["42", "rust"];
/// assert_eq!(params.parse::<u64>(0).unwrap(), 42);
/// assert_eq!(params.str(1), Some("rust"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Vec<Value>);

impl Params {
    /// No parameters
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter
    #[must_use]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Raw parameter at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Parameter at `index` if it is a string
    #[must_use]
    pub fn str(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(Value::as_str)
    }

    /// Deserialize the parameter at `index`
    ///
    /// String values that fail to deserialize directly are retried as JSON,
    /// so `"42"` parses as an integer.
    pub fn parse<T: DeserializeOwned>(&self, index: usize) -> Result<T, BreadcrumbError> {
        let value = self.0.get(index).ok_or_else(|| BreadcrumbError::InvalidParameter {
            index,
            reason: format!("only {} parameter(s) given", self.0.len()),
        })?;

        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Ok(parsed),
            Err(err) => match value {
                Value::String(raw) => serde_json::from_str(raw).map_err(|_| {
                    BreadcrumbError::InvalidParameter {
                        index,
                        reason: err.to_string(),
                    }
                }),
                _ => Err(BreadcrumbError::InvalidParameter {
                    index,
                    reason: err.to_string(),
                }),
            },
        }
    }

    /// Parameter at `index` formatted for interpolation into titles and URLs
    ///
    /// Strings are used verbatim, `null` becomes empty.
    #[must_use]
    pub fn display(&self, index: usize) -> Option<String> {
        self.0.get(index).map(|value| match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the raw values
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
}

impl From<()> for Params {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<&Params> for Params {
    fn from(params: &Params) -> Self {
        params.clone()
    }
}

impl FromIterator<Value> for Params {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build [`Params`] from a list of JSON-convertible expressions
///
/// ```rust
/// use acton_breadcrumbs::params;
///
/// let params = params![1, "two", serde_json::json!({ "id": 3 })];
/// assert_eq!(params.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::breadcrumb::Params::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::breadcrumb::Params::from(vec![$($crate::__private::json!($value)),+])
    };
}
