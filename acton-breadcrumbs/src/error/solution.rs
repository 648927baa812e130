//! Human-readable fixes for breadcrumb misconfiguration

use std::fmt;
use std::path::{Path, PathBuf};

use super::BreadcrumbError;
use crate::route::CurrentRoute;

const DOCS: &str = "https://acton-htmx.dev/breadcrumbs";

/// A labelled link into the breadcrumbs documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentationLink {
    /// Link text
    pub label: &'static str,
    /// Section anchor under the documentation root
    pub anchor: &'static str,
}

impl DocumentationLink {
    const fn new(label: &'static str, anchor: &'static str) -> Self {
        Self { label, anchor }
    }

    /// Full URL of the documentation section
    #[must_use]
    pub fn url(&self) -> String {
        format!("{DOCS}#{}", self.anchor)
    }
}

const DEFINING: DocumentationLink = DocumentationLink::new("Defining breadcrumbs", "defining-breadcrumbs");
const ROUTE_BOUND: DocumentationLink =
    DocumentationLink::new("Route-bound breadcrumbs", "route-bound-breadcrumbs");
const SILENCING: DocumentationLink =
    DocumentationLink::new("Silencing breadcrumb errors", "configuration");
const CHOOSING_VIEW: DocumentationLink =
    DocumentationLink::new("Choosing a breadcrumbs view", "choosing-a-view");
const ROOT: DocumentationLink = DocumentationLink::new("Breadcrumbs documentation", "breadcrumbs");

/// What the caller knows about the application when explaining an error
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionContext<'a> {
    /// Configured breadcrumb definition files
    pub files: &'a [PathBuf],
    /// Project root stripped from file paths in suggestions
    pub base_path: Option<&'a Path>,
    /// Route of the request being served, if any
    pub current_route: Option<&'a CurrentRoute>,
}

impl<'a> SolutionContext<'a> {
    /// Context with the configured definition files
    #[must_use]
    pub const fn new(files: &'a [PathBuf]) -> Self {
        Self {
            files,
            base_path: None,
            current_route: None,
        }
    }

    /// Strip this prefix from file paths
    #[must_use]
    pub const fn with_base_path(mut self, base_path: &'a Path) -> Self {
        self.base_path = Some(base_path);
        self
    }

    /// Route of the current request
    #[must_use]
    pub const fn with_route(mut self, route: Option<&'a CurrentRoute>) -> Self {
        self.current_route = route;
        self
    }

    fn relative_files(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|file| {
                self.base_path
                    .and_then(|base| file.strip_prefix(base).ok())
                    .unwrap_or(file.as_path())
                    .display()
                    .to_string()
            })
            .collect()
    }
}

/// A suggested fix with links to the relevant documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// One-line summary of the fix
    pub title: String,
    /// Details, may contain Markdown code blocks
    pub description: String,
    /// Further reading
    pub links: Vec<DocumentationLink>,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        if !self.links.is_empty() {
            writeln!(f)?;
            for link in &self.links {
                writeln!(f, "- {}: {}", link.label, link.url())?;
            }
        }
        Ok(())
    }
}

impl BreadcrumbError {
    /// Suggest how to fix this error
    ///
    /// Returns `None` for runtime failures that are not misconfiguration.
    #[must_use]
    pub fn solution(&self, ctx: &SolutionContext<'_>) -> Option<Solution> {
        match self {
            Self::DuplicateBreadcrumb { name } => Some(duplicate(name, ctx)),
            Self::InvalidBreadcrumb { name, route_bound } => Some(invalid(name, *route_bound, ctx)),
            Self::UnnamedRoute { method, uri } => Some(unnamed(method.as_str(), uri)),
            Self::ViewNotSet => Some(Solution {
                title: "Set a view for breadcrumbs".to_string(),
                description: "Please check the `[breadcrumbs]` section of `config.toml` for a valid \
                              view (e.g. \"breadcrumbs::tailwind\")"
                    .to_string(),
                links: vec![CHOOSING_VIEW, ROOT],
            }),
            Self::ViewNotFound(view) => Some(Solution {
                title: format!("Register the `{view}` view"),
                description: format!(
                    "Use one of the built-in views ({}) or add `{}.html` to the configured \
                     `views_dir`.",
                    crate::views::BUILTIN_VIEWS
                        .iter()
                        .map(|(name, _)| format!("`{name}`"))
                        .collect::<Vec<_>>()
                        .join(", "),
                    view.strip_prefix(crate::views::NAMESPACE).unwrap_or(view),
                ),
                links: vec![CHOOSING_VIEW, ROOT],
            }),
            Self::FileNotFound(path) => Some(Solution {
                title: "Create the breadcrumb file".to_string(),
                description: format!(
                    "Create `{}` (run `acton-breadcrumbs publish definitions`) or remove it from \
                     `files` in the `[breadcrumbs]` section of `config.toml`.",
                    path.display()
                ),
                links: vec![DEFINING, ROOT],
            }),
            _ => None,
        }
    }
}

fn duplicate(name: &str, ctx: &SolutionContext<'_>) -> Solution {
    let files = ctx.relative_files();

    let description = match files.as_slice() {
        [] => format!("Check your application for multiple breadcrumbs named `{name}`."),
        [file] => format!("Look in `{file}` for multiple breadcrumbs named `{name}`."),
        _ => format!(
            "Look in the following files for multiple breadcrumbs named `{name}`: {}",
            files.join(", ")
        ),
    };

    Solution {
        title: "Remove the duplicate breadcrumb".to_string(),
        description,
        links: vec![DEFINING, ROOT],
    }
}

fn invalid(name: &str, route_bound: bool, ctx: &SolutionContext<'_>) -> Solution {
    let files = ctx.relative_files();
    let file = match files.as_slice() {
        [file] => file.clone(),
        _ => "one of the files listed in the [breadcrumbs] config".to_string(),
    };

    let url = ctx.current_route.map_or("/", |route| route.uri.as_str());

    let description = format!(
        "```toml\n\
         [[breadcrumb]]\n\
         name = \"{name}\"\n\
         title = \"Title Here\"\n\
         url = \"{url}\"\n\
         ```\n\
         \n\
         Or in code:\n\
         \n\
         ```rust\n\
         manager.define(\"{name}\", |trail, _params| {{\n    \
             trail.push(\"Title Here\", \"{url}\");\n    \
             Ok(())\n\
         }})?;\n\
         ```"
    );

    let mut links = vec![DEFINING];
    if route_bound {
        links.push(ROUTE_BOUND);
    }
    links.push(SILENCING);
    links.push(ROOT);

    Solution {
        title: format!("Add this to {file}"),
        description,
        links,
    }
}

fn unnamed(method: &str, uri: &str) -> Solution {
    let method = method.to_lowercase();
    let description = format!(
        "For example:\n\
         \n\
         ```rust\n\
         let router = Router::new().route(\"{uri}\", {method}(handler));\n\
         manager.name_route(\"{uri}\", \"sample-name\");\n\
         ```"
    );

    Solution {
        title: "Give the route a name".to_string(),
        description,
        links: vec![ROUTE_BOUND, SILENCING, ROOT],
    }
}
