//! Blog example with route-bound breadcrumbs
//!
//! Pages are named after their routes; every handler renders the trail for
//! the route serving it. The `/posts/{slug}` page also shows the JSON-LD
//! view for search engines.
//!
//! Run with:
//! ```bash
//! cargo run --example blog
//! ```

use acton_breadcrumbs::{observability, prelude::*};
use askama::Template;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::info;

#[derive(Template)]
#[template(
    source = r#"<!doctype html>
<html>
<head>
  <title>{{ title }}</title>
  <script src="https://cdn.tailwindcss.com"></script>
  {{ structured_data|safe }}
</head>
<body class="mx-8">
  {{ breadcrumbs|safe }}
  <h1 class="text-2xl">{{ title }}</h1>
  <ul>
    <li><a href="/">Home</a></li>
    <li><a href="/posts">Posts</a></li>
    <li><a href="/posts/hello-world">Hello World</a></li>
    <li><a href="/about">About (unnamed route)</a></li>
    <li><a href="/missing">Missing page</a></li>
  </ul>
</body>
</html>"#,
    ext = "html"
)]
struct PageTemplate {
    title: String,
    breadcrumbs: String,
    structured_data: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize observability
    observability::init()?;

    let mut breadcrumbs = BreadcrumbsManager::from_settings(BreadcrumbSettings {
        files: Vec::new(),
        unnamed_route_error: false,
        ..BreadcrumbSettings::default()
    })?;

    // Home
    breadcrumbs.define("home", |trail, _| {
        trail.push("Home", "/");
        Ok(())
    })?;

    // Home > Posts
    breadcrumbs.define("posts.index", |trail, _| {
        trail.parent("home", ())?;
        trail.push("Posts", "/posts");
        Ok(())
    })?;

    // Home > Posts > [Post]
    breadcrumbs.define("posts.show", |trail, params| {
        trail.parent("posts.index", ())?;
        let slug = params.display(0).unwrap_or_default();
        trail.push_breadcrumb(
            Breadcrumb::new(slug.replace('-', " "))
                .with_url(format!("/posts/{slug}"))
                .with("image", json!(format!("/images/{slug}.png"))),
        );
        Ok(())
    })?;

    // Home > Page Not Found
    breadcrumbs.define("errors.404", |trail, _| {
        trail.parent("home", ())?;
        trail.push_title("Page Not Found");
        Ok(())
    })?;

    // [Trail] > Page N, for paginated listings such as /posts?page=2
    breadcrumbs.after(|trail, _, _| {
        let page = trail
            .route()
            .and_then(|route| route.query_param("page"))
            .and_then(|page| page.parse::<u32>().ok())
            .filter(|page| *page > 1);

        if let Some(page) = page {
            trail.push_breadcrumb(Breadcrumb::new(format!("Page {page}")).with("current", false));
        }
        Ok(())
    });

    breadcrumbs
        .name_route("/", "home")
        .name_route("/posts", "posts.index")
        .name_route("/posts/{slug}", "posts.show");

    let app = Router::new()
        .route("/", get(|crumbs: Breadcrumbs| page(crumbs, "Home".to_string())))
        .route("/posts", get(|crumbs: Breadcrumbs| page(crumbs, "Posts".to_string())))
        .route("/posts/{slug}", get(show_post))
        .route("/about", get(|crumbs: Breadcrumbs| page(crumbs, "About".to_string())))
        .fallback(not_found)
        .with_state(breadcrumbs);

    info!("Starting blog example on http://127.0.0.1:3000");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn page(breadcrumbs: Breadcrumbs, title: String) -> Result<Response, BreadcrumbError> {
    render_page(&breadcrumbs, title, String::new())
}

async fn show_post(
    breadcrumbs: Breadcrumbs,
    Path(slug): Path<String>,
) -> Result<Response, BreadcrumbError> {
    let structured_data = breadcrumbs.view("breadcrumbs::json-ld", None, ())?;
    render_page(&breadcrumbs, slug.replace('-', " "), structured_data)
}

async fn not_found(breadcrumbs: Breadcrumbs) -> Result<Response, BreadcrumbError> {
    let mut response = render_page(&breadcrumbs, "Page Not Found".to_string(), String::new())?;
    *response.status_mut() = StatusCode::NOT_FOUND;
    Ok(response)
}

fn render_page(
    breadcrumbs: &Breadcrumbs,
    title: String,
    structured_data: String,
) -> Result<Response, BreadcrumbError> {
    let template = PageTemplate {
        title,
        breadcrumbs: breadcrumbs.render(None, ())?,
        structured_data,
    };

    Ok(match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Page template failed to render");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    })
}
