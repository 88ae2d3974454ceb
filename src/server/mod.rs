//! Preview server
//!
//! Serves the same routes the static build writes, rendered on every request
//! from a fresh post repository, so edits to content show up on reload.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::generator::{Generator, FEED_PATH};
use crate::helpers::url_for_root;
use crate::Site;

const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";
const XML_CONTENT_TYPE: &str = "application/xml";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Server state
struct ServerState {
    site: Site,
    generator: Generator,
}

/// Start the preview server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router. Every route lives below `config.root`, as
/// do the links in the rendered pages.
pub fn router(site: &Site) -> Result<Router> {
    let state = Arc::new(ServerState {
        site: site.clone(),
        generator: Generator::new(site)?,
    });

    let root = site.config.root.as_str();
    let at = |path: &str| url_for_root(root, path);

    let mut routes = Router::new()
        .route(&at("/"), get(home_handler))
        .route(&at("/blog"), get(blog_index_handler))
        .route(&at("/blog/"), get(blog_index_handler))
        .route(&at(FEED_PATH), get(feed_handler))
        .route(&at("/blog/:slug"), get(post_handler))
        .route(&at("/sitemap.xml"), get(sitemap_handler))
        .route(&at("/robots.txt"), get(robots_handler));

    // "/polaris" as well as "/polaris/"
    let bare_root = root.trim_end_matches('/');
    if !bare_root.is_empty() {
        routes = routes.route(bare_root, get(home_handler));
    }

    let app = routes
        .fallback(fallback_handler)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    html_page(StatusCode::OK, state.generator.render_home())
}

async fn blog_index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let posts = state.site.posts().list_posts();
    html_page(StatusCode::OK, state.generator.render_blog_index(&posts))
}

/// Unknown slugs are rejected before any file is read
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let repo = state.site.posts();
    if !repo.list_slugs().contains(&slug) {
        tracing::debug!("Unknown post slug {:?}", slug);
        return post_not_found(&state);
    }

    match repo.get_post(&slug) {
        Ok(post) => html_page(StatusCode::OK, state.generator.render_post(&post)),
        Err(e) => {
            tracing::warn!("{}", e);
            post_not_found(&state)
        }
    }
}

async fn feed_handler(State(state): State<Arc<ServerState>>) -> Response {
    let posts = state.site.posts().list_posts();
    (
        [(header::CONTENT_TYPE, RSS_CONTENT_TYPE)],
        state.generator.render_feed(&posts),
    )
        .into_response()
}

async fn sitemap_handler(State(state): State<Arc<ServerState>>) -> Response {
    let posts = state.site.posts().list_posts();
    (
        [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
        state.generator.render_sitemap(&posts),
    )
        .into_response()
}

async fn robots_handler(State(state): State<Arc<ServerState>>) -> Response {
    (
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        state.generator.render_robots(),
    )
        .into_response()
}

/// Serve a static asset, or the site 404 page when there is none
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let Some(path) = strip_root(&state.site.config.root, request.uri().path()) else {
        return html_page(StatusCode::NOT_FOUND, state.generator.render_not_found());
    };
    let (mut parts, body) = request.into_parts();
    parts.uri = match path.parse() {
        Ok(uri) => uri,
        Err(_) => return html_page(StatusCode::NOT_FOUND, state.generator.render_not_found()),
    };

    let mut service = ServeDir::new(&state.site.static_dir);
    match service.try_call(Request::from_parts(parts, body)).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => html_page(StatusCode::NOT_FOUND, state.generator.render_not_found()),
        Err(e) => {
            tracing::error!("Failed to serve static file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Request path relative to the site root, or None outside of it
fn strip_root(root: &str, path: &str) -> Option<String> {
    let root = root.trim_end_matches('/');
    let rest = path.strip_prefix(root)?;
    if rest.is_empty() {
        return Some("/".to_string());
    }
    rest.starts_with('/').then(|| rest.to_string())
}

fn post_not_found(state: &ServerState) -> Response {
    html_page(
        StatusCode::NOT_FOUND,
        state.generator.render_post_not_found(),
    )
}

/// An HTML response, or a 500 if the page failed to render
fn html_page(status: StatusCode, page: Result<String>) -> Response {
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    fn state_with_posts(posts: &[(&str, &str)]) -> (TempDir, Arc<ServerState>) {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&site.content_dir).unwrap();
        for (name, content) in posts {
            fs::write(site.content_dir.join(name), content).unwrap();
        }
        let state = Arc::new(ServerState {
            generator: Generator::new(&site).unwrap(),
            site,
        });
        (dir, state)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const HELLO: &str = "---\ntitle: Hello & Welcome\ndate: 2024-06-01\n---\n\nFirst post.\n";

    #[tokio::test]
    async fn test_unknown_slug_is_404() {
        let (_dir, state) = state_with_posts(&[("hello.md", HELLO)]);

        for slug in ["not-a-real-post", "..", "hello.md"] {
            let response =
                post_handler(State(state.clone()), Path(slug.to_string())).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "slug {:?}", slug);
            assert!(body_text(response).await.contains("Post not found"));
        }
    }

    #[tokio::test]
    async fn test_known_slug_renders() {
        let (_dir, state) = state_with_posts(&[("hello.md", HELLO)]);

        let response = post_handler(State(state), Path("hello".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("<title>Hello &amp; Welcome | Polaris Blog</title>"));
        assert!(body.contains("<p>First post.</p>"));
    }

    #[tokio::test]
    async fn test_every_listed_slug_resolves() {
        let (_dir, state) = state_with_posts(&[
            ("hello.md", HELLO),
            ("second.markdown", "---\ntitle: Second\n---\nBody\n"),
        ]);

        for slug in state.site.posts().list_slugs() {
            let response = post_handler(State(state.clone()), Path(slug.clone())).await;
            assert_eq!(response.status(), StatusCode::OK, "slug {:?}", slug);
        }
    }

    #[tokio::test]
    async fn test_blog_index_empty_state() {
        let (_dir, state) = state_with_posts(&[]);

        let response = blog_index_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .contains("No posts yet. Check back soon!"));
    }

    #[tokio::test]
    async fn test_feed_content_type() {
        let (_dir, state) = state_with_posts(&[("hello.md", HELLO)]);

        let response = feed_handler(State(state)).await;
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            RSS_CONTENT_TYPE
        );
        let body = body_text(response).await;
        assert!(body.contains("<title>Hello &amp; Welcome</title>"));
    }

    #[tokio::test]
    async fn test_sitemap_content_type() {
        let (_dir, state) = state_with_posts(&[]);

        let response = sitemap_handler(State(state)).await;
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            XML_CONTENT_TYPE
        );
        assert_eq!(body_text(response).await.matches("<url>").count(), 2);
    }

    #[tokio::test]
    async fn test_fallback_serves_static_or_404() {
        let (_dir, state) = state_with_posts(&[]);
        fs::create_dir_all(&state.site.static_dir).unwrap();
        fs::write(state.site.static_dir.join("emblem.svg"), "<svg/>").unwrap();

        let request = Request::builder()
            .uri("/emblem.svg")
            .body(Body::empty())
            .unwrap();
        let response = fallback_handler(State(state.clone()), request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "<svg/>");

        let request = Request::builder()
            .uri("/no/such/page")
            .body(Body::empty())
            .unwrap();
        let response = fallback_handler(State(state), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Page not found"));
    }

    #[tokio::test]
    async fn test_fallback_below_root() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig {
            root: "/polaris/".to_string(),
            ..SiteConfig::default()
        };
        let site = Site::with_config(dir.path(), config);
        fs::create_dir_all(&site.static_dir).unwrap();
        fs::write(site.static_dir.join("emblem.svg"), "<svg/>").unwrap();
        let state = Arc::new(ServerState {
            generator: Generator::new(&site).unwrap(),
            site,
        });

        let request = Request::builder()
            .uri("/polaris/emblem.svg")
            .body(Body::empty())
            .unwrap();
        let response = fallback_handler(State(state.clone()), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri("/emblem.svg")
            .body(Body::empty())
            .unwrap();
        let response = fallback_handler(State(state), request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root("/", "/emblem.svg").as_deref(), Some("/emblem.svg"));
        assert_eq!(strip_root("/polaris/", "/polaris").as_deref(), Some("/"));
        assert_eq!(
            strip_root("/polaris/", "/polaris/blog/feed.xml").as_deref(),
            Some("/blog/feed.xml")
        );
        assert_eq!(strip_root("/polaris/", "/polarisx/a.svg"), None);
        assert_eq!(strip_root("/polaris/", "/blog"), None);
    }

    #[test]
    fn test_router_builds_below_root() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig {
            root: "/polaris/".to_string(),
            ..SiteConfig::default()
        };
        let site = Site::with_config(dir.path(), config);
        assert!(router(&site).is_ok());
    }

    #[test]
    fn test_router_builds() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        assert!(router(&site).is_ok());
    }
}
