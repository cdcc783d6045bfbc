//! HTTP routing.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | root gallery page |
//! | `GET /{name}` | folder page when `name` is a visible subdirectory of the root, else static file |
//! | `GET /_folio/folder.svg` | placeholder icon |
//! | anything else | static file under the root, 404 when absent |
//!
//! Pages are assembled on the blocking pool since every request reads the
//! filesystem and opens JPEGs for captions. Nothing is cached: each request
//! sees the tree as it is now.

use crate::config::SiteConfig;
use crate::gallery::{self, GalleryError};
use crate::render::{self, FOLDER_ICON_PATH, FOLDER_ICON_SVG};
use crate::types::GalleryPage;
use axum::Router;
use axum::extract::{Path as UrlPath, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Immutable state shared by all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: SiteConfig,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Gallery(#[from] GalleryError),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_page))
        .route(FOLDER_ICON_PATH, get(folder_icon))
        .route("/{name}", get(folder_page))
        .fallback_service(ServeDir::new(&state.root))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is killed.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(root = %state.root.display(), "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(state))).await
}

async fn root_page(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let root = state.root.clone();
    let page = tokio::task::spawn_blocking(move || gallery::assemble_root(&root)).await??;
    Ok(render_html(&state.config, &page))
}

async fn folder_page(
    State(state): State<Arc<AppState>>,
    UrlPath(name): UrlPath<String>,
    request: Request,
) -> Result<Response, AppError> {
    if !is_folder_name(&name) {
        return Ok(serve_static(&state, request).await);
    }

    let root = state.root.clone();
    let page = tokio::task::spawn_blocking(move || {
        if !root.join(&name).is_dir() {
            return Ok(None);
        }
        gallery::assemble_folder(&root, &name).map(Some)
    })
    .await??;

    match page {
        Some(page) => Ok(render_html(&state.config, &page)),
        None => Ok(serve_static(&state, request).await),
    }
}

async fn folder_icon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], FOLDER_ICON_SVG)
}

fn render_html(config: &SiteConfig, page: &GalleryPage) -> Response {
    Html(render::render_page(config, page).into_string()).into_response()
}

async fn serve_static(state: &AppState, request: Request) -> Response {
    match ServeDir::new(&state.root).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// A single visible path segment. Anything else is left to the static
/// file service, which rejects traversal on its own.
pub fn is_folder_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}
