//! The viewer server.
//!
//! Serves the start page, one HTML page per view and the bare diagram of each
//! view. Every request fetches its view through the shared [`BackendClient`],
//! so the query cache is the only state that outlives a request.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{error, info, warn};
use tokio::net::TcpListener;

use c4view::{
    C4ViewError, Viewer,
    catalog::load_catalog,
    client::BackendClient,
    export::html,
    model::ViewKind,
    route::DIAGRAM_FILE,
};

struct ServeState {
    viewer: Viewer,
    client: BackendClient,
}

/// Builds the viewer's router.
pub fn router(viewer: Viewer, client: BackendClient) -> Router {
    let state = Arc::new(ServeState { viewer, client });

    Router::new()
        .route("/", get(get_list))
        .route("/:kind/:id", get(get_view))
        .route(&format!("/:kind/:id/{DIAGRAM_FILE}"), get(get_diagram))
        .fallback(not_found)
        .with_state(state)
}

/// Serves the viewer until Ctrl+C is pressed.
///
/// # Errors
///
/// Returns [`C4ViewError::Io`] if the address cannot be bound.
pub async fn serve(viewer: Viewer, host: &str, port: u16) -> Result<(), C4ViewError> {
    let client = viewer.client()?;
    let app = router(viewer, client);

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;

    info!(addr; "Viewer listening, press Ctrl+C to stop");
    println!("c4view listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("Viewer stopped");
    Ok(())
}

async fn get_list(State(state): State<Arc<ServeState>>) -> Response {
    let source = state.viewer.config().catalog().source();
    match load_catalog(source, &state.client).await {
        Ok(catalog) => Html(html::list_page(&catalog)).into_response(),
        Err(_) => (StatusCode::BAD_GATEWAY, Html(html::error_page())).into_response(),
    }
}

async fn get_view(
    State(state): State<Arc<ServeState>>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    let Some(kind) = view_kind(&kind) else {
        return not_found_response(&format!("/{kind}/{id}"));
    };

    let screen = state.viewer.load_screen(&state.client, kind, &id).await;
    let status = if screen.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    match screen.render_html(state.viewer.config().style()) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(err) => internal_error(&err),
    }
}

async fn get_diagram(
    State(state): State<Arc<ServeState>>,
    Path((kind, id)): Path<(String, String)>,
) -> Response {
    let Some(kind) = view_kind(&kind) else {
        return not_found_response(&format!("/{kind}/{id}/{DIAGRAM_FILE}"));
    };

    let screen = state.viewer.load_screen(&state.client, kind, &id).await;
    match screen.render_svg(state.viewer.config().style()) {
        Ok(Some(svg)) => {
            let mut response = Response::new(svg.into());
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("image/svg+xml"),
            );
            response
        }
        Ok(None) => (StatusCode::BAD_GATEWAY, Html(html::error_page())).into_response(),
        Err(err) => internal_error(&err),
    }
}

async fn not_found(uri: Uri) -> Response {
    not_found_response(uri.path())
}

fn view_kind(segment: &str) -> Option<ViewKind> {
    segment.parse().ok()
}

fn not_found_response(path: &str) -> Response {
    warn!(path; "No view at path");
    (StatusCode::NOT_FOUND, Html(html::not_found_page(path))).into_response()
}

fn internal_error(err: &C4ViewError) -> Response {
    error!(err:% = err; "Failed to render page");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(html::error_page())).into_response()
}
