use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{header, HeaderValue, Response},
    response::{IntoResponse, Html},
    routing::get,
    Router,
};
use futures::StreamExt;
use tokio_util::io::ReaderStream;

use crate::errors::ServeError;
use crate::services::{RenderService, Rendered, StyleService};
use crate::types::{AppState, RenderRequest, STYLE_ROUTE};

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(STYLE_ROUTE, get(handle_style))
        .route("/", get(handle_root))
        .route("/*path", get(handle_path))
        .with_state(state)
}

/// Handle root path requests
pub async fn handle_root(State(state): State<AppState>) -> Result<Response<Body>, ServeError> {
    serve(&state, RenderRequest::new("/")).await
}

/// Handle path requests
pub async fn handle_path(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response<Body>, ServeError> {
    log::debug!("Path request received: '{}'", path);
    serve(&state, RenderRequest::new(format!("/{}", path))).await
}

/// Serve the stylesheet, embedded or from the configured file
pub async fn handle_style(State(state): State<AppState>) -> impl IntoResponse {
    let css = StyleService::new(state.config.style_path.clone()).stylesheet();
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css.into_owned())
}

async fn serve(state: &AppState, request: RenderRequest) -> Result<Response<Body>, ServeError> {
    let requested = request.requested.clone();
    let service = RenderService::from_state(state);

    let rendered = match service.render(request) {
        Ok(rendered) => rendered,
        Err(ServeError::NotFound) => {
            log::warn!("Path not found: '{}'", requested);
            return Err(ServeError::NotFound);
        }
        Err(e) => return Err(e),
    };

    match rendered {
        Rendered::Page(html) => Ok(Html(html).into_response()),
        Rendered::Media { path, mime } => {
            let path = service.media_path(&path)?;
            let file = tokio::fs::File::open(&path).await.map_err(|e| {
                log::warn!("Failed to open media file {:?}: {}", path, e);
                ServeError::NotFound
            })?;

            // A read error ends the stream; the client sees a truncated body.
            let stream = ReaderStream::new(file).inspect(move |chunk| {
                if let Err(e) = chunk {
                    log::error!("Error serving media file {:?}: {}", path, e);
                }
            });

            let mut resp = Response::new(Body::from_stream(stream));
            resp.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
            Ok(resp)
        }
    }
}
