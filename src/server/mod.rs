//! HTTP resolver service
//!
//! `?id=<video>` answers with the resolution as JSON, on any path and method.
//! Every response is a 200 with permissive CORS; failures are reported in the
//! body only.

use crate::core::audio_info::{ErrorBody, Resolution};
use crate::core::resolver::AudioResolver;
use crate::error::YoatError;
use crate::platform::SourceFetcher;
use crate::utils::url::normalize_video_id;
use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Query parameter naming the video
pub const ID_PARAM: &str = "id";

/// Build the service router; every request reaches [`handle_audio`]
pub fn router<F: SourceFetcher + 'static>(resolver: Arc<AudioResolver<F>>) -> Router {
    Router::new()
        .fallback(handle_audio::<F>)
        .with_state(resolver)
}

/// Bind `addr` and serve until the process exits
pub async fn serve<F: SourceFetcher + 'static>(
    addr: SocketAddr,
    resolver: Arc<AudioResolver<F>>,
) -> Result<(), YoatError> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, resolver).await
}

/// Serve on an already bound listener
pub async fn serve_on<F: SourceFetcher + 'static>(
    listener: TcpListener,
    resolver: Arc<AudioResolver<F>>,
) -> Result<(), YoatError> {
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(resolver)).await?;
    Ok(())
}

pub async fn handle_audio<F: SourceFetcher + 'static>(
    State(resolver): State<Arc<AudioResolver<F>>>,
    RawQuery(query): RawQuery,
) -> Response {
    let id = query.as_deref().and_then(first_id).unwrap_or_default();
    let input = id.trim();
    if input.is_empty() {
        return json_response("null".to_string());
    }

    let result = match normalize_video_id(input) {
        Ok(video_id) => resolver.resolve(&video_id).await,
        Err(e) => Err(e),
    };
    json_response(render(result))
}

/// First `id` value of a raw query string; later duplicates are ignored
fn first_id(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == ID_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Serialize a resolution, or the error that replaced it
fn render(result: Result<Resolution, YoatError>) -> String {
    let rendered = match &result {
        Ok(resolution) => serde_json::to_string(resolution),
        Err(e) => {
            warn!("Resolution failed: {}", e);
            serde_json::to_string(&ErrorBody::new(e.to_string()))
        }
    };

    rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

fn json_response(body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response()
}
