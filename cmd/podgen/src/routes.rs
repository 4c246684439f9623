//! Router, CORS and method handling.
//!
//! Every endpoint is served at `/<name>` and `/api/<name>`. A non-preflight
//! `OPTIONS` gets `200` with an empty body; any other unsupported method
//! gets `405 {"error": "Method not allowed"}`.

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    handlers::{
        diagnostics, generate, method_not_allowed, podcast, preflight, scrape, status, voices,
    },
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    let api = endpoints();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .layer(cors())
        .with_state(state)
}

fn endpoints() -> Router<AppState> {
    Router::new()
        .route("/scrape", finish(post(scrape::scrape)))
        .route("/generate", finish(post(generate::generate)))
        .route(
            "/generate-podcast-from-url",
            finish(post(podcast::generate_podcast)),
        )
        .route(
            "/check-audio-status",
            finish(post(status::check_audio_status)),
        )
        .route("/voices", finish(get(voices::voices)))
        .route("/test-voice-id", finish(get(diagnostics::test_voice_id)))
        .route("/test-minimax", finish(get(diagnostics::test_minimax)))
        .route("/healthz", finish(get(diagnostics::healthz)))
}

fn finish(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.options(preflight).fallback(method_not_allowed)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            HeaderName::from_static("accept-version"),
            header::CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            header::CONTENT_TYPE,
            header::DATE,
            HeaderName::from_static("x-api-version"),
        ])
}
