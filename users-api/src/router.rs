use std::any::Any;

use axum::{
    http::{header, Method},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    app_state::AppState,
    config::ApplicationSettings,
    routes::{self, ApiError},
};

pub fn create(app_state: AppState, settings: &ApplicationSettings) -> Router<()> {
    let allow_origin = match settings.allowed_origin.clone() {
        Some(allowed) => AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == allowed
        }),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(allow_origin);

    Router::new()
        .nest("/api/users", routes::users::router())
        .fallback(|| async { ApiError::not_found("route not found") })
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Last-resort handler: a panicking request still gets a JSON 500.
fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    ApiError::internal().into_response()
}
