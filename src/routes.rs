use crate::handlers::{self, AppState};
use crate::render::LiveLookupXml;
use axum::{response::IntoResponse, routing::get, Router};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Builds the application router.
pub fn app(state: Arc<AppState>) -> Router {
    with_fallbacks(
        Router::new()
            .route("/health", get(handlers::health))
            .route("/livelookup", get(handlers::live_lookup))
            .with_state(state),
    )
}

/// Wraps `router` with request tracing and a panic layer that answers with
/// the empty live lookup document instead of a 500.
pub fn with_fallbacks(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_to_empty_document))
        .layer(TraceLayer::new_for_http())
}

fn panic_to_empty_document(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    LiveLookupXml::empty().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::EMPTY_DOCUMENT;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("directory exploded")
    }

    #[tokio::test]
    async fn test_panic_becomes_empty_document() {
        let router = with_fallbacks(Router::new().route("/livelookup", get(explode)));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/livelookup")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/xml; charset=utf-8"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], EMPTY_DOCUMENT.as_bytes());
    }
}
