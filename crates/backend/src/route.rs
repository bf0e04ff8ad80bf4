use axum::{
    body::Body,
    http::{
        header::{self, HeaderValue},
        Request,
    },
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::{
        predicate::{NotForContentType, Predicate, SizeAbove},
        CompressionLayer,
    },
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Level;

use crate::{AppState, handlers};

pub fn router(state: AppState) -> Router {
    let compression_predicate = SizeAbove::new(1024)
        .and(NotForContentType::IMAGES)
        .and(NotForContentType::const_new("font/woff2"));

    Router::new()
        .route("/user", get(handlers::get_user))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(4096))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::span!(
                    Level::DEBUG,
                    "request",
                    method = tracing::field::display(request.method()),
                    uri = tracing::field::display(request.uri()),
                    request_id = tracing::field::display(ulid::Ulid::new()),
                )
            }),
        )
        .layer(CompressionLayer::new().compress_when(compression_predicate))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

#[cfg(test)]
pub mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use model::UserData;

    use super::router;
    use crate::{AppState, handlers::MAX_DELAY_MS};

    async fn get(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router(AppState::new())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_owned());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, body.to_vec())
    }

    #[tokio::test]
    async fn test_get_user() {
        let (status, cache, body) = get("/user").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
        let user: UserData = serde_json::from_slice(&body).unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.org");
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_user_with_delay_is_clamped() {
        let started = tokio::time::Instant::now();
        let (status, _, _) = get("/user?delay=600000").await;
        assert_eq!(status, StatusCode::OK);
        let held = started.elapsed().as_millis();
        assert!(held >= u128::from(MAX_DELAY_MS));
        assert!(held < u128::from(MAX_DELAY_MS) + 1000);
    }

    #[tokio::test]
    async fn test_bad_delay_is_rejected() {
        let (status, _, _) = get("/user?delay=soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _, _) = get("/first/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
