//! HTTP boundary for synthesis and export.
//!
//! Failures never leak detail to callers: every error body is the generic
//! message and the cause goes to the log.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use slide_common::export_file_name;
use slide_core::{Synthesizer, USER_MESSAGE};
use slide_export::PPTX_CONTENT_TYPE;
use slide_protocol::{
    ErrorResponse, ExportRequest, GenerateRequest, GenerateResponse, HealthResponse,
};
use tower_http::cors::CorsLayer;

/// Default listen address of `slide serve`.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

const EXPORT_FAILED: &str = "Failed to export presentation.";

#[derive(Clone)]
pub struct AppState {
    pub synthesizer: Synthesizer,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .route("/api/export", post(export))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(req) = body.map_err(|rejection| {
        tracing::warn!("rejected generate request: {rejection}");
        internal_error(USER_MESSAGE)
    })?;
    tracing::info!(action = ?req.action, "generate request");
    match state.synthesizer.synthesize(&req.prompt, req.prior()).await {
        Ok(presentation) => Ok(Json(GenerateResponse { presentation })),
        Err(e) => {
            tracing::error!(kind = ?e.kind(), "generation failed: {e}");
            Err(internal_error(USER_MESSAGE))
        }
    }
}

async fn export(body: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let deck = match body {
        Ok(Json(req)) => req.presentation,
        Err(rejection) => {
            tracing::warn!("rejected export request: {rejection}");
            return internal_error(EXPORT_FAILED).into_response();
        }
    };
    match slide_export::render(&deck) {
        Ok(bytes) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                export_file_name(&deck.title)
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, PPTX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("export failed: {e}");
            internal_error(EXPORT_FAILED).into_response()
        }
    }
}

fn internal_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use slide_common::{Deck, Layout, Slide};
    use slide_core::client::StubClient;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(reply: &str) -> Router {
        router(AppState {
            synthesizer: Synthesizer::new(Arc::new(StubClient::new(reply))),
        })
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let resp = app("")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn generate_returns_parsed_presentation() {
        let reply = "```json\n{\"title\":\"T\",\"slides\":[]}\n```";
        let resp = app(reply)
            .oneshot(post_json(
                "/api/generate",
                serde_json::json!({"prompt": "anything", "action": "create"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"presentation": {"title": "T", "slides": []}})
        );
    }

    #[tokio::test]
    async fn unparseable_model_output_is_a_generic_500() {
        let resp = app("Sure! Here is your deck.")
            .oneshot(post_json("/api/generate", serde_json::json!({"prompt": "x"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"error": USER_MESSAGE})
        );
    }

    fn post_raw(uri: &str, body: &'static str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_generate_bodies_get_the_generic_error() {
        for body in ["not json", r#"{"action":"create"}"#, r#"{"prompt":42}"#] {
            let resp = app("").oneshot(post_raw("/api/generate", body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "body: {body}");
            assert_eq!(
                json_body(resp).await,
                serde_json::json!({"error": USER_MESSAGE}),
                "body: {body}"
            );
        }
    }

    #[tokio::test]
    async fn missing_content_type_gets_the_generic_error() {
        let req = Request::post("/api/generate")
            .body(Body::from(r#"{"prompt":"x"}"#))
            .unwrap();
        let resp = app("").oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(resp).await, serde_json::json!({"error": USER_MESSAGE}));
    }

    #[tokio::test]
    async fn unknown_action_is_served_as_create() {
        let reply = r#"{"title":"Fresh","slides":[]}"#;
        let resp = app(reply)
            .oneshot(post_json(
                "/api/generate",
                serde_json::json!({
                    "prompt": "x",
                    "action": "regenerate",
                    "currentPresentation": {"title": "Old", "slides": []}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["presentation"]["title"], "Fresh");
    }

    #[tokio::test]
    async fn malformed_export_body_gets_the_generic_error() {
        let resp = app("")
            .oneshot(post_raw("/api/export", r#"{"presentation":{"slides":[]}}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(resp).await, serde_json::json!({"error": EXPORT_FAILED}));
    }

    #[tokio::test]
    async fn export_streams_pptx_attachment() {
        let deck = Deck::new(
            "Q3 Review",
            vec![Slide::new("slide-1", "Q3 Review", Layout::Title)],
        );
        let resp = app("")
            .oneshot(post_json(
                "/api/export",
                serde_json::json!({ "presentation": deck }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            PPTX_CONTENT_TYPE
        );
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap(),
            "attachment; filename=\"Q3_Review.pptx\""
        );
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
