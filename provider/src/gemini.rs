use crate::error::{ProviderError, Result};
use serde_json::{json, Value};

const PROVIDER: &str = "gemini";

/// Google Generative Language `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    pub model: String,
    base_url: String,
}

impl GeminiClient {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash-exp";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Send `prompt` as a single user turn and return the concatenated text
    /// parts of the first candidate.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey { provider: PROVIDER })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "gemini request");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!(%status, "gemini response status");
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: text,
            });
        }

        let v: Value = resp.json().await?;
        extract_text(&v).ok_or(ProviderError::EmptyResponse { provider: PROVIDER })
    }
}

fn extract_text(v: &Value) -> Option<String> {
    let parts = v["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::HeaderMap, routing::post, Json, Router};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn extracts_and_joins_text_parts() {
        let v = json!({"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]});
        assert_eq!(extract_text(&v).as_deref(), Some("{\"a\":1}"));
        assert_eq!(extract_text(&json!({"candidates":[]})), None);
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        // Nothing listens on port 9; a request attempt would be a transport error.
        let client = GeminiClient::new(None).with_base_url("http://127.0.0.1:9");
        let err = client.generate_text("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey { .. }));

        let empty = GeminiClient::new(Some(String::new())).with_base_url("http://127.0.0.1:9");
        assert!(matches!(
            empty.generate_text("hi").await.unwrap_err(),
            ProviderError::MissingApiKey { .. }
        ));
    }

    #[tokio::test]
    async fn posts_prompt_and_reads_candidate_text() {
        let app = Router::new().route(
            "/v1beta/models/:target",
            post(
                |Path(target): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(target, "test-model:generateContent");
                    assert_eq!(headers["x-goog-api-key"], "k-123");
                    let prompt = body["contents"][0]["parts"][0]["text"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": format!("echo:{prompt}")}]}}]
                    }))
                },
            ),
        );
        let base = serve(app).await;
        let client = GeminiClient::new(Some("k-123".into()))
            .with_model("test-model")
            .with_base_url(base);
        assert_eq!(client.generate_text("solar").await.unwrap(), "echo:solar");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let app = Router::new().route(
            "/v1beta/models/:target",
            post(|| async { (axum::http::StatusCode::FORBIDDEN, "denied") }),
        );
        let base = serve(app).await;
        let client = GeminiClient::new(Some("k".into())).with_base_url(base);
        match client.generate_text("x").await.unwrap_err() {
            ProviderError::Status { status, body, .. } => {
                assert_eq!(status, 403);
                assert_eq!(body, "denied");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
