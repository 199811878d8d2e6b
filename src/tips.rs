use crate::errors::TipError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::{future::Future, pin::Pin, time::Duration};
use tracing::{debug, error};

pub const FALLBACK_TIP: &str = "Every moment of focus is a victory. You're building a stronger mind.";

const TIP_PROMPT: &str = "Generate a single, short, encouraging sentence for someone trying to stay focused and reduce screen time. Be positive and concise, like a fortune cookie message.";

pub type TipFuture<'a> = Pin<Box<dyn Future<Output = Result<String, TipError>> + Send + 'a>>;

pub trait TipGenerator: Send + Sync {
    fn generate_tip(&self) -> TipFuture<'_>;
}

/// Resolves to a tip, or to [`FALLBACK_TIP`] on any failure or after `timeout`.
pub async fn fetch_tip(generator: &dyn TipGenerator, timeout: Duration) -> String {
    let outcome = match tokio::time::timeout(timeout, generator.generate_tip()).await {
        Ok(result) => result,
        Err(_) => Err(TipError::Timeout(timeout)),
    };

    match outcome.map(|tip| tip.trim().to_string()) {
        Ok(tip) if !tip.is_empty() => tip,
        Ok(_) => {
            error!(error = %TipError::Empty, "failed to generate focus tip");
            FALLBACK_TIP.to_string()
        }
        Err(err) => {
            error!(error = %err, "failed to generate focus tip");
            FALLBACK_TIP.to_string()
        }
    }
}

pub struct GeminiTips {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiTips {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    async fn request_tip(&self) -> Result<String, TipError> {
        let api_key = self.api_key.as_deref().ok_or(TipError::MissingApiKey)?;
        let body = json!({
            "contents": [{ "parts": [{ "text": TIP_PROMPT }] }]
        });

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(TipError::Status(resp.status()));
        }

        let payload: GenerateContentResponse = resp.json().await?;
        let text = payload.text();
        debug!(chars = text.len(), "received focus tip");
        if text.is_empty() {
            return Err(TipError::Empty);
        }
        Ok(text)
    }
}

impl TipGenerator for GeminiTips {
    fn generate_tip(&self) -> TipFuture<'_> {
        Box::pin(self.request_tip())
    }
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl TipGenerator for Fixed {
        fn generate_tip(&self) -> TipFuture<'_> {
            Box::pin(async move { Ok::<_, TipError>(self.0.to_string()) })
        }
    }

    struct Failing;

    impl TipGenerator for Failing {
        fn generate_tip(&self) -> TipFuture<'_> {
            Box::pin(async { Err::<String, _>(TipError::MissingApiKey) })
        }
    }

    struct Stalled;

    impl TipGenerator for Stalled {
        fn generate_tip(&self) -> TipFuture<'_> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, TipError>("too late".to_string())
            })
        }
    }

    #[tokio::test]
    async fn successful_tip_is_trimmed() {
        let tip = fetch_tip(&Fixed("  Breathe, then begin.\n"), Duration::from_secs(1)).await;
        assert_eq!(tip, "Breathe, then begin.");
    }

    #[tokio::test]
    async fn failure_falls_back() {
        assert_eq!(fetch_tip(&Failing, Duration::from_secs(1)).await, FALLBACK_TIP);
    }

    #[tokio::test]
    async fn blank_tip_falls_back() {
        assert_eq!(fetch_tip(&Fixed("   "), Duration::from_secs(1)).await, FALLBACK_TIP);
    }

    #[tokio::test]
    async fn slow_service_times_out_to_fallback() {
        let tip = fetch_tip(&Stalled, Duration::from_millis(50)).await;
        assert_eq!(tip, FALLBACK_TIP);
    }

    #[tokio::test]
    async fn missing_key_skips_network() {
        let gemini = GeminiTips::new("http://127.0.0.1:9", "gemini-2.5-flash", None);
        assert!(matches!(gemini.generate_tip().await, Err(TipError::MissingApiKey)));
    }

    #[tokio::test]
    async fn gemini_response_text_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"Small steps, "},{"text":"big focus.\n"}]}}]}"#,
            )
            .create_async()
            .await;

        let gemini = GeminiTips::new(server.url(), "gemini-2.5-flash", Some("test-key".to_string()));
        let tip = gemini.generate_tip().await.unwrap();
        assert_eq!(tip, "Small steps, big focus.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn gemini_error_status_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(503)
            .create_async()
            .await;

        let gemini = GeminiTips::new(server.url(), "gemini-2.5-flash", Some("test-key".to_string()));
        assert!(matches!(gemini.generate_tip().await, Err(TipError::Status(_))));
        assert_eq!(fetch_tip(&gemini, Duration::from_secs(5)).await, FALLBACK_TIP);
    }

    #[tokio::test]
    async fn gemini_without_candidates_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let gemini = GeminiTips::new(server.url(), "gemini-2.5-flash", Some("test-key".to_string()));
        assert!(matches!(gemini.generate_tip().await, Err(TipError::Empty)));
    }
}
