//! HTTP client for the external evaluation service.
//!
//! The service receives an [`AssessmentInput`] as JSON and answers with an
//! [`EvaluationResult`]. Every way that can go wrong is folded into an
//! [`EvaluationError`], whose `Display` text is what the user sees after the
//! `Error:` prefix. Callers that only need something to show should use
//! [`EvaluationClient::evaluate_outcome`], which never fails.

use crate::assessment::{AssessmentInput, EvaluationResult};
use crate::config::AppSettings;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/evaluate";

const JSON_MIME: &str = "application/json";

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The service answered with a non-success status code.
    #[error("Network response was not ok: {0}")]
    Status(u16),

    /// The response was missing a JSON content type.
    #[error("Invalid JSON response from server")]
    InvalidContentType,

    /// Claimed to be JSON but was not the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// DNS, connection, timeout, or body read failures.
    #[error("{0}")]
    Transport(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for EvaluationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// What a finished evaluation means for the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    Success(EvaluationResult),
    Failure(String),
}

impl EvaluationOutcome {
    /// The recommendation list to show for this outcome.
    ///
    /// Failures become a single synthetic `Error: <message>` entry.
    pub fn recommendations(&self) -> Vec<String> {
        match self {
            Self::Success(result) => result.recommendations.clone(),
            Self::Failure(message) => vec![format!("Error: {message}")],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<EvaluationResult, EvaluationError>> for EvaluationOutcome {
    fn from(result: Result<EvaluationResult, EvaluationError>) -> Self {
        match result {
            Ok(result) => Self::Success(result),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

/// Posts assessments to a single evaluation endpoint.
#[derive(Debug, Clone)]
pub struct EvaluationClient {
    endpoint: String,
    client: reqwest::Client,
}

impl EvaluationClient {
    /// Create a client for `endpoint`.
    ///
    /// Without a timeout the request waits as long as the network stack does.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::Client`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, EvaluationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EvaluationError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Create a client from the persisted settings.
    ///
    /// # Errors
    ///
    /// See [`EvaluationClient::new`].
    pub fn from_settings(settings: &AppSettings) -> Result<Self, EvaluationError> {
        Self::new(
            settings.endpoint.clone(),
            settings.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `input` and decode the service's answer.
    ///
    /// Status is checked before content type, so a 500 with an HTML body
    /// reports the status.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] for non-success status, a non-JSON
    /// content type, an undecodable body, or any transport failure.
    pub async fn evaluate(
        &self,
        input: &AssessmentInput,
    ) -> Result<EvaluationResult, EvaluationError> {
        tracing::debug!(endpoint = %self.endpoint, "Sending evaluation request");

        let response = self.client.post(&self.endpoint).json(input).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Evaluation service returned an error status");
            return Err(EvaluationError::Status(status.as_u16()));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains(JSON_MIME));
        if !is_json {
            tracing::warn!("Evaluation service returned a non-JSON response");
            return Err(EvaluationError::InvalidContentType);
        }

        let body = response.bytes().await?;
        let result: EvaluationResult =
            serde_json::from_slice(&body).map_err(|e| EvaluationError::Decode(e.to_string()))?;

        tracing::info!(
            recommendations = result.recommendations.len(),
            "Evaluation completed"
        );
        Ok(result)
    }

    /// Like [`EvaluationClient::evaluate`], folded into a displayable outcome.
    pub async fn evaluate_outcome(&self, input: &AssessmentInput) -> EvaluationOutcome {
        let outcome = EvaluationOutcome::from(self.evaluate(input).await);
        if let EvaluationOutcome::Failure(message) = &outcome {
            tracing::error!("Evaluation failed: {message}");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_input() -> AssessmentInput {
        let mut input = AssessmentInput {
            age: 45,
            comorbidities: "diabetes".to_owned(),
            functional_status: "METs >4".to_owned(),
            asa_class: "2".to_owned(),
            procedure_type: String::new(),
        };
        input.set_procedure_type("Vascular");
        input
    }

    fn client_for(server: &MockServer) -> EvaluationClient {
        EvaluationClient::new(format!("{}/evaluate", server.uri()), None).unwrap()
    }

    #[test]
    fn test_error_messages_match_display_contract() {
        assert_eq!(
            EvaluationError::Status(500).to_string(),
            "Network response was not ok: 500"
        );
        assert_eq!(
            EvaluationError::InvalidContentType.to_string(),
            "Invalid JSON response from server"
        );
    }

    #[test]
    fn test_failure_outcome_shows_single_error_line() {
        let outcome = EvaluationOutcome::from(Err(EvaluationError::Status(503)));
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.recommendations(),
            ["Error: Network response was not ok: 503"]
        );
    }

    #[tokio::test]
    async fn test_evaluate_success_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "age": 45,
                "comorbidities": "diabetes",
                "functionalStatus": "METs >4",
                "asaClass": "2",
                "procedureType": "vascular"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timestamp": "2024-05-01 10:00:00",
                "recommendations": ["Monitor glucose", "ECG", "Hold metformin"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).evaluate(&sample_input()).await.unwrap();

        assert_eq!(result.timestamp, "2024-05-01 10:00:00");
        assert_eq!(
            result.recommendations,
            ["Monitor glucose", "ECG", "Hold metformin"]
        );
    }

    #[tokio::test]
    async fn test_evaluate_server_error_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "boom"})),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server).evaluate_outcome(&sample_input()).await;

        assert_eq!(
            outcome.recommendations(),
            ["Error: Network response was not ok: 500"]
        );
    }

    #[tokio::test]
    async fn test_evaluate_rejects_non_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server).evaluate_outcome(&sample_input()).await;

        assert_eq!(
            outcome.recommendations(),
            ["Error: Invalid JSON response from server"]
        );
    }

    #[tokio::test]
    async fn test_evaluate_rejects_missing_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = client_for(&server).evaluate_outcome(&sample_input()).await;

        assert_eq!(
            outcome.recommendations(),
            ["Error: Invalid JSON response from server"]
        );
    }

    #[tokio::test]
    async fn test_evaluate_accepts_json_with_charset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"timestamp":"t1","recommendations":["A"]}"#,
                "application/json; charset=utf-8",
            ))
            .mount(&server)
            .await;

        let result = client_for(&server).evaluate(&sample_input()).await.unwrap();
        assert_eq!(result.recommendations, ["A"]);
    }

    #[tokio::test]
    async fn test_evaluate_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"timestamp": 1}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .evaluate(&sample_input())
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_evaluate_connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = EvaluationClient::new(format!("http://127.0.0.1:{port}/evaluate"), None)
            .unwrap();
        let err = client.evaluate(&sample_input()).await.unwrap_err();
        assert!(matches!(err, EvaluationError::Transport(_)), "got {err:?}");

        let outcome = EvaluationOutcome::from(Err(err));
        let shown = outcome.recommendations();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_configured_timeout_fails_slow_responses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"timestamp": "t", "recommendations": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = EvaluationClient::new(
            format!("{}/evaluate", server.uri()),
            Some(Duration::from_millis(100)),
        )
        .unwrap();

        let err = client.evaluate(&sample_input()).await.unwrap_err();
        assert!(matches!(err, EvaluationError::Transport(_)), "got {err:?}");
    }

    #[test]
    fn test_from_settings_uses_configured_endpoint() {
        let settings = AppSettings {
            endpoint: "http://example.test/evaluate".to_owned(),
            ..AppSettings::default()
        };
        let client = EvaluationClient::from_settings(&settings).unwrap();
        assert_eq!(client.endpoint(), "http://example.test/evaluate");
    }
}
