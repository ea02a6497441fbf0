//! Background evaluation.
//!
//! Each submission gets its own thread with a current-thread tokio runtime.
//! The reply goes back over a `crossbeam-channel` so the UI thread can drain
//! it without blocking. Requests are not cancellable and not deduplicated.

use crate::assessment::AssessmentInput;
use crate::client::{EvaluationClient, EvaluationOutcome};
use crate::config::AppSettings;
use crate::session::EvaluationReply;
use crossbeam_channel::Sender;
use std::thread::JoinHandle;

/// Run one evaluation off the calling thread.
///
/// `notify` runs after the reply is sent (the GUI passes a repaint request).
/// Setup failures are reported as a failed outcome, never dropped.
pub fn spawn_evaluation<F>(
    settings: AppSettings,
    sent: AssessmentInput,
    tx: Sender<EvaluationReply>,
    notify: F,
) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    std::thread::spawn(move || {
        let outcome = run_evaluation(&settings, &sent);

        if let Err(e) = tx.send(EvaluationReply { sent, outcome }) {
            tracing::error!("Failed to send evaluation result: {e}");
        }
        notify();
    })
}

fn run_evaluation(settings: &AppSettings, sent: &AssessmentInput) -> EvaluationOutcome {
    let client = match EvaluationClient::from_settings(settings) {
        Ok(client) => client,
        Err(e) => return EvaluationOutcome::from(Err(e)),
    };

    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(client.evaluate_outcome(sent)),
        Err(e) => {
            tracing::error!("Failed to start evaluation runtime: {e}");
            EvaluationOutcome::Failure(format!("Failed to start evaluation runtime: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test(flavor = "multi_thread")]
    async fn test_spawned_evaluation_delivers_reply_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timestamp": "2024-05-01 10:00",
                "recommendations": ["Type and screen"]
            })))
            .mount(&server)
            .await;

        let settings = AppSettings {
            endpoint: format!("{}/evaluate", server.uri()),
            ..AppSettings::default()
        };
        let sent = AssessmentInput {
            age: 50,
            ..Default::default()
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let notified = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&notified);

        let handle = spawn_evaluation(settings, sent.clone(), tx, move || {
            flag.store(true, Ordering::SeqCst);
        });

        let reply = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(10)))
            .await
            .unwrap()
            .unwrap();
        handle.join().unwrap();

        assert_eq!(reply.sent, sent);
        assert_eq!(reply.outcome.recommendations(), ["Type and screen"]);
        assert!(notified.load(Ordering::SeqCst));
    }

    #[test]
    fn test_unreachable_endpoint_still_replies() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let settings = AppSettings {
            endpoint: format!("http://127.0.0.1:{port}/evaluate"),
            ..AppSettings::default()
        };
        let (tx, rx) = crossbeam_channel::unbounded();

        spawn_evaluation(settings, AssessmentInput::default(), tx, || {})
            .join()
            .unwrap();

        let reply = rx.try_recv().unwrap();
        assert!(!reply.outcome.is_success());
        let shown = reply.outcome.recommendations();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].starts_with("Error: "));
    }
}
