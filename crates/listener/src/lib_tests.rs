use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use nodes::{RunSync, TaskGenerator};
use pipeline::{CompletionRequest, LlmError, LlmProvider, Notification, Notifier, RetryConfig};
use tower::ServiceExt;

use super::*;

const SECRET: &str = "shh";
const BODY: &str =
    r#"{"action":"opened","repository":{"full_name":"acme/widgets"},"sender":{"login":"alice"}}"#;

#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl LlmProvider for CountingProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("### 🎯 The Mission".to_string())
    }
}

#[derive(Default)]
struct CountingNotifier {
    calls: AtomicUsize,
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(&self, _notification: &Notification) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    app: Router,
    provider: Arc<CountingProvider>,
    notifier: Arc<CountingNotifier>,
}

fn harness() -> Harness {
    let provider = Arc::new(CountingProvider::default());
    let notifier = Arc::new(CountingNotifier::default());
    let dispatcher = EventDispatcher::new(
        TaskGenerator::new(provider.clone(), RetryConfig::default()),
        notifier.clone(),
        Arc::new(RunSync),
    );
    let secret = Secret::new(SECRET).unwrap();

    Harness {
        app: router(AppState::new(secret, dispatcher)),
        provider,
        notifier,
    }
}

fn post(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header("X-GitHub-Event", "issues")
        .header("X-GitHub-Delivery", "d-42")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("X-Hub-Signature-256", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_get_root_is_health_check() {
    let h = harness();

    let response = h
        .app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, HEALTH_MESSAGE);
}

#[tokio::test]
async fn test_valid_signature_is_processed() {
    let h = harness();
    let signature = github::sign(BODY.as_bytes(), SECRET);

    let response = h.app.oneshot(post(BODY, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK (AWS Processed)");
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wrong_signature_is_forbidden_without_side_effects() {
    let h = harness();
    let signature = github::sign(BODY.as_bytes(), "not-the-secret");

    let response = h.app.oneshot(post(BODY, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_signature_is_forbidden() {
    let h = harness();

    let response = h.app.oneshot(post(BODY, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_signature_over_different_bytes_is_forbidden() {
    let h = harness();
    let signature = github::sign(BODY.as_bytes(), SECRET);
    let reformatted = BODY.replace(',', ", ");

    let response = h
        .app
        .oneshot(post(&reformatted, Some(&signature)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    let h = harness();

    let response = h
        .app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
