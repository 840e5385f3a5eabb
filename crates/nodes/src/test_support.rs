//! Hand-written port fakes shared by this crate's tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use github::{sign, VerifiedDelivery, WebhookRequest};
use pipeline::{CompletionRequest, LlmError, LlmProvider, Notification, Notifier};
use tokio::sync::Notify;

/// Replays scripted results; repeats the last one once the script runs out.
pub(crate) struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new(script: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

pub(crate) fn rate_limited() -> LlmError {
    LlmError::RateLimited {
        message: "Resource has been exhausted".to_string(),
        retry_after: None,
    }
}

pub(crate) fn rate_limited_after(secs: u64) -> LlmError {
    LlmError::RateLimited {
        message: "slow down".to_string(),
        retry_after: Some(Duration::from_secs(secs)),
    }
}

fn replay(result: &Result<String, LlmError>) -> Result<String, LlmError> {
    match result {
        Ok(text) => Ok(text.clone()),
        Err(LlmError::RateLimited {
            message,
            retry_after,
        }) => Err(LlmError::RateLimited {
            message: message.clone(),
            retry_after: *retry_after,
        }),
        Err(LlmError::Status { status, message }) => Err(LlmError::Status {
            status: *status,
            message: message.clone(),
        }),
        Err(LlmError::Transport(m)) => Err(LlmError::Transport(m.clone())),
        Err(LlmError::MalformedResponse(m)) => Err(LlmError::MalformedResponse(m.clone())),
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());

        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            replay(script.front().unwrap())
        }
    }
}

/// Records every notification and wakes waiters.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    delivered: Notify,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits until at least `count` notifications were recorded.
    pub(crate) async fn wait_for(&self, count: usize) {
        loop {
            let notified = self.delivered.notified();
            if self.sent.lock().unwrap().len() >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) {
        self.sent.lock().unwrap().push(notification.clone());
        self.delivered.notify_waiters();
    }
}

pub(crate) const SECRET: &str = "test-secret";

/// A signed and verified delivery for `body` / `event_type`.
pub(crate) fn delivery(body: &str, event_type: &str) -> VerifiedDelivery {
    let signature = sign(body.as_bytes(), SECRET);
    WebhookRequest {
        body: body.as_bytes(),
        signature: Some(&signature),
        event_type: Some(event_type),
        delivery_id: Some("delivery-1"),
    }
    .authenticate(SECRET)
    .unwrap()
}
