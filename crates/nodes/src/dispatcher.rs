//! Event dispatcher.

use std::sync::Arc;

use github::VerifiedDelivery;
use pipeline::{JobId, Notification, Notifier};
use tracing::{info, instrument};

use crate::{Acknowledgement, CompletionStrategy, TaskGenerator};

/// Runs generate → notify for each verified delivery under the configured
/// [`CompletionStrategy`].
///
/// Holds no mutable state; concurrent dispatches share only read-only
/// handles.
#[derive(Clone)]
pub struct EventDispatcher {
    generator: TaskGenerator,
    notifier: Arc<dyn Notifier>,
    strategy: Arc<dyn CompletionStrategy>,
}

impl EventDispatcher {
    /// Creates a dispatcher over the given generator, notifier and strategy.
    pub fn new(
        generator: TaskGenerator,
        notifier: Arc<dyn Notifier>,
        strategy: Arc<dyn CompletionStrategy>,
    ) -> Self {
        Self {
            generator,
            notifier,
            strategy,
        }
    }

    /// Hands the pipeline for `delivery` to the completion strategy.
    #[instrument(skip_all, fields(
        event_type = %delivery.event_type(),
        delivery_id = delivery.delivery_id().map(|d| d.as_str()).unwrap_or("-"),
    ))]
    pub async fn dispatch(&self, delivery: VerifiedDelivery) -> Acknowledgement {
        let job_id = JobId::new_random();
        info!(%job_id, repository = delivery.event().repository(), "Dispatching delivery");

        let generator = self.generator.clone();
        let notifier = Arc::clone(&self.notifier);
        let job = Box::pin(async move {
            process(&generator, notifier.as_ref(), &delivery).await;
        });

        self.strategy.run(job_id, job).await
    }
}

/// Generates the task for `delivery` and mails it.
pub async fn process(
    generator: &TaskGenerator,
    notifier: &dyn Notifier,
    delivery: &VerifiedDelivery,
) {
    let event = delivery.event();
    let task = generator.generate(event, delivery.event_type()).await;
    let notification = Notification::for_task(delivery.event_type(), event.repository(), &task);
    notifier.notify(&notification).await;
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
