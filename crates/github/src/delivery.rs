//! Authentication of raw webhook requests.

use pipeline::{DeliveryId, EventType, InboundEvent};
use thiserror::Error;
use tracing::warn;

use crate::signature::verify;

/// The parts of an HTTP webhook request the pipeline cares about.
///
/// `body` must be the exact bytes received on the wire.
#[derive(Debug, Clone, Copy)]
pub struct WebhookRequest<'a> {
    pub body: &'a [u8],
    pub signature: Option<&'a str>,
    pub event_type: Option<&'a str>,
    pub delivery_id: Option<&'a str>,
}

/// Why a request was refused. Every variant maps to HTTP 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("shared webhook secret is not configured")]
    SecretUnset,
    #[error("signature header is missing")]
    MissingSignature,
    #[error("signature does not match payload")]
    SignatureMismatch,
}

/// A delivery whose signature has been checked.
///
/// Can only be obtained from [`WebhookRequest::authenticate`], so holding one
/// proves the payload came from the holder of the shared secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedDelivery {
    event_type: EventType,
    event: InboundEvent,
    delivery_id: Option<DeliveryId>,
}

impl VerifiedDelivery {
    /// Event type from the header, or [`EventType::FALLBACK`].
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// The parsed body.
    pub fn event(&self) -> &InboundEvent {
        &self.event
    }

    /// Sender-assigned delivery id, when the header was present.
    pub fn delivery_id(&self) -> Option<&DeliveryId> {
        self.delivery_id.as_ref()
    }
}

impl<'a> WebhookRequest<'a> {
    /// Verifies the signature against `secret` and, only on success, parses
    /// the body and header metadata.
    pub fn authenticate(self, secret: &str) -> Result<VerifiedDelivery, Rejection> {
        if secret.is_empty() {
            warn!("Rejecting webhook: shared secret unset");
            return Err(Rejection::SecretUnset);
        }
        if self.signature.is_none() {
            warn!("Rejecting webhook: no signature header");
            return Err(Rejection::MissingSignature);
        }
        if !verify(self.body, self.signature, secret) {
            warn!(
                delivery_id = self.delivery_id.unwrap_or_default(),
                "Rejecting webhook: signature mismatch"
            );
            return Err(Rejection::SignatureMismatch);
        }

        Ok(VerifiedDelivery {
            event_type: EventType::from_header(self.event_type),
            event: InboundEvent::from_slice(self.body),
            delivery_id: self.delivery_id.and_then(DeliveryId::new),
        })
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
