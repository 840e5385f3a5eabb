//! Hook Mentor GitHub webhook adapter.
//!
//! Authenticates inbound deliveries and turns them into
//! [`VerifiedDelivery`] values, the only input the dispatcher accepts.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Header names, the `sha256=<hex>` signature format, and
//! HMAC computation live here. The [`pipeline`] crate never sees raw bytes
//! or signatures.
//!
//! ## Signature scheme
//!
//! The sender computes HMAC-SHA256 over the exact request body bytes, keyed by
//! the shared webhook secret, and sends `sha256=<lowercase hex>` in
//! [`SIGNATURE_HEADER`]. Verification recomputes the MAC over the same bytes
//! and compares in constant time.

pub mod delivery;
pub mod signature;

pub use delivery::{Rejection, VerifiedDelivery, WebhookRequest};
pub use signature::{sign, verify};

/// Header carrying `sha256=<hex>`.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Header carrying the event type name.
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying the sender-assigned delivery id.
pub const DELIVERY_HEADER: &str = "x-github-delivery";
