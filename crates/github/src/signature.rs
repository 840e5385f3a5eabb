//! HMAC-SHA256 webhook signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const PREFIX: &str = "sha256=";

/// Computes the `sha256=<hex>` signature of `body` under `secret`.
pub fn sign(body: &[u8], secret: &str) -> String {
    // HMAC accepts keys of any length; new_from_slice cannot fail for it.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(body);
    format!("{PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Returns `true` when `provided` is the signature of the exact `body` bytes
/// under `secret`.
///
/// Fails without computing a MAC when `provided` is absent or `secret` is
/// empty. A mismatch is a normal outcome, not an error.
pub fn verify(body: &[u8], provided: Option<&str>, secret: &str) -> bool {
    let Some(provided) = provided else {
        return false;
    };
    if secret.is_empty() {
        return false;
    }

    let Some(hex_sig) = provided.strip_prefix(PREFIX) else {
        return false;
    };
    // Signatures are rendered in lowercase hex; any other spelling is a mismatch.
    if hex_sig.bytes().any(|b| b.is_ascii_uppercase()) {
        return false;
    }
    let Ok(sig_bytes) = hex::decode(hex_sig) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);

    // verify_slice compares in constant time.
    mac.verify_slice(&sig_bytes).is_ok()
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
