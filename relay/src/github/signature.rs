//! GitHub webhook signature verification.
//!
//! GitHub signs webhook deliveries with HMAC-SHA256 over the raw request
//! body and sends the hex digest in the `X-Hub-Signature-256` header.
//! Reference: https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Verify a GitHub webhook signature.
///
/// Computes `sha256=` + the hex HMAC-SHA256 digest of `payload` under
/// `secret` and compares it against the received header value in
/// constant time.
///
/// # Arguments
///
/// * `secret` - The configured webhook secret
/// * `signature_header` - The raw `X-Hub-Signature-256` header value
/// * `payload` - The request body, byte-for-byte as received
///
/// # Returns
///
/// `true` only when the secret is configured, the header is present,
/// and the digests match. An unconfigured secret never accepts a
/// request.
pub fn verify_github_signature(secret: &str, signature_header: &str, payload: &[u8]) -> bool {
    if secret.is_empty() || signature_header.is_empty() {
        warn!(
            has_secret = !secret.is_empty(),
            has_signature = !signature_header.is_empty(),
            "github_signature_missing_fields"
        );
        return false;
    }

    // Hmac::new_from_slice accepts keys of any length, so this cannot
    // fail for a non-empty secret, but the guard keeps the function
    // total.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("github_signature_invalid_key");
            return false;
        }
    };

    mac.update(payload);

    let expected = format!("sha256={}", hex::encode(mac.finalize().into_bytes()));

    let valid = constant_time_compare(&expected, signature_header);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = signature_header.len(),
            "github_signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Differing lengths fail immediately; the byte loop otherwise touches
/// every position regardless of where the first difference is.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
