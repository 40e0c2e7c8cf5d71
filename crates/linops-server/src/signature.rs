//! Webhook signature verification.
//!
//! Linear signs each delivery with HMAC-SHA256 over the raw request body,
//! sent lowercase-hex in the `linear-signature` header. Verification must
//! run against the exact bytes received, before any JSON parsing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Check `signature_hex` against the HMAC-SHA256 of `body`.
///
/// Comparison happens inside `verify_slice`, which is constant-time. Any
/// malformed input (odd-length or non-hex signature) fails closed.
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Some(expected) = decode_hex(signature_hex) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Produce the lowercase-hex signature for `body`. Used by tests and by
/// local tooling that replays deliveries.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    let digest = mac.finalize().into_bytes();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}
