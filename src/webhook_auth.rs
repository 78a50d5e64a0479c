//! Inbound webhook authentication. Deliveries carry an HMAC-SHA256 of the
//! raw body, hex-encoded, in the `x-signature` header; verification is
//! constant-time via the hmac crate.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-signature";

/// Checks the hex signature against the raw request body. Returns false
/// for malformed hex as well as a mismatched digest.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// Computes the hex signature for a body. Counterpart of
/// `verify_signature`; test senders use it to sign deliveries.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}
