use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 of the compact JSON form. Object keys serialize in sorted order,
/// so equal records always hash equal.
pub(crate) fn fingerprint(body: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
