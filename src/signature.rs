//! Request signing for authenticated web service calls.
//!
//! See <https://www.last.fm/api/authspec>, section 8.

use md5::{Digest, Md5};
use std::collections::BTreeMap;

/// Name of the signature parameter; never part of the signed input.
pub const SIGNATURE_PARAM: &str = "api_sig";

/// Compute `api_sig` for a finalized parameter set.
///
/// Keys are taken in lexicographic byte order, each immediately followed by its
/// value, the shared secret is appended, and the MD5 digest of that string is
/// returned as lowercase hex. An `api_sig` entry already present is skipped.
///
/// Must run after `method`, `api_key` and `sk` have been added: the server
/// recomputes the digest over exactly the parameters it receives.
pub fn sign(params: &BTreeMap<String, String>, secret: &str) -> String {
    let mut hasher = Md5::new();
    for (key, value) in params.iter().filter(|(key, _)| *key != SIGNATURE_PARAM) {
        hasher.update(key.as_bytes());
        hasher.update(value.as_bytes());
    }
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// MD5 hex digest of a string.
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes()))
}

/// Mobile-session auth token: `md5(username + md5(password))`.
pub fn auth_token(username: &str, password: &str) -> String {
    md5_hex(&format!("{username}{}", md5_hex(password)))
}
