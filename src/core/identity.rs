//! Email normalization, validation and user id derivation
//!
//! The user id is derived from the normalized email so the ticket lookup and
//! the later confirm step address the same record without a session.

use sha2::{Digest, Sha256};
use validator::ValidateEmail;

/// Normalize an email for lookup: trim surrounding whitespace and lowercase
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check that an email is well formed
///
/// Besides the RFC checks done by `validator`, the domain must be a host
/// name with a top-level domain: IP literals such as `user@[127.0.0.1]` and
/// `user@localhost` are rejected. The TLD is at least two letters, or a
/// punycode `xn--` label.
pub fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if domain.starts_with('[') {
        return false;
    }

    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && is_tld(tld))
}

fn is_tld(label: &str) -> bool {
    if let Some(encoded) = label.strip_prefix("xn--") {
        return !encoded.is_empty()
            && encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    }
    label.len() >= 2 && label.chars().all(|c| c.is_ascii_alphabetic())
}

/// Derive the deterministic user id for a normalized email
///
/// The id is the lowercase hex SHA-256 of the optional secret followed by the
/// email. Callers must pass an already normalized email.
pub fn email_to_id(email: &str, secret: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    if let Some(secret) = secret {
        hasher.update(secret.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(email.as_bytes());
    format!("{:x}", hasher.finalize())
}
