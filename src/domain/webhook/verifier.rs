//! Webhook signature verification.
//!
//! PerfectPay signs each delivery with HMAC-SHA256 over the request body,
//! hex-encoded in the `x-perfectpay-signature` header. Verification prefers
//! the raw bytes as received; when only a parsed value is available the
//! payload is re-serialized with lexicographically sorted keys, which is the
//! canonical form the provider signs. The sorted-key fallback is best-effort
//! and loses fidelity on numeric formatting, so the raw body should be used
//! whenever the transport preserves it.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies provider signatures against a shared secret.
pub struct SignatureVerifier {
    secret: String,
    sandbox: bool,
}

impl SignatureVerifier {
    /// `sandbox` skips verification entirely. It is a deployment flag for
    /// test environments; config validation refuses it in production.
    pub fn new(secret: impl Into<String>, sandbox: bool) -> Self {
        Self {
            secret: secret.into(),
            sandbox,
        }
    }

    /// Checks a signature header against the payload.
    ///
    /// Returns `false` (never panics) when the secret is empty, the header is
    /// absent or not valid hex, or the digest does not match. Comparison is
    /// constant-time.
    pub fn verify(
        &self,
        raw_payload: Option<&[u8]>,
        parsed: &serde_json::Value,
        signature_header: Option<&str>,
    ) -> bool {
        if self.sandbox {
            return true;
        }
        if self.secret.is_empty() {
            return false;
        }
        let Some(header) = signature_header else {
            return false;
        };

        // Providers and proxies occasionally pad or wrap the header value.
        let cleaned: String = header.chars().filter(|c| !c.is_whitespace()).collect();
        let Ok(claimed) = hex::decode(&cleaned) else {
            return false;
        };

        let expected = match raw_payload {
            Some(bytes) => compute_hmac(&self.secret, bytes),
            None => compute_hmac(&self.secret, canonical_json(parsed).as_bytes()),
        };
        let Some(expected) = expected else {
            return false;
        };

        expected.ct_eq(&claimed).into()
    }
}

fn compute_hmac(secret: &str, payload: &[u8]) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload);
    Some(mac.finalize().into_bytes().to_vec())
}

/// Hex-encoded signature for a payload. Used by test fixtures and by
/// operators replaying deliveries against a local instance.
pub fn sign(secret: &str, payload: &[u8]) -> String {
    match compute_hmac(secret, payload) {
        Some(digest) => hex::encode(digest),
        None => String::new(),
    }
}

/// Serializes a JSON value with object keys in lexicographic order at every
/// nesting level.
pub fn canonical_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "whsec_test_secret";

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new(SECRET, false)
    }

    #[test]
    fn valid_signature_over_raw_body_verifies() {
        let body = br#"{"event":"payment.approved","amount":27.0}"#;
        let signature = sign(SECRET, body);

        assert!(verifier().verify(
            Some(body),
            &serde_json::Value::Null,
            Some(&signature)
        ));
    }

    #[test]
    fn tampered_body_fails() {
        let body = br#"{"event":"payment.approved","amount":27.0}"#;
        let signature = sign(SECRET, body);
        let tampered = br#"{"event":"payment.approved","amount":270.0}"#;

        assert!(!verifier().verify(
            Some(tampered),
            &serde_json::Value::Null,
            Some(&signature)
        ));
    }

    #[test]
    fn missing_header_fails() {
        assert!(!verifier().verify(Some(b"{}"), &serde_json::Value::Null, None));
    }

    #[test]
    fn empty_secret_fails_even_with_matching_digest() {
        let body = b"{}";
        let signature = sign("", body);
        let v = SignatureVerifier::new("", false);

        assert!(!v.verify(Some(body), &serde_json::Value::Null, Some(&signature)));
    }

    #[test]
    fn non_hex_header_fails() {
        assert!(!verifier().verify(
            Some(b"{}"),
            &serde_json::Value::Null,
            Some("not-hex-at-all")
        ));
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let body = b"payload";
        let signature = sign(SECRET, body);
        let padded = format!("  {}\n", signature);

        assert!(verifier().verify(Some(body), &serde_json::Value::Null, Some(&padded)));
    }

    #[test]
    fn sandbox_bypasses_verification() {
        let v = SignatureVerifier::new(SECRET, true);
        assert!(v.verify(Some(b"{}"), &serde_json::Value::Null, Some("bogus")));
        assert!(v.verify(Some(b"{}"), &serde_json::Value::Null, None));
    }

    #[test]
    fn parsed_fallback_uses_sorted_keys() {
        let parsed = serde_json::json!({
            "zulu": 1,
            "alpha": {"beta": true, "aaa": [1, 2]},
        });
        let canonical = canonical_json(&parsed);
        assert_eq!(canonical, r#"{"alpha":{"aaa":[1,2],"beta":true},"zulu":1}"#);

        let signature = sign(SECRET, canonical.as_bytes());
        assert!(verifier().verify(None, &parsed, Some(&signature)));
    }

    proptest! {
        #[test]
        fn sign_then_verify_round_trips(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let signature = sign(SECRET, &payload);
            prop_assert!(verifier().verify(
                Some(&payload),
                &serde_json::Value::Null,
                Some(&signature)
            ));
        }

        #[test]
        fn wrong_secret_never_verifies(payload in proptest::collection::vec(any::<u8>(), 1..512)) {
            let signature = sign("a-different-secret", &payload);
            prop_assert!(!verifier().verify(
                Some(&payload),
                &serde_json::Value::Null,
                Some(&signature)
            ));
        }
    }
}
