//! Webhook signature verification
//!
//! The Messenger Platform signs every webhook delivery with HMAC-SHA1 over
//! the raw request body, keyed by the app secret. The signature arrives in
//! the `X-Hub-Signature` header as `sha1=<hex_digest>` (lowercase).
//!
//! To verify authenticity:
//! 1. Take the raw (unparsed) request body exactly as received
//! 2. Compute HMAC-SHA1 of the body using the app secret as the key
//! 3. Compare against the header value in constant time
//!
//! The signature MUST be computed on the raw body bytes, never on re-parsed
//! JSON, and the comparison must be constant-time to prevent timing attacks.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_PREFIX: &str = "sha1=";

/// Verifies an `X-Hub-Signature` header value against the raw request body
/// and the app secret key.
///
/// Returns `false` for any mismatch or malformed input: a missing `sha1=`
/// prefix, a non-hex digest, a blank key or signature. Failures are logged
/// but are indistinguishable from genuine mismatches to the caller. The
/// secret key itself is never logged.
///
/// A blank key or blank signature is a caller bug rather than a genuine
/// mismatch: the app secret is fixed configuration and the platform always
/// sends the header. Rejecting is the safe outcome either way, but hosts
/// seeing the blank-input warnings should check their configuration and
/// header extraction rather than suspect forged requests.
pub fn is_valid_request(app_secret_key: &str, signature: &str, request_body: &str) -> bool {
    if app_secret_key.trim().is_empty() {
        log::warn!("app secret key is blank; rejecting request");
        return false;
    }
    if signature.trim().is_empty() {
        log::warn!("signature header is blank; rejecting request");
        return false;
    }

    let signature_hex = match signature.strip_prefix(SIGNATURE_PREFIX) {
        Some(sig) => sig,
        None => {
            log::warn!("invalid signature header format: expected 'sha1=' prefix");
            return false;
        }
    };

    let expected_digest = match hex::decode(signature_hex) {
        Ok(digest) => digest,
        Err(e) => {
            log::warn!("failed to decode signature hex: {e}");
            return false;
        }
    };

    let mut mac = match HmacSha1::new_from_slice(app_secret_key.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            log::error!("failed to create HMAC instance: {e}");
            return false;
        }
    };

    mac.update(request_body.as_bytes());
    let computed_digest = mac.finalize().into_bytes();

    let is_valid: bool = computed_digest.ct_eq(&expected_digest[..]).into();

    if !is_valid {
        log::warn!("webhook signature verification failed: signatures do not match");
    }

    is_valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(key: &str, body: &str) -> String {
        let mut mac = HmacSha1::new_from_slice(key.as_bytes()).unwrap();
        mac.update(body.as_bytes());
        format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn known_platform_vector() {
        assert!(is_valid_request(
            "test app secret key",
            "sha1=e50ffabcd617e2e693ba706b9b02e6931cf931f3",
            "matching request body"
        ));
    }

    #[test]
    fn valid_signature() {
        let body = r#"{"object":"page","entry":[]}"#;
        let secret = "app-secret";

        assert!(is_valid_request(secret, &sign(secret, body), body));
    }

    #[test]
    fn mismatching_body() {
        assert!(!is_valid_request(
            "test app secret key",
            "sha1=e50ffabcd617e2e693ba706b9b02e6931cf931f3",
            "mismatching request body"
        ));
    }

    #[test]
    fn tampered_body() {
        let secret = "app-secret";
        let header = sign(secret, r#"{"text":"original"}"#);

        assert!(!is_valid_request(secret, &header, r#"{"text":"tampered"}"#));
    }

    #[test]
    fn wrong_secret() {
        let body = r#"{"object":"page"}"#;
        let header = sign("other-secret", body);

        assert!(!is_valid_request("app-secret", &header, body));
    }

    #[test]
    fn blank_key_or_signature() {
        assert!(!is_valid_request(
            "",
            "sha1=e50ffabcd617e2e693ba706b9b02e6931cf931f3",
            "body"
        ));
        assert!(!is_valid_request("app-secret", "", "body"));
        assert!(!is_valid_request("app-secret", "   ", "body"));
    }

    #[test]
    fn invalid_header_format() {
        // Missing prefix
        assert!(!is_valid_request("app-secret", "abc123", "body"));
        // Wrong algorithm prefix
        assert!(!is_valid_request("app-secret", "sha256=abc123", "body"));
        // Invalid hex characters
        assert!(!is_valid_request("app-secret", "sha1=zzzz", "body"));
    }
}
