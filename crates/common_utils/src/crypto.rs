//! Message signing used by processors with request-signature authentication.

use error_stack::ResultExt;
use ring::{digest, hmac};

use crate::errors::{CryptoError, CustomResult};

/// Algorithms that can sign a message with a shared secret.
pub trait SignMessage: Send + Sync {
    /// Sign `msg` with `secret`, returning the raw signature bytes.
    fn sign_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError>;
}

/// Algorithms that can verify a detached signature.
pub trait VerifySignature: Send + Sync {
    /// Check `signature` over `msg` with `secret`.
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError>;
}

/// HMAC-SHA256.
#[derive(Debug, Clone, Copy)]
pub struct HmacSha256;

impl SignMessage for HmacSha256 {
    fn sign_message(&self, secret: &[u8], msg: &[u8]) -> CustomResult<Vec<u8>, CryptoError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        Ok(hmac::sign(&key, msg).as_ref().to_vec())
    }
}

impl VerifySignature for HmacSha256 {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        Ok(hmac::verify(&key, msg, signature).is_ok())
    }
}

/// SHA-256 digest of `payload`, for signature schemes that sign a body hash.
pub fn sha256_digest(payload: &[u8]) -> Vec<u8> {
    digest::digest(&digest::SHA256, payload).as_ref().to_vec()
}

/// Decode a base64 secret before signing, for processors that distribute
/// their shared key base64-encoded.
pub fn decode_base64_secret(secret: &str) -> CustomResult<Vec<u8>, CryptoError> {
    use base64::Engine;

    crate::consts::BASE64_ENGINE
        .decode(secret)
        .change_context(CryptoError::MessageSigningFailed)
}

#[cfg(test)]
mod tests {
    use base64::Engine;

    use super::*;
    use crate::consts::BASE64_ENGINE;

    #[test]
    fn hmac_sha256_is_deterministic() {
        let first = HmacSha256
            .sign_message(b"key", b"payload")
            .expect("signing cannot fail");
        let second = HmacSha256
            .sign_message(b"key", b"payload")
            .expect("signing cannot fail");
        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
    }

    #[test]
    fn hmac_sha256_round_trips_verification() {
        let signature = HmacSha256
            .sign_message(b"key", b"payload")
            .expect("signing cannot fail");
        assert!(HmacSha256
            .verify_signature(b"key", &signature, b"payload")
            .expect("verification cannot fail"));
        assert!(!HmacSha256
            .verify_signature(b"key", &signature, b"other payload")
            .expect("verification cannot fail"));
    }

    #[test]
    fn known_vector_matches() {
        // RFC 4231 test case 2.
        let signature = HmacSha256
            .sign_message(b"Jefe", b"what do ya want for nothing?")
            .expect("signing cannot fail");
        assert_eq!(
            BASE64_ENGINE.encode(signature),
            "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM="
        );
    }
}
