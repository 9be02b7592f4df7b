//! Token issuance and verification.

use chrono::Utc;

use crate::claims::{self, Claims, Header, TokenOptions};
use crate::codec;
use crate::error::TokenError;
use crate::keys::KeyStore;
use crate::signing;

/// Issues and verifies RS256 bearer tokens backed by a [`KeyStore`].
///
/// Verification is recomputed fresh on every call; there is no token
/// registry or revocation list.
pub struct TokenService {
    keys: KeyStore,
}

impl TokenService {
    /// Create a token service over the given key store.
    pub fn new(keys: KeyStore) -> Self {
        Self { keys }
    }

    /// The backing key store.
    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    /// Mutable access to the backing key store, for load/generate.
    pub fn keys_mut(&mut self) -> &mut KeyStore {
        &mut self.keys
    }

    /// Issue a signed token for the given options.
    ///
    /// Fails only with [`TokenError::KeyNotLoaded`] or a serialization
    /// fault.
    pub fn issue(&self, options: &TokenOptions) -> Result<String, TokenError> {
        self.issue_at(options, Utc::now().timestamp())
    }

    /// Verify a token and return its claims.
    ///
    /// Check order is fixed: structure, then signature, then claims
    /// decoding, then expiry. A tampered-but-unexpired token reports
    /// [`TokenError::InvalidSignature`], never expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    fn issue_at(&self, options: &TokenOptions, now: i64) -> Result<String, TokenError> {
        let private_key = self.keys.signing_key().ok_or(TokenError::KeyNotLoaded {
            operation: "issue",
            key: "private",
        })?;

        let header_seg = codec::encode_segment(&serde_json::to_vec(&Header::rs256())?);
        let claims = claims::build(options, now);
        let claims_seg = codec::encode_segment(&serde_json::to_vec(&claims)?);

        let signing_input = codec::signing_input(&header_seg, &claims_seg);
        let signature = signing::sign(signing_input.as_bytes(), private_key);

        tracing::debug!(sub = %claims.sub, exp = claims.exp, "issued token");

        Ok(codec::assemble(
            &header_seg,
            &claims_seg,
            &codec::encode_segment(&signature),
        ))
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let public_key = self.keys.verifying_key().ok_or(TokenError::KeyNotLoaded {
            operation: "verify",
            key: "public",
        })?;

        let (header_seg, claims_seg, signature_seg) = codec::split(token)?;

        // An undecodable signature segment is treated as a failed
        // signature, not a malformed token.
        let signature =
            codec::decode_segment(signature_seg).map_err(|_| TokenError::InvalidSignature)?;

        let signing_input = codec::signing_input(header_seg, claims_seg);
        if !signing::verify(signing_input.as_bytes(), &signature, public_key) {
            return Err(TokenError::InvalidSignature);
        }

        let claims_bytes = codec::decode_segment(claims_seg)?;
        let claims: Claims = serde_json::from_slice(&claims_bytes)
            .map_err(|e| TokenError::MalformedToken(format!("invalid claims JSON: {e}")))?;

        if claims.exp < now {
            return Err(TokenError::TokenExpired {
                expired_at: claims.exp,
                now,
            });
        }

        Ok(claims)
    }
}

/// Decode a token's claims without verifying the signature or expiry.
///
/// For inspection and debugging only; never trust the result.
pub fn decode_unverified(token: &str) -> Result<Claims, TokenError> {
    let (_, claims_seg, _) = codec::split(token)?;
    let claims_bytes = codec::decode_segment(claims_seg)?;
    serde_json::from_slice(&claims_bytes)
        .map_err(|e| TokenError::MalformedToken(format!("invalid claims JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyStore;
    use tempfile::tempdir;

    fn loaded_service(dir: &std::path::Path) -> TokenService {
        let mut keys = KeyStore::new(dir.join("private.pem"), dir.join("public.pem"));
        keys.generate().unwrap();
        TokenService::new(keys)
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let dir = tempdir().unwrap();
        let service = loaded_service(dir.path());

        let options = TokenOptions {
            subject: Some("alice@example.com".to_string()),
            issuer: Some("https://auth.example.com".to_string()),
            audience: Some("tool-server".to_string()),
            scopes: Some(vec!["tools:read".to_string(), "tools:call".to_string()]),
            expires_in: Some("2h".to_string()),
        };

        let token = service.issue(&options).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.iss, "https://auth.example.com");
        assert_eq!(claims.aud, "tool-server");
        assert_eq!(claims.scope, "tools:read tools:call");
        assert_eq!(claims.exp - claims.iat, 7200);
    }

    #[test]
    fn test_tampered_claims_fail_as_invalid_signature() {
        let dir = tempdir().unwrap();
        let service = loaded_service(dir.path());

        let token = service.issue(&TokenOptions::default()).unwrap();
        let (header_seg, claims_seg, signature_seg) = codec::split(&token).unwrap();

        let mut claims_bytes = codec::decode_segment(claims_seg).unwrap();
        claims_bytes[10] ^= 0x01;
        let forged = codec::assemble(
            header_seg,
            &codec::encode_segment(&claims_bytes),
            signature_seg,
        );

        assert!(matches!(
            service.verify(&forged),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_header_fails_as_invalid_signature() {
        let dir = tempdir().unwrap();
        let service = loaded_service(dir.path());

        let token = service.issue(&TokenOptions::default()).unwrap();
        let (header_seg, claims_seg, signature_seg) = codec::split(&token).unwrap();

        let mut header_bytes = codec::decode_segment(header_seg).unwrap();
        header_bytes[2] ^= 0x01;
        let forged = codec::assemble(
            &codec::encode_segment(&header_bytes),
            claims_seg,
            signature_seg,
        );

        assert!(matches!(
            service.verify(&forged),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_fails_after_signature_passes() {
        let dir = tempdir().unwrap();
        let service = loaded_service(dir.path());

        let options = TokenOptions {
            expires_in: Some("1s".to_string()),
            ..Default::default()
        };
        let now = 1_700_000_000;
        let token = service.issue_at(&options, now).unwrap();

        // Still valid when verified immediately.
        assert!(service.verify_at(&token, now).is_ok());

        // Two seconds later it is past expiry.
        assert!(matches!(
            service.verify_at(&token, now + 2),
            Err(TokenError::TokenExpired { expired_at, now: seen })
                if expired_at == now + 1 && seen == now + 2
        ));
    }

    #[test]
    fn test_expired_and_tampered_reports_tampering() {
        let dir = tempdir().unwrap();
        let service = loaded_service(dir.path());

        let options = TokenOptions {
            expires_in: Some("1s".to_string()),
            ..Default::default()
        };
        let now = 1_700_000_000;
        let token = service.issue_at(&options, now).unwrap();

        let (header_seg, claims_seg, signature_seg) = codec::split(&token).unwrap();
        let mut claims_bytes = codec::decode_segment(claims_seg).unwrap();
        claims_bytes[5] ^= 0x01;
        let forged = codec::assemble(
            header_seg,
            &codec::encode_segment(&claims_bytes),
            signature_seg,
        );

        // Signature check comes first even though the token has expired.
        assert!(matches!(
            service.verify_at(&forged, now + 100),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_cross_key_rejection() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();
        let service_a = loaded_service(dir_a.path());
        let service_b = loaded_service(dir_b.path());

        let token = service_a.issue(&TokenOptions::default()).unwrap();

        assert!(matches!(
            service_b.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_inputs() {
        let dir = tempdir().unwrap();
        let service = loaded_service(dir.path());

        assert!(matches!(
            service.verify("abc"),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            service.verify("not.a.token.at.all"),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_operations_require_loaded_keys() {
        let dir = tempdir().unwrap();
        let keys = KeyStore::new(dir.path().join("private.pem"), dir.path().join("public.pem"));
        let service = TokenService::new(keys);

        assert!(matches!(
            service.issue(&TokenOptions::default()),
            Err(TokenError::KeyNotLoaded {
                operation: "issue",
                ..
            })
        ));
        assert!(matches!(
            service.verify("a.b.c"),
            Err(TokenError::KeyNotLoaded {
                operation: "verify",
                ..
            })
        ));
    }

    #[test]
    fn test_verify_with_public_only_store() {
        let dir = tempdir().unwrap();
        let issuer = loaded_service(dir.path());
        let token = issuer.issue(&TokenOptions::default()).unwrap();

        let verify_dir = tempdir().unwrap();
        std::fs::copy(
            dir.path().join("public.pem"),
            verify_dir.path().join("public.pem"),
        )
        .unwrap();

        let mut keys = KeyStore::new(
            verify_dir.path().join("private.pem"),
            verify_dir.path().join("public.pem"),
        );
        assert!(keys.load_public().unwrap());
        let verifier = TokenService::new(keys);

        assert!(verifier.verify(&token).is_ok());

        // The public half alone must not permit issuance.
        assert!(matches!(
            verifier.issue(&TokenOptions::default()),
            Err(TokenError::KeyNotLoaded {
                operation: "issue",
                ..
            })
        ));
    }

    #[test]
    fn test_decode_unverified_reads_claims_without_keys() {
        let dir = tempdir().unwrap();
        let service = loaded_service(dir.path());

        let options = TokenOptions {
            subject: Some("bob".to_string()),
            ..Default::default()
        };
        let token = service.issue(&options).unwrap();

        let claims = decode_unverified(&token).unwrap();
        assert_eq!(claims.sub, "bob");
    }
}
