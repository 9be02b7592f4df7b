//! Error types for token operations.

use thiserror::Error;

/// Errors that can occur during key and token operations.
///
/// Every variant is terminal to the operation that raised it; callers
/// decide whether to refresh, reject, or alert based on the kind.
#[derive(Debug, Error)]
pub enum TokenError {
    /// An operation was attempted before the required key was loaded.
    #[error("{operation} requires the {key} key; call load() or generate() first")]
    KeyNotLoaded {
        /// The operation that needed the key ("issue" or "verify").
        operation: &'static str,
        /// Which half was missing ("private" or "public").
        key: &'static str,
    },

    /// Token input is structurally invalid.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// A token segment is not valid URL-safe base64.
    #[error("malformed token segment: {0}")]
    MalformedSegment(String),

    /// Signature did not verify against the public key.
    #[error("token signature verification failed")]
    InvalidSignature,

    /// Signature was valid but the token is past its expiry.
    #[error("token expired at {expired_at} (now {now})")]
    TokenExpired { expired_at: i64, now: i64 },

    /// Failed to generate a keypair.
    #[error("failed to generate keypair: {0}")]
    KeyGenerationFailed(String),

    /// Failed to parse private key PEM.
    #[error("failed to parse private key: {0}")]
    InvalidPrivateKey(String),

    /// Failed to parse public key PEM.
    #[error("failed to parse public key: {0}")]
    InvalidPublicKey(String),

    /// Exactly one key artifact exists on disk. Regenerating over it
    /// would pair halves from different generation events.
    #[error("incomplete keypair on disk: {present} exists but {missing} is missing")]
    IncompleteKeyPair { present: String, missing: String },

    /// Key storage read/write fault other than not-found.
    #[error("key storage I/O error: {0}")]
    KeyIo(#[from] std::io::Error),

    /// Failed to serialize header or claims.
    #[error("claims serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
