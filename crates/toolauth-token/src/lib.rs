//! # toolauth-token
//!
//! RSA-signed bearer token handling for Toolauth tool servers.
//!
//! This crate provides functionality for:
//! - Generating and persisting 2048-bit RSA keypairs (PKCS8/SPKI PEM)
//! - Issuing RS256-signed bearer tokens with subject, issuer, audience,
//!   scope and expiry claims
//! - Verifying tokens: signature check first, then expiry enforcement
//!
//! ## Token Format
//!
//! Tokens are compact three-segment strings,
//! `header.claims.signature`, where each segment is URL-safe base64
//! without padding. The signature covers the exact bytes
//! `header.claims`, so verification never re-serializes the claims.
//!
//! | Outcome | Error |
//! |---------|-------|
//! | Structurally invalid input | [`TokenError::MalformedToken`] |
//! | Signature mismatch | [`TokenError::InvalidSignature`] |
//! | Valid signature, past expiry | [`TokenError::TokenExpired`] |
//!
//! The distinction matters downstream: an expired token calls for a
//! refresh, a tampered one for an alert.

pub mod claims;
pub mod codec;
pub mod error;
pub mod keys;
pub mod service;
pub mod signing;

pub use claims::{Claims, Header, TokenOptions};
pub use error::TokenError;
pub use keys::{KeyPair, KeyStore};
pub use service::{TokenService, decode_unverified};
