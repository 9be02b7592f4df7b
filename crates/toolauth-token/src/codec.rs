//! Compact three-segment token serialization.
//!
//! Segments are URL-safe base64 without padding. The signing input is
//! always the literal bytes `headerSeg.claimsSeg`, never a re-encoding
//! of the decoded claims.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::TokenError;

/// Encode raw bytes as an unpadded URL-safe base64 segment.
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode an unpadded URL-safe base64 segment back into bytes.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::MalformedSegment(e.to_string()))
}

/// Split a compact token into its header, claims and signature segments.
///
/// Fails unless the input has exactly three non-empty `.`-separated
/// segments.
pub fn split(token: &str) -> Result<(&str, &str, &str), TokenError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(claims), Some(signature), None)
            if !header.is_empty() && !claims.is_empty() && !signature.is_empty() =>
        {
            Ok((header, claims, signature))
        }
        _ => Err(TokenError::MalformedToken(format!(
            "expected 3 non-empty segments, got {}",
            token.split('.').count()
        ))),
    }
}

/// Join three segments into a compact token. Inverse of [`split`].
pub fn assemble(header: &str, claims: &str, signature: &str) -> String {
    format!("{header}.{claims}.{signature}")
}

/// The exact byte string covered by the signature.
pub fn signing_input(header: &str, claims: &str) -> String {
    format!("{header}.{claims}")
}
