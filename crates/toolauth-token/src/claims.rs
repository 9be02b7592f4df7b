//! Claim set construction and TTL parsing.

use serde::{Deserialize, Serialize};

/// Default subject when none is supplied.
pub const DEFAULT_SUBJECT: &str = "dev-user";

/// Default issuer URI.
pub const DEFAULT_ISSUER: &str = "http://localhost:8000";

/// Default audience identifier.
pub const DEFAULT_AUDIENCE: &str = "my-mcp-server";

/// Default scopes granted when none are supplied.
pub const DEFAULT_SCOPES: &[&str] = &["read", "write"];

/// Default time-to-live string.
pub const DEFAULT_EXPIRES_IN: &str = "1h";

/// Fallback TTL in seconds for unrecognized duration strings.
const FALLBACK_TTL_SECS: i64 = 3600;

/// Caller-supplied options for token issuance. All fields are optional;
/// missing ones fall back to the documented defaults.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    /// Token subject (identity of the bearer).
    pub subject: Option<String>,

    /// Issuer URI.
    pub issuer: Option<String>,

    /// Intended audience.
    pub audience: Option<String>,

    /// Capability scopes, in the order they should appear in the token.
    pub scopes: Option<Vec<String>>,

    /// Time-to-live, a count with a trailing unit (`30s`, `5m`, `2h`, `1d`).
    pub expires_in: Option<String>,
}

/// The signed payload of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (bearer identity).
    pub sub: String,

    /// Issuer URI.
    pub iss: String,

    /// Intended audience.
    pub aud: String,

    /// Space-joined scopes, in the order they were supplied.
    pub scope: String,

    /// Issued-at, unix seconds. Captured once at issuance.
    pub iat: i64,

    /// Expires-at, unix seconds. Always `iat` + parsed TTL.
    pub exp: i64,
}

/// Token header. Constant for every token this crate produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Signature scheme identifier.
    pub alg: String,

    /// Token type identifier.
    pub typ: String,
}

impl Header {
    /// The RS256 header used for all issued tokens.
    pub fn rs256() -> Self {
        Self {
            alg: "RS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Build the claim set for a token issued at `now` (unix seconds).
///
/// Pure: same options and timestamp always produce the same claims.
/// Scope order is preserved verbatim, duplicates included, so callers
/// get back exactly what they submitted.
pub fn build(options: &TokenOptions, now: i64) -> Claims {
    let scope = match &options.scopes {
        Some(scopes) => scopes.join(" "),
        None => DEFAULT_SCOPES.join(" "),
    };

    let ttl = parse_expires_in(
        options
            .expires_in
            .as_deref()
            .unwrap_or(DEFAULT_EXPIRES_IN),
    );

    Claims {
        sub: options
            .subject
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        iss: options
            .issuer
            .clone()
            .unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
        aud: options
            .audience
            .clone()
            .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
        scope,
        iat: now,
        exp: now + ttl,
    }
}

/// Parse a TTL string like `"30s"`, `"5m"`, `"2h"`, `"1d"` into seconds.
///
/// An unrecognized or missing unit, or an unparsable count, falls back
/// to one hour. The leniency is deliberate: hand-typed TTL strings must
/// never make issuance fail.
pub fn parse_expires_in(expires_in: &str) -> i64 {
    let trimmed = expires_in.trim();
    let mut chars = trimmed.chars();
    let Some(unit) = chars.next_back() else {
        return FALLBACK_TTL_SECS;
    };
    let Ok(value) = chars.as_str().parse::<i64>() else {
        return FALLBACK_TTL_SECS;
    };

    match unit {
        's' => value,
        'm' => value * 60,
        'h' => value * 3600,
        'd' => value * 86400,
        _ => FALLBACK_TTL_SECS,
    }
}
