//! Token management commands.
//!
//! `toolauth token issue` - Issue a signed bearer token.
//! `toolauth token verify` - Verify a token and print its claims.
//! `toolauth token inspect` - Print a token's claims without verifying.

use std::path::Path;

use anyhow::Context;
use toolauth_token::{KeyStore, TokenOptions, TokenService, decode_unverified};

/// Build a token service whose keys are loaded from the given paths.
///
/// Keys must already exist; use `toolauth keys generate` to provision
/// them first.
fn load_service(private_key_path: &Path, public_key_path: &Path) -> anyhow::Result<TokenService> {
    let mut store = KeyStore::new(private_key_path, public_key_path);
    let loaded = store
        .load()
        .with_context(|| format!("failed to load keys from {}", private_key_path.display()))?;
    if !loaded {
        anyhow::bail!(
            "no keypair found at {} / {}. Run `toolauth keys generate` first",
            private_key_path.display(),
            public_key_path.display()
        );
    }
    Ok(TokenService::new(store))
}

/// Issue a signed bearer token and print it.
pub fn issue(
    private_key_path: &Path,
    public_key_path: &Path,
    subject: Option<String>,
    issuer: Option<String>,
    audience: Option<String>,
    scopes: Option<String>,
    expires: Option<String>,
) -> anyhow::Result<()> {
    let service = load_service(private_key_path, public_key_path)?;

    let options = TokenOptions {
        subject,
        issuer,
        audience,
        scopes: scopes.map(|s| s.split(',').map(|p| p.trim().to_string()).collect()),
        expires_in: expires,
    };

    let token = service.issue(&options)?;
    println!("{token}");

    Ok(())
}

/// Verify a token and print its claims as JSON.
///
/// Needs only the public key artifact.
pub fn verify(token: &str, public_key_path: &Path) -> anyhow::Result<()> {
    let mut store = KeyStore::verification_only(public_key_path);
    let loaded = store
        .load_public()
        .with_context(|| format!("failed to load public key from {}", public_key_path.display()))?;
    if !loaded {
        anyhow::bail!(
            "no public key found at {}. Run `toolauth keys generate` first",
            public_key_path.display()
        );
    }
    let service = TokenService::new(store);

    let claims = service.verify(token).context("token verification failed")?;
    println!("{}", serde_json::to_string_pretty(&claims)?);

    Ok(())
}

/// Print a token's claims without verifying the signature or expiry.
pub fn inspect(token: &str) -> anyhow::Result<()> {
    let claims = decode_unverified(token)?;
    println!("{}", serde_json::to_string_pretty(&claims)?);
    println!();
    println!("Note: claims are unverified. Use `toolauth token verify` to check them.");

    Ok(())
}
