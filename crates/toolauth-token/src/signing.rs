//! RS256 signing and verification primitives.
//!
//! RSA signatures over a SHA-256 digest with PKCS#1 v1.5 padding.
//! The padding scheme must match on both sides; PSS is not used.

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Sign the signing input with the private key, returning raw
/// signature bytes.
pub fn sign(signing_input: &[u8], private_key: &RsaPrivateKey) -> Vec<u8> {
    let signing_key = SigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key.sign(signing_input);
    signature.to_bytes().as_ref().to_vec()
}

/// Verify a signature over the signing input against the public key.
///
/// Pure predicate: malformed signature bytes yield `false`, never a
/// panic or an error.
pub fn verify(signing_input: &[u8], signature: &[u8], public_key: &RsaPublicKey) -> bool {
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    verifying_key.verify(signing_input, &signature).is_ok()
}
