//! Public-key token derivation for strong-named assemblies.
//!
//! A strong name carries either the full RSA public key or its 8-byte token. The token
//! is derived from the key with the CLR algorithm specified by ECMA-335 II.6.2.1.3:
//! hash the key blob, take the last 8 bytes of the digest, and reverse them. SHA-1 is
//! the algorithm every mainstream runtime uses; MD5 remains valid per the
//! `AssemblyHashAlgorithm` metadata enumeration and is supported for completeness.
//!
//! # Examples
//!
//! ```rust
//! use asmbind::identity::strongname::{compute_public_key_token, HashAlgorithm};
//!
//! // The ECMA "standard public key" from ECMA-335 II.6.2.1.3.
//! let ecma_key = [
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//!     0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//! ];
//! let token = compute_public_key_token(&ecma_key, HashAlgorithm::Sha1);
//! assert_eq!(hex::encode(&token), "b77a5c561934e089");
//! ```

use md5::{Digest, Md5};
use sha1::Sha1;

/// Size in bytes of a public key token.
pub const PUBLIC_KEY_TOKEN_SIZE: usize = 8;

/// Hash algorithm used to derive a public-key token.
///
/// Mirrors the subset of the ECMA-335 `AssemblyHashAlgorithm` enumeration that is
/// meaningful for token derivation. [`Sha1`](HashAlgorithm::Sha1) is the CLR default
/// and the only algorithm observed in real assemblies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// MD5 (`AssemblyHashAlgorithm` 0x8003)
    Md5,
    /// SHA-1 (`AssemblyHashAlgorithm` 0x8004), the CLR default
    Sha1,
}

/// Derive the 8-byte public-key token from a full public key.
///
/// The token is the last [`PUBLIC_KEY_TOKEN_SIZE`] bytes of the digest over the key
/// blob, in reverse order. The function is a pure transformation of its input; callers
/// memoize the result where the key is long-lived.
///
/// # Arguments
///
/// * `public_key` - The full public key blob as stored in metadata
/// * `algorithm` - The digest to apply; [`HashAlgorithm::Sha1`] for CLR semantics
///
/// # Returns
///
/// The derived token, always exactly [`PUBLIC_KEY_TOKEN_SIZE`] bytes.
#[must_use]
pub fn compute_public_key_token(public_key: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    let digest = match algorithm {
        HashAlgorithm::Md5 => {
            let mut hasher = Md5::new();
            hasher.update(public_key);
            hasher.finalize().to_vec()
        }
        HashAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            hasher.update(public_key);
            hasher.finalize().to_vec()
        }
    };

    let mut token = digest[digest.len() - PUBLIC_KEY_TOKEN_SIZE..].to_vec();
    token.reverse();
    token
}
