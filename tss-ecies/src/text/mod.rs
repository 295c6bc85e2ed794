//! String-friendly facade over the sealed box.
//!
//! Keys travel as hex (the private key as a 32-byte big-endian scalar, the public key as a
//! compressed SEC1 point), ciphertexts as standard padded base64 and key pairs as a JSON object
//! `{"privateKey":"<hex>","publicKey":"<hex>"}`. Every function is stateless and can be called
//! from any number of threads at once.
//!
//! # Examples
//!
//! ```
//! use tss_ecies::text::{self, HexKeyPair};
//!
//! let json = text::generate_key_pair().unwrap();
//! let key_pair: HexKeyPair = serde_json::from_str(&json).unwrap();
//!
//! let ciphertext = text::encrypt("hello-tss", &key_pair.public_key).unwrap();
//! let plaintext = text::decrypt(&ciphertext, &key_pair.private_key).unwrap();
//!
//! assert_eq!(plaintext, "hello-tss");
//! ```

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ies::{KeyPair, PublicKey, SealedMessage, SecretKey};

mod error;
pub use error::{CipherError, EncodingError, KeyRole};

#[cfg(test)]
mod tests;

// KEY PAIR DOCUMENT
// ================================================================================================

/// JSON form of a key pair, as produced by [generate_key_pair].
///
/// Both fields are wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HexKeyPair {
    /// Hex-encoded secret scalar.
    pub private_key: String,
    /// Hex-encoded compressed public key.
    pub public_key: String,
}

impl From<&KeyPair> for HexKeyPair {
    fn from(key_pair: &KeyPair) -> Self {
        Self {
            private_key: key_pair.secret_key().to_hex(),
            public_key: key_pair.public_key().to_hex(),
        }
    }
}

impl TryFrom<&HexKeyPair> for KeyPair {
    type Error = CipherError;

    fn try_from(document: &HexKeyPair) -> Result<Self, Self::Error> {
        let secret_key =
            SecretKey::from_hex(&document.private_key).map_err(CipherError::private_key)?;
        let public_key =
            PublicKey::from_hex(&document.public_key).map_err(CipherError::public_key)?;

        KeyPair::from_parts(secret_key, public_key).map_err(CipherError::public_key)
    }
}

impl fmt::Debug for HexKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HexKeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

// KEY GENERATION
// ================================================================================================

/// Generates a fresh key pair from the OS random number generator and returns it as JSON.
#[cfg(feature = "std")]
pub fn generate_key_pair() -> Result<String, CipherError> {
    generate_key_pair_with_rng(&mut rand_core::OsRng)
}

/// Generates a fresh key pair from `rng` and returns it as JSON.
pub fn generate_key_pair_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
) -> Result<String, CipherError> {
    let key_pair = KeyPair::try_with_rng(rng).map_err(CipherError::KeyGeneration)?;

    let json = serde_json::to_string(&HexKeyPair::from(&key_pair))
        .map_err(|err| CipherError::Serialization(err.to_string()))?;

    debug!(public_key = %key_pair.public_key(), "generated ECIES key pair");
    Ok(json)
}

/// Parses a key pair produced by [generate_key_pair] and checks that both halves belong together.
pub fn parse_key_pair(json: &str) -> Result<KeyPair, CipherError> {
    let document: HexKeyPair =
        serde_json::from_str(json).map_err(|err| CipherError::Serialization(err.to_string()))?;

    KeyPair::try_from(&document)
}

// ENCRYPTION
// ================================================================================================

/// Encrypts `plaintext` to `public_key_hex` and returns the base64-encoded sealed message.
#[cfg(feature = "std")]
pub fn encrypt(plaintext: &str, public_key_hex: &str) -> Result<String, CipherError> {
    encrypt_with_rng(&mut rand_core::OsRng, plaintext, public_key_hex)
}

/// Encrypts `plaintext` to `public_key_hex` using `rng` for the ephemeral key and the nonce.
pub fn encrypt_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    plaintext: &str,
    public_key_hex: &str,
) -> Result<String, CipherError> {
    encrypt_bytes_with_rng(rng, plaintext.as_bytes(), public_key_hex)
}

/// Encrypts raw bytes to `public_key_hex` and returns the base64-encoded sealed message.
#[cfg(feature = "std")]
pub fn encrypt_bytes(plaintext: &[u8], public_key_hex: &str) -> Result<String, CipherError> {
    encrypt_bytes_with_rng(&mut rand_core::OsRng, plaintext, public_key_hex)
}

/// Encrypts raw bytes to `public_key_hex` using `rng` for the ephemeral key and the nonce.
pub fn encrypt_bytes_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    plaintext: &[u8],
    public_key_hex: &str,
) -> Result<String, CipherError> {
    let public_key = PublicKey::from_hex(public_key_hex).map_err(|err| {
        debug!("rejected public key");
        CipherError::public_key(err)
    })?;

    let sealed = public_key.seal(rng, plaintext).map_err(CipherError::Encryption)?;

    debug!(plaintext_len = plaintext.len(), sealed_len = sealed.len(), "sealed message");
    Ok(STANDARD.encode(sealed.to_bytes()))
}

// DECRYPTION
// ================================================================================================

/// Decrypts a base64-encoded sealed message with `private_key_hex` and returns the plaintext.
///
/// Line breaks (`\r`, `\n`) inside the base64 text are ignored, so wrapped ciphertexts decode.
///
/// Any failure of the authenticated decryption itself (wrong key, truncated or tampered message)
/// is reported as the single [CipherError::Decryption] variant.
pub fn decrypt(ciphertext: &str, private_key_hex: &str) -> Result<String, CipherError> {
    let plaintext = decrypt_bytes(ciphertext, private_key_hex)?;

    String::from_utf8(plaintext)
        .map_err(|err| CipherError::InvalidEncoding(EncodingError::Utf8(err)))
}

/// Like [decrypt], but returns the plaintext bytes without requiring them to be UTF-8.
pub fn decrypt_bytes(ciphertext: &str, private_key_hex: &str) -> Result<Vec<u8>, CipherError> {
    let secret_key = SecretKey::from_hex(private_key_hex).map_err(|err| {
        debug!("rejected private key");
        CipherError::private_key(err)
    })?;

    let bytes = if ciphertext.contains(['\r', '\n']) {
        let unwrapped: String = ciphertext.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        STANDARD.decode(unwrapped)
    } else {
        STANDARD.decode(ciphertext)
    }
    .map_err(|err| CipherError::InvalidEncoding(EncodingError::Base64(err)))?;

    let plaintext = SealedMessage::read_from_bytes(&bytes)
        .and_then(|sealed| secret_key.unseal(&sealed))
        .map_err(|_| {
            debug!(sealed_len = bytes.len(), "sealed message rejected");
            CipherError::Decryption
        })?;

    debug!(plaintext_len = plaintext.len(), "unsealed message");
    Ok(plaintext)
}
