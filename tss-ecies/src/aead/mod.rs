//! AEAD (authenticated encryption with associated data) schemes.

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};
use thiserror::Error;
use zeroize::Zeroize;

mod aes256_gcm;
pub(crate) use aes256_gcm::Aes256Gcm;

// AEAD TRAIT
// ================================================================================================

/// Authenticated encryption scheme used by the sealed box.
///
/// Tags are detached from the ciphertext so that callers control where they are placed on the
/// wire.
pub(crate) trait AeadScheme {
    const KEY_SIZE: usize;
    const NONCE_SIZE: usize;
    const TAG_SIZE: usize;

    type Key: Zeroize;

    fn key_from_bytes(bytes: &[u8]) -> Result<Self::Key, EncryptionError>;

    /// Draws a fresh random nonce of `NONCE_SIZE` bytes.
    fn generate_nonce<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Vec<u8>, EncryptionError>;

    /// Encrypts `buffer` in place and returns the authentication tag.
    fn encrypt_detached(
        key: &Self::Key,
        nonce: &[u8],
        buffer: &mut [u8],
    ) -> Result<Vec<u8>, EncryptionError>;

    /// Authenticates and decrypts `buffer` in place.
    ///
    /// On failure the contents of `buffer` are unspecified and must be discarded.
    fn decrypt_detached(
        key: &Self::Key,
        nonce: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<(), EncryptionError>;
}

// ERROR TYPES
// ================================================================================================

/// Errors that can occur during encryption/decryption operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncryptionError {
    #[error("expected a {expected}-byte key, found {actual} bytes")]
    InvalidKeySize { expected: usize, actual: usize },
    #[error("expected a {expected}-byte nonce, found {actual} bytes")]
    InvalidNonceSize { expected: usize, actual: usize },
    #[error("expected a {expected}-byte tag, found {actual} bytes")]
    InvalidTagSize { expected: usize, actual: usize },
    #[error("random source failed while generating a nonce")]
    RandomnessUnavailable,
    #[error("operation failed")]
    FailedOperation,
    #[error("authentication tag verification failed")]
    InvalidAuthTag,
}
