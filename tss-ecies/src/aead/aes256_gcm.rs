//! AES-256-GCM with a 128-bit nonce.
//!
//! The 16-byte nonce is what peers of the toolkit use on the wire; GCM derives the initial
//! counter block from it through GHASH, as specified for nonces that are not 96 bits long.

use alloc::vec::Vec;

use aes_gcm::{
    AesGcm, Key, Nonce, Tag,
    aead::{AeadInPlace, KeyInit, consts::U16},
    aes::Aes256,
};
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AeadScheme, EncryptionError};

type Cipher = AesGcm<Aes256, U16>;

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 16;
const TAG_SIZE: usize = 16;

/// A 256-bit AES key
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SecretKey([u8; KEY_SIZE]);

impl SecretKey {
    fn cipher(&self) -> Cipher {
        Cipher::new(Key::<Cipher>::from_slice(&self.0))
    }
}

/// AES-256-GCM with 16-byte nonces and 16-byte tags.
pub(crate) struct Aes256Gcm;

impl AeadScheme for Aes256Gcm {
    const KEY_SIZE: usize = KEY_SIZE;
    const NONCE_SIZE: usize = NONCE_SIZE;
    const TAG_SIZE: usize = TAG_SIZE;

    type Key = SecretKey;

    fn key_from_bytes(bytes: &[u8]) -> Result<SecretKey, EncryptionError> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            EncryptionError::InvalidKeySize { expected: KEY_SIZE, actual: bytes.len() }
        })?;
        Ok(SecretKey(key))
    }

    fn generate_nonce<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Vec<u8>, EncryptionError> {
        let mut nonce = vec![0u8; NONCE_SIZE];
        rng.try_fill_bytes(&mut nonce)
            .map_err(|_| EncryptionError::RandomnessUnavailable)?;
        Ok(nonce)
    }

    fn encrypt_detached(
        key: &SecretKey,
        nonce: &[u8],
        buffer: &mut [u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let nonce = nonce_from_slice(nonce)?;
        let tag = key
            .cipher()
            .encrypt_in_place_detached(nonce, &[], buffer)
            .map_err(|_| EncryptionError::FailedOperation)?;

        Ok(tag.to_vec())
    }

    fn decrypt_detached(
        key: &SecretKey,
        nonce: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<(), EncryptionError> {
        let nonce = nonce_from_slice(nonce)?;
        if tag.len() != TAG_SIZE {
            return Err(EncryptionError::InvalidTagSize { expected: TAG_SIZE, actual: tag.len() });
        }

        key.cipher()
            .decrypt_in_place_detached(nonce, &[], buffer, Tag::from_slice(tag))
            .map_err(|_| EncryptionError::InvalidAuthTag)
    }
}

// HELPERS
// ================================================================================================

fn nonce_from_slice(nonce: &[u8]) -> Result<&Nonce<U16>, EncryptionError> {
    if nonce.len() != NONCE_SIZE {
        return Err(EncryptionError::InvalidNonceSize { expected: NONCE_SIZE, actual: nonce.len() });
    }
    Ok(Nonce::from_slice(nonce))
}

// TESTS
// ================================================================================================
