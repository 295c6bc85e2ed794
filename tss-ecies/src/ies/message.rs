use alloc::vec::Vec;

use super::error::IesError;
use crate::{
    aead::{AeadScheme, Aes256Gcm},
    ecdh::{K256, KeyAgreementScheme},
};

// CONSTANTS
// ================================================================================================

const EPHEMERAL_KEY_LEN: usize = <K256 as KeyAgreementScheme>::EPHEMERAL_PUBLIC_KEY_SIZE;
const NONCE_LEN: usize = <Aes256Gcm as AeadScheme>::NONCE_SIZE;
const TAG_LEN: usize = <Aes256Gcm as AeadScheme>::TAG_SIZE;

// SEALED MESSAGE
// ================================================================================================

/// A sealed message containing encrypted data.
///
/// On the wire the message is laid out as
/// `ephemeral public key (65) || nonce (16) || tag (16) || ciphertext`, with the ephemeral key
/// in uncompressed SEC1 form. The ciphertext has the same length as the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    pub(crate) ephemeral_public_key: Vec<u8>,
    pub(crate) nonce: Vec<u8>,
    pub(crate) tag: Vec<u8>,
    pub(crate) ciphertext: Vec<u8>,
}

impl SealedMessage {
    /// Number of bytes a sealed message adds on top of its plaintext.
    pub const OVERHEAD: usize = EPHEMERAL_KEY_LEN + NONCE_LEN + TAG_LEN;

    /// Ephemeral public key of the sender, uncompressed.
    pub fn ephemeral_public_key(&self) -> &[u8] {
        &self.ephemeral_public_key
    }

    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Length of the serialized message, in bytes.
    pub fn len(&self) -> usize {
        Self::OVERHEAD + self.ciphertext.len()
    }

    /// Returns true if the message carries an empty plaintext.
    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    // SERIALIZATION / DESERIALIZATION
    // --------------------------------------------------------------------------------------------

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.ephemeral_public_key);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.tag);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Splits serialized bytes into the parts of a sealed message.
    ///
    /// Only the length is checked here; the ephemeral key and the tag are validated when the
    /// message is unsealed.
    pub fn read_from_bytes(bytes: &[u8]) -> Result<Self, IesError> {
        if bytes.len() < Self::OVERHEAD {
            return Err(IesError::MessageTooShort {
                actual: bytes.len(),
                minimum: Self::OVERHEAD,
            });
        }

        let (ephemeral_public_key, rest) = bytes.split_at(EPHEMERAL_KEY_LEN);
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        Ok(Self {
            ephemeral_public_key: ephemeral_public_key.to_vec(),
            nonce: nonce.to_vec(),
            tag: tag.to_vec(),
            ciphertext: ciphertext.to_vec(),
        })
    }
}
