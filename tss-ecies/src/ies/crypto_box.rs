//! Core cryptographic primitive for Integrated Encryption Scheme (IES).
//!
//! This module defines the generic `CryptoBox` abstraction that combines a key agreement scheme
//! (e.g. K256 ECDH) with an AEAD scheme (e.g. AES-256-GCM) to provide authenticated encryption.

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::{error::IesError, message::SealedMessage};
use crate::{
    aead::AeadScheme,
    ecdh::{KeyAgreementError, KeyAgreementScheme},
};

/// A generic CryptoBox primitive parameterized by key agreement and AEAD schemes
pub(crate) struct CryptoBox<K: KeyAgreementScheme, A: AeadScheme> {
    _phantom: core::marker::PhantomData<(K, A)>,
}

impl<K: KeyAgreementScheme, A: AeadScheme> CryptoBox<K, A> {
    pub(crate) fn seal<R: CryptoRng + RngCore>(
        rng: &mut R,
        recipient_public_key: &K::PublicKey,
        plaintext: &[u8],
    ) -> Result<SealedMessage, IesError> {
        let (ephemeral_private, ephemeral_public) =
            K::generate_ephemeral_keypair(rng).map_err(|err| match err {
                KeyAgreementError::RandomnessUnavailable => IesError::RandomnessUnavailable,
                _ => IesError::KeyAgreementFailed,
            })?;

        let shared_secret = K::exchange_ephemeral_static(&ephemeral_private, recipient_public_key)
            .map_err(|_| IesError::KeyAgreementFailed)?;
        let mut encryption_key = Self::derive_key(&ephemeral_public, shared_secret)?;

        let nonce = A::generate_nonce(rng).map_err(|_| IesError::RandomnessUnavailable)?;
        let mut ciphertext = plaintext.to_vec();
        let tag = A::encrypt_detached(&encryption_key, &nonce, &mut ciphertext)
            .map_err(|_| IesError::EncryptionFailed)?;

        encryption_key.zeroize();

        Ok(SealedMessage {
            ephemeral_public_key: K::ephemeral_public_key_to_bytes(&ephemeral_public),
            nonce,
            tag,
            ciphertext,
        })
    }

    pub(crate) fn unseal(
        recipient_private_key: &K::SecretKey,
        sealed_message: &SealedMessage,
    ) -> Result<Vec<u8>, IesError> {
        let ephemeral_public =
            K::ephemeral_public_key_from_bytes(&sealed_message.ephemeral_public_key)
                .map_err(|_| IesError::EphemeralPublicKeyDeserializationFailed)?;

        let shared_secret = K::exchange_static_ephemeral(recipient_private_key, &ephemeral_public)
            .map_err(|_| IesError::KeyAgreementFailed)?;
        let mut decryption_key = Self::derive_key(&ephemeral_public, shared_secret)?;

        let mut plaintext = sealed_message.ciphertext.clone();
        let result = A::decrypt_detached(
            &decryption_key,
            &sealed_message.nonce,
            &mut plaintext,
            &sealed_message.tag,
        );

        decryption_key.zeroize();

        match result {
            Ok(()) => Ok(plaintext),
            Err(_) => {
                plaintext.zeroize();
                Err(IesError::DecryptionFailed)
            },
        }
    }

    /// Turns a shared secret into an AEAD key; the secret is consumed and zeroized.
    fn derive_key(
        ephemeral_public: &K::PublicKey,
        mut shared_secret: K::SharedSecret,
    ) -> Result<A::Key, IesError> {
        let key_bytes = K::extract_key_material(ephemeral_public, &shared_secret, A::KEY_SIZE);
        shared_secret.zeroize();
        let mut key_bytes = key_bytes.map_err(|_| IesError::FailedExtractKeyMaterial)?;

        let key = A::key_from_bytes(&key_bytes);
        key_bytes.zeroize();

        key.map_err(|_| IesError::EncryptionKeyCreationFailed)
    }
}
