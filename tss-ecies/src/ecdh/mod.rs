//! ECDH (Elliptic Curve Diffie-Hellman) key agreement.
//!
//! The intended use is a one-way, sender initiated key agreement. The sender knows the (static)
//! public key of the receiver and combines it with an ephemeral secret key it generates to derive
//! a shared secret. The public key matching the ephemeral secret travels with the encrypted
//! message so that the receiver can derive the same secret.

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};
use thiserror::Error;
use zeroize::Zeroize;

mod k256;
pub(crate) use self::k256::{K256, random_secret_key};

// KEY AGREEMENT TRAIT
// ================================================================================================

/// A key agreement scheme usable by the sealed box.
pub(crate) trait KeyAgreementScheme {
    /// Size of a serialized ephemeral public key, in bytes.
    const EPHEMERAL_PUBLIC_KEY_SIZE: usize;

    type SecretKey;
    type PublicKey;
    type SharedSecret: Zeroize;

    /// Generates an ephemeral key pair, failing if the random source does.
    fn generate_ephemeral_keypair<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> Result<(Self::SecretKey, Self::PublicKey), KeyAgreementError>;

    /// Computes the shared secret between an ephemeral secret and a static public key.
    fn exchange_ephemeral_static(
        ephemeral_secret: &Self::SecretKey,
        static_public: &Self::PublicKey,
    ) -> Result<Self::SharedSecret, KeyAgreementError>;

    /// Computes the shared secret between a static secret and an ephemeral public key.
    fn exchange_static_ephemeral(
        static_secret: &Self::SecretKey,
        ephemeral_public: &Self::PublicKey,
    ) -> Result<Self::SharedSecret, KeyAgreementError>;

    /// Derives `length` bytes of key material from the shared secret, bound to the ephemeral
    /// public key of the exchange.
    fn extract_key_material(
        ephemeral_public: &Self::PublicKey,
        shared_secret: &Self::SharedSecret,
        length: usize,
    ) -> Result<Vec<u8>, KeyAgreementError>;

    fn ephemeral_public_key_to_bytes(key: &Self::PublicKey) -> Vec<u8>;

    fn ephemeral_public_key_from_bytes(bytes: &[u8]) -> Result<Self::PublicKey, KeyAgreementError>;
}

// ERRORS
// ================================================================================================

/// Errors raised by key agreement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyAgreementError {
    #[error("random source failed while generating an ephemeral key")]
    RandomnessUnavailable,
    #[error("bytes do not encode a valid ephemeral public key")]
    InvalidEphemeralPublicKey,
    #[error("shared secret is the point at infinity")]
    DegenerateSharedSecret,
    #[error("requested {0} bytes of key material, which exceeds the KDF output limit")]
    KeyMaterialTooLong(usize),
}
