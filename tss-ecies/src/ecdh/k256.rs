//! ECDH key agreement over the secp256k1 curve.
//!
//! Unlike `k256::ecdh`, which only exposes the x-coordinate of the shared point, the shared
//! secret here is the full uncompressed shared point. Key material is extracted with HKDF-SHA256
//! over `ephemeral_public || shared_point`, both uncompressed, without salt or info.

use alloc::vec::Vec;

use ::k256::{
    FieldBytes, PublicKey, SecretKey,
    elliptic_curve::{group::Curve, sec1::ToEncodedPoint},
};
use hkdf::Hkdf;
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{KeyAgreementError, KeyAgreementScheme};
use crate::{SECRET_KEY_BYTES, UNCOMPRESSED_PUBLIC_KEY_BYTES};

// SHARED SECRET
// ================================================================================================

/// The uncompressed SEC1 encoding of the ECDH shared point.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SharedSecret([u8; UNCOMPRESSED_PUBLIC_KEY_BYTES]);

impl SharedSecret {
    fn from_point(point: &PublicKey) -> Self {
        let encoded = point.to_encoded_point(false);
        let mut bytes = [0u8; UNCOMPRESSED_PUBLIC_KEY_BYTES];
        bytes.copy_from_slice(encoded.as_bytes());
        Self(bytes)
    }
}

// KEY AGREEMENT
// ================================================================================================

/// ECDH over secp256k1.
pub(crate) struct K256;

impl K256 {
    fn diffie_hellman(
        secret: &SecretKey,
        public: &PublicKey,
    ) -> Result<SharedSecret, KeyAgreementError> {
        let point = (public.to_projective() * *secret.to_nonzero_scalar()).to_affine();
        let point =
            PublicKey::from_affine(point).map_err(|_| KeyAgreementError::DegenerateSharedSecret)?;

        Ok(SharedSecret::from_point(&point))
    }
}

impl KeyAgreementScheme for K256 {
    const EPHEMERAL_PUBLIC_KEY_SIZE: usize = UNCOMPRESSED_PUBLIC_KEY_BYTES;

    type SecretKey = SecretKey;
    type PublicKey = PublicKey;
    type SharedSecret = SharedSecret;

    fn generate_ephemeral_keypair<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> Result<(SecretKey, PublicKey), KeyAgreementError> {
        let secret =
            random_secret_key(rng).map_err(|_| KeyAgreementError::RandomnessUnavailable)?;
        let public = secret.public_key();

        Ok((secret, public))
    }

    fn exchange_ephemeral_static(
        ephemeral_secret: &SecretKey,
        static_public: &PublicKey,
    ) -> Result<SharedSecret, KeyAgreementError> {
        Self::diffie_hellman(ephemeral_secret, static_public)
    }

    fn exchange_static_ephemeral(
        static_secret: &SecretKey,
        ephemeral_public: &PublicKey,
    ) -> Result<SharedSecret, KeyAgreementError> {
        Self::diffie_hellman(static_secret, ephemeral_public)
    }

    fn extract_key_material(
        ephemeral_public: &PublicKey,
        shared_secret: &SharedSecret,
        length: usize,
    ) -> Result<Vec<u8>, KeyAgreementError> {
        let mut ikm = [0u8; 2 * UNCOMPRESSED_PUBLIC_KEY_BYTES];
        ikm[..UNCOMPRESSED_PUBLIC_KEY_BYTES]
            .copy_from_slice(ephemeral_public.to_encoded_point(false).as_bytes());
        ikm[UNCOMPRESSED_PUBLIC_KEY_BYTES..].copy_from_slice(&shared_secret.0);

        let hkdf = Hkdf::<Sha256>::new(None, &ikm);
        ikm.zeroize();

        let mut okm = vec![0u8; length];
        hkdf.expand(&[], &mut okm)
            .map_err(|_| KeyAgreementError::KeyMaterialTooLong(length))?;

        Ok(okm)
    }

    fn ephemeral_public_key_to_bytes(key: &PublicKey) -> Vec<u8> {
        key.to_encoded_point(false).as_bytes().to_vec()
    }

    fn ephemeral_public_key_from_bytes(bytes: &[u8]) -> Result<PublicKey, KeyAgreementError> {
        if bytes.len() != Self::EPHEMERAL_PUBLIC_KEY_SIZE {
            return Err(KeyAgreementError::InvalidEphemeralPublicKey);
        }
        PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyAgreementError::InvalidEphemeralPublicKey)
    }
}

// HELPERS
// ================================================================================================

/// Samples a uniformly random secp256k1 secret key.
///
/// Candidates that are zero or not below the group order are rejected and resampled. Errors from
/// the random source are returned instead of panicking.
pub(crate) fn random_secret_key<R: CryptoRng + RngCore>(
    rng: &mut R,
) -> Result<SecretKey, rand_core::Error> {
    let mut bytes = [0u8; SECRET_KEY_BYTES];
    loop {
        rng.try_fill_bytes(&mut bytes)?;
        if let Ok(secret) = SecretKey::from_bytes(FieldBytes::from_slice(&bytes)) {
            bytes.zeroize();
            return Ok(secret);
        }
    }
}

// TESTS
// ================================================================================================
