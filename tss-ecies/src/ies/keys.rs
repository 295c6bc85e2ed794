use alloc::{string::String, vec::Vec};
use core::fmt;

use k256::{FieldBytes, elliptic_curve::sec1::ToEncodedPoint};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::{
    Secp256k1Aes256Gcm,
    error::{IesError, KeyError},
    message::SealedMessage,
};
use crate::{
    COMPRESSED_PUBLIC_KEY_BYTES, SECRET_KEY_BYTES, UNCOMPRESSED_PUBLIC_KEY_BYTES,
    ecdh::random_secret_key,
};

// SECRET KEY
// ================================================================================================

/// Secret key for unsealing messages, a secp256k1 scalar.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    inner: k256::SecretKey,
}

impl SecretKey {
    /// Generates a new random secret key using the OS random number generator.
    ///
    /// # Panics
    /// Panics if the OS random number generator fails.
    #[cfg(feature = "std")]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::with_rng(&mut rand_core::OsRng)
    }

    /// Generates a new secret key using the provided random number generator.
    ///
    /// # Panics
    /// Panics if the random number generator fails; use [Self::try_with_rng] to handle that case.
    pub fn with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self { inner: k256::SecretKey::random(rng) }
    }

    /// Generates a new secret key, returning an error if the random number generator fails.
    pub fn try_with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, IesError> {
        let inner = random_secret_key(rng).map_err(|_| IesError::RandomnessUnavailable)?;
        Ok(Self { inner })
    }

    /// Returns the public key matching this secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey { inner: self.inner.public_key() }
    }

    /// Returns the big-endian encoding of the scalar, always 32 bytes.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_BYTES] {
        let mut bytes = [0u8; SECRET_KEY_BYTES];
        bytes.copy_from_slice(&self.inner.to_bytes());
        bytes
    }

    /// Decodes a big-endian scalar.
    ///
    /// Inputs shorter than 32 bytes are left-padded with zeros, so scalars printed without their
    /// leading zero bytes are accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.is_empty() || bytes.len() > SECRET_KEY_BYTES {
            return Err(KeyError::InvalidSecretKeyLength(bytes.len()));
        }

        let mut padded = [0u8; SECRET_KEY_BYTES];
        padded[SECRET_KEY_BYTES - bytes.len()..].copy_from_slice(bytes);
        let inner = k256::SecretKey::from_bytes(FieldBytes::from_slice(&padded));
        padded.zeroize();

        Ok(Self { inner: inner.map_err(|_| KeyError::InvalidScalar)? })
    }

    /// Returns the lowercase hex encoding of [Self::to_bytes].
    pub fn to_hex(&self) -> String {
        let mut bytes = self.to_bytes();
        let encoded = hex::encode(&bytes);
        bytes.zeroize();
        encoded
    }

    /// Decodes a hex-encoded scalar; see [Self::from_bytes].
    pub fn from_hex(value: &str) -> Result<Self, KeyError> {
        let mut bytes = hex::decode(value).map_err(KeyError::InvalidHex)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Unseals (authenticates and decrypts) a message sealed to this key's public key.
    ///
    /// Every failure is reported as [IesError::DecryptionFailed] or one of the other unseal
    /// errors without revealing plaintext; callers exposing this to untrusted parties should
    /// collapse them into a single error.
    pub fn unseal(&self, sealed_message: &SealedMessage) -> Result<Vec<u8>, IesError> {
        Secp256k1Aes256Gcm::unseal(&self.inner, sealed_message)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}

// PUBLIC KEY
// ================================================================================================

/// Public key for sealing messages to a recipient, a point on secp256k1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Returns the SEC1 encoding of this key, compressed (33 bytes) or not (65 bytes).
    pub fn to_sec1_bytes(&self, compressed: bool) -> Vec<u8> {
        self.inner.to_encoded_point(compressed).as_bytes().to_vec()
    }

    /// Decodes a compressed or uncompressed SEC1 point.
    ///
    /// Only the `02`/`03` (compressed) and `04` (uncompressed) tags are accepted; other SEC1
    /// variants such as the `05` compact form are rejected.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let tag_is_valid = match bytes.len() {
            COMPRESSED_PUBLIC_KEY_BYTES => matches!(bytes[0], 0x02 | 0x03),
            UNCOMPRESSED_PUBLIC_KEY_BYTES => bytes[0] == 0x04,
            len => return Err(KeyError::InvalidPublicKeyLength(len)),
        };
        if !tag_is_valid {
            return Err(KeyError::InvalidPoint);
        }

        let inner = k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPoint)?;
        Ok(Self { inner })
    }

    /// Returns the lowercase hex encoding of the compressed point.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_sec1_bytes(true))
    }

    /// Decodes a hex-encoded SEC1 point, compressed or uncompressed.
    pub fn from_hex(value: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(value).map_err(KeyError::InvalidHex)?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Seals (encrypts and authenticates) `plaintext` for the owner of this key.
    pub fn seal<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<SealedMessage, IesError> {
        Secp256k1Aes256Gcm::seal(rng, &self.inner, plaintext)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// KEY PAIR
// ================================================================================================

/// A secret key together with its public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generates a new random key pair using the OS random number generator.
    #[cfg(feature = "std")]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::from_secret_key(SecretKey::new())
    }

    pub fn with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::from_secret_key(SecretKey::with_rng(rng))
    }

    pub fn try_with_rng<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, IesError> {
        Ok(Self::from_secret_key(SecretKey::try_with_rng(rng)?))
    }

    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self { secret_key, public_key }
    }

    /// Builds a key pair from both halves, checking that they belong together.
    pub fn from_parts(secret_key: SecretKey, public_key: PublicKey) -> Result<Self, KeyError> {
        if secret_key.public_key() != public_key {
            return Err(KeyError::KeyPairMismatch);
        }
        Ok(Self { secret_key, public_key })
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn into_parts(self) -> (SecretKey, PublicKey) {
        (self.secret_key, self.public_key)
    }
}
