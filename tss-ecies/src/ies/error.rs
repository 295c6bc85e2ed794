use thiserror::Error;

/// Error type for the Integrated Encryption Scheme (IES)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IesError {
    #[error("random source failed")]
    RandomnessUnavailable,
    #[error("key agreement failed")]
    KeyAgreementFailed,
    #[error("failed to extract key material for encryption/decryption")]
    FailedExtractKeyMaterial,
    #[error("failed to construct the encryption/decryption key from the provided bytes")]
    EncryptionKeyCreationFailed,
    #[error("encryption failed")]
    EncryptionFailed,
    #[error("decryption failed")]
    DecryptionFailed,
    #[error("ephemeral public key deserialization failed")]
    EphemeralPublicKeyDeserializationFailed,
    #[error("sealed message is {actual} bytes long, the minimum is {minimum}")]
    MessageTooShort { actual: usize, minimum: usize },
}

/// Errors raised while decoding secp256k1 keys.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeyError {
    #[error("invalid hex: {0}")]
    InvalidHex(hex::FromHexError),
    #[error("secret key must be 1 to 32 bytes long, found {0} bytes")]
    InvalidSecretKeyLength(usize),
    #[error("public key must be 33 (compressed) or 65 (uncompressed) bytes long, found {0} bytes")]
    InvalidPublicKeyLength(usize),
    #[error("bytes do not encode a non-zero scalar below the secp256k1 group order")]
    InvalidScalar,
    #[error("bytes do not encode a point on secp256k1")]
    InvalidPoint,
    #[error("public key does not match the secret key")]
    KeyPairMismatch,
}
