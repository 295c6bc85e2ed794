use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::ies::{IesError, KeyError};

/// Which half of a key pair failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Private,
    Public,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Private => f.write_str("private"),
            KeyRole::Public => f.write_str("public"),
        }
    }
}

/// Reasons a textual input could not be decoded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodingError {
    #[error("invalid base64: {0}")]
    Base64(base64::DecodeError),
    #[error("plaintext is not valid UTF-8: {0}")]
    Utf8(alloc::string::FromUtf8Error),
}

/// Errors returned by the string-friendly facade.
///
/// Each variant names the stage that failed. [CipherError::Decryption] deliberately carries no
/// cause so that a wrong key cannot be told apart from a corrupted or forged ciphertext.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CipherError {
    #[error("failed to generate key pair: {0}")]
    KeyGeneration(IesError),
    #[error("failed to decode {role} key: {source}")]
    InvalidKey {
        role: KeyRole,
        #[source]
        source: KeyError,
    },
    #[error("failed to decode encrypted data: {0}")]
    InvalidEncoding(EncodingError),
    #[error("failed to encrypt data: {0}")]
    Encryption(IesError),
    #[error("failed to decrypt data")]
    Decryption,
    #[error("failed to marshal key pair to JSON: {0}")]
    Serialization(String),
}

impl CipherError {
    pub(crate) fn private_key(source: KeyError) -> Self {
        Self::InvalidKey { role: KeyRole::Private, source }
    }

    pub(crate) fn public_key(source: KeyError) -> Self {
        Self::InvalidKey { role: KeyRole::Public, source }
    }
}
