#![no_std]

//! ECIES over secp256k1 for threshold-signature tooling.
//!
//! The crate is layered bottom-up:
//!
//! - `ecdh`: secp256k1 key agreement and HKDF-SHA256 key extraction,
//! - `aead`: AES-256-GCM with a 16-byte nonce and a detached tag,
//! - [`ies`]: the sealed box built from the two, with typed keys and messages,
//! - [`text`]: a string-friendly facade (hex keys, base64 ciphertext, JSON key pairs).
//!
//! Sealed messages use the layout
//! `ephemeral public key (65) || nonce (16) || tag (16) || ciphertext`, which is byte-compatible
//! with the ECIES implementation used by the rest of the toolkit.

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod aead;
mod ecdh;
pub mod ies;
pub mod text;

#[cfg(test)]
mod test_utils;

// RE-EXPORTS
// ================================================================================================

pub use ies::{IesError, KeyError, KeyPair, PublicKey, SealedMessage, SecretKey};
pub use text::{CipherError, HexKeyPair};

// CONSTANTS
// ================================================================================================

/// Size of a serialized secret key, in bytes.
pub const SECRET_KEY_BYTES: usize = 32;

/// Size of a compressed SEC1 public key, in bytes.
pub const COMPRESSED_PUBLIC_KEY_BYTES: usize = 33;

/// Size of an uncompressed SEC1 public key, in bytes.
pub const UNCOMPRESSED_PUBLIC_KEY_BYTES: usize = 65;
