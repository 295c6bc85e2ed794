//! Integrated Encryption Scheme (IES) over secp256k1.
//!
//! This module combines elliptic-curve Diffie–Hellman (ECDH) key agreement with authenticated
//! encryption (AES-256-GCM) to provide sealed boxes that offer confidentiality and integrity for
//! messages. It exposes a simple API via [`SecretKey`], [`PublicKey`], [`KeyPair`],
//! [`SealedMessage`] and [`IesError`].
//!
//! # Examples
//!
//! ```
//! use tss_ecies::ies::{KeyPair, SealedMessage};
//!
//! let mut rng = rand_core::OsRng;
//! let key_pair = KeyPair::with_rng(&mut rng);
//!
//! let sealed = key_pair.public_key().seal(&mut rng, b"hello world").unwrap();
//! let bytes = sealed.to_bytes();
//!
//! let received = SealedMessage::read_from_bytes(&bytes).unwrap();
//! let opened = key_pair.secret_key().unseal(&received).unwrap();
//!
//! assert_eq!(opened.as_slice(), b"hello world");
//! ```

mod crypto_box;
mod error;
mod keys;
mod message;


pub use error::{IesError, KeyError};
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use message::SealedMessage;

use crate::{aead::Aes256Gcm, ecdh::K256};

/// Instantiation of sealed box using K256 + AES-256-GCM
type Secp256k1Aes256Gcm = crypto_box::CryptoBox<K256, Aes256Gcm>;
