use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use aes_gcm::{
    AesGcm, Nonce,
    aead::{AeadInPlace, KeyInit, consts::U16},
    aes::Aes256,
};
use assert_matches::assert_matches;
use base64::{Engine, engine::general_purpose::STANDARD};
use hkdf::Hkdf;
use k256::elliptic_curve::{group::Curve, sec1::ToEncodedPoint};
use proptest::prelude::*;
use rstest::rstest;
use sha2::Sha256;
use zeroize::Zeroize;

use super::*;
use crate::{
    KeyError, SealedMessage,
    ies::IesError,
    test_utils::{FailingRng, seeded_rng},
};

fn key_pair(seed: u64) -> HexKeyPair {
    let json = generate_key_pair_with_rng(&mut seeded_rng(seed)).unwrap();
    serde_json::from_str(&json).unwrap()
}

// KEY GENERATION
// ================================================================================================

#[test]
fn test_key_pair_json_structure() {
    let json = generate_key_pair_with_rng(&mut seeded_rng(1)).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);

    let private_key = object["privateKey"].as_str().unwrap();
    let public_key = object["publicKey"].as_str().unwrap();
    assert_eq!(private_key.len(), 64);
    assert_eq!(public_key.len(), 66);
    assert!(public_key.starts_with("02") || public_key.starts_with("03"));
    assert!(
        private_key
            .chars()
            .chain(public_key.chars())
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    );

    let secret_key = SecretKey::from_hex(private_key).unwrap();
    assert_eq!(secret_key.public_key().to_hex(), public_key);
}

#[test]
fn test_generated_key_pairs_differ() {
    let mut rng = seeded_rng(2);
    let first = generate_key_pair_with_rng(&mut rng).unwrap();
    let second = generate_key_pair_with_rng(&mut rng).unwrap();
    assert_ne!(first, second);
}

#[cfg(feature = "std")]
#[test]
fn test_generate_key_pair_from_os_rng() {
    let key_pair = parse_key_pair(&generate_key_pair().unwrap()).unwrap();
    let document = HexKeyPair::from(&key_pair);

    let ciphertext = encrypt("hello-tss", &document.public_key).unwrap();
    assert_eq!(decrypt(&ciphertext, &document.private_key).unwrap(), "hello-tss");
}

#[test]
fn test_key_generation_reports_broken_rng() {
    let result = generate_key_pair_with_rng(&mut FailingRng::broken());
    assert_matches!(result, Err(CipherError::KeyGeneration(IesError::RandomnessUnavailable)));
}

#[test]
fn test_hex_key_pair_debug_is_redacted() {
    let document = key_pair(3);
    let debug = format!("{document:?}");

    assert!(!debug.contains(&document.private_key));
    assert!(debug.contains(&document.public_key));
}

#[test]
fn test_hex_key_pair_zeroize_clears_private_key() {
    let mut document = key_pair(45);
    assert!(!document.private_key.is_empty());

    document.zeroize();
    assert!(document.private_key.is_empty());
    assert!(document.public_key.is_empty());
}

// KEY PAIR PARSING
// ================================================================================================

#[test]
fn test_parse_key_pair_roundtrip() {
    let json = generate_key_pair_with_rng(&mut seeded_rng(4)).unwrap();
    let key_pair = parse_key_pair(&json).unwrap();

    assert_eq!(serde_json::to_string(&HexKeyPair::from(&key_pair)).unwrap(), json);
}

#[test]
fn test_parse_key_pair_rejects_mismatched_halves() {
    let first = key_pair(5);
    let second = key_pair(6);
    let json = serde_json::to_string(&HexKeyPair {
        private_key: first.private_key.clone(),
        public_key: second.public_key.clone(),
    })
    .unwrap();

    assert_matches!(
        parse_key_pair(&json),
        Err(CipherError::InvalidKey { role: KeyRole::Public, source: KeyError::KeyPairMismatch })
    );
}

#[rstest]
#[case::not_json("not json")]
#[case::missing_field(r#"{"privateKey":"01"}"#)]
#[case::unknown_field(r#"{"privateKey":"01","publicKey":"02","curve":"secp256k1"}"#)]
#[case::wrong_type(r#"{"privateKey":1,"publicKey":2}"#)]
fn test_parse_key_pair_rejects_malformed_json(#[case] json: &str) {
    assert_matches!(parse_key_pair(json), Err(CipherError::Serialization(_)));
}

#[test]
fn test_parse_key_pair_rejects_compact_public_key() {
    let document = key_pair(46);
    let json = serde_json::to_string(&HexKeyPair {
        private_key: document.private_key.clone(),
        public_key: format!("05{}", &document.public_key[2..]),
    })
    .unwrap();

    assert_matches!(
        parse_key_pair(&json),
        Err(CipherError::InvalidKey { role: KeyRole::Public, source: KeyError::InvalidPoint })
    );
}

#[test]
fn test_parse_key_pair_rejects_bad_private_key() {
    let document = key_pair(7);
    let json = serde_json::to_string(&HexKeyPair {
        private_key: "zz".to_string(),
        public_key: document.public_key.clone(),
    })
    .unwrap();

    assert_matches!(
        parse_key_pair(&json),
        Err(CipherError::InvalidKey { role: KeyRole::Private, source: KeyError::InvalidHex(_) })
    );
}

// ENCRYPTION AND DECRYPTION
// ================================================================================================

#[test]
fn test_hello_tss() {
    let document = key_pair(8);
    let mut rng = seeded_rng(9);

    let ciphertext = encrypt_with_rng(&mut rng, "hello-tss", &document.public_key).unwrap();
    let sealed = STANDARD.decode(&ciphertext).unwrap();
    assert_eq!(sealed.len(), SealedMessage::OVERHEAD + "hello-tss".len());

    assert_eq!(decrypt(&ciphertext, &document.private_key).unwrap(), "hello-tss");
}

#[rstest]
#[case::empty("")]
#[case::ascii("threshold signing round 1")]
#[case::json(r#"{"keyshare":"0xdeadbeef","index":2}"#)]
#[case::multibyte("ключ 🔑 鍵")]
fn test_roundtrip(#[case] plaintext: &str) {
    let document = key_pair(10);

    let ciphertext = encrypt_with_rng(&mut seeded_rng(11), plaintext, &document.public_key).unwrap();
    assert_eq!(decrypt(&ciphertext, &document.private_key).unwrap(), plaintext);
}

#[test]
fn test_empty_plaintext_is_minimum_size() {
    let document = key_pair(12);

    let ciphertext = encrypt_with_rng(&mut seeded_rng(13), "", &document.public_key).unwrap();
    assert_eq!(STANDARD.decode(&ciphertext).unwrap().len(), SealedMessage::OVERHEAD);
    assert_eq!(decrypt(&ciphertext, &document.private_key).unwrap(), "");
}

#[test]
fn test_encryption_is_randomized() {
    let document = key_pair(14);
    let mut rng = seeded_rng(15);

    let first = encrypt_with_rng(&mut rng, "same message", &document.public_key).unwrap();
    let second = encrypt_with_rng(&mut rng, "same message", &document.public_key).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_uncompressed_public_key_is_accepted() {
    let document = key_pair(16);
    let public_key = PublicKey::from_hex(&document.public_key).unwrap();
    let uncompressed = hex::encode(public_key.to_sec1_bytes(false));
    assert_eq!(uncompressed.len(), 130);

    let ciphertext = encrypt_with_rng(&mut seeded_rng(17), "uncompressed", &uncompressed).unwrap();
    assert_eq!(decrypt(&ciphertext, &document.private_key).unwrap(), "uncompressed");
}

#[test]
fn test_uppercase_keys_are_accepted() {
    let document = key_pair(18);

    let ciphertext = encrypt_with_rng(
        &mut seeded_rng(19),
        "shouting",
        &document.public_key.to_uppercase(),
    )
    .unwrap();
    assert_eq!(decrypt(&ciphertext, &document.private_key.to_uppercase()).unwrap(), "shouting");
}

#[test]
fn test_non_utf8_plaintext() {
    let document = key_pair(20);
    let plaintext = [0xffu8, 0xfe, 0x00, 0x80];

    let ciphertext =
        encrypt_bytes_with_rng(&mut seeded_rng(21), &plaintext, &document.public_key).unwrap();

    assert_matches!(
        decrypt(&ciphertext, &document.private_key),
        Err(CipherError::InvalidEncoding(EncodingError::Utf8(_)))
    );
    assert_eq!(decrypt_bytes(&ciphertext, &document.private_key).unwrap(), plaintext);
}

#[cfg(feature = "std")]
#[test]
fn test_encrypt_bytes_from_os_rng() {
    let document = key_pair(44);
    let plaintext = [0u8, 1, 2, 0xff];

    let ciphertext = encrypt_bytes(&plaintext, &document.public_key).unwrap();
    assert_eq!(decrypt_bytes(&ciphertext, &document.private_key).unwrap(), plaintext);
}

#[test]
fn test_encryption_reports_broken_rng() {
    let document = key_pair(22);

    assert_matches!(
        encrypt_with_rng(&mut FailingRng::broken(), "data", &document.public_key),
        Err(CipherError::Encryption(IesError::RandomnessUnavailable))
    );
}

#[test]
fn test_decrypts_envelope_assembled_from_primitives() {
    let mut rng = seeded_rng(42);
    let recipient = crate::KeyPair::with_rng(&mut rng);

    let ephemeral = k256::SecretKey::random(&mut rng);
    let ephemeral_public = ephemeral.public_key().to_encoded_point(false);
    let recipient_point =
        k256::PublicKey::from_sec1_bytes(&recipient.public_key().to_sec1_bytes(true)).unwrap();
    let shared = (recipient_point.to_projective() * *ephemeral.to_nonzero_scalar())
        .to_affine()
        .to_encoded_point(false);

    let mut ikm = Vec::new();
    ikm.extend_from_slice(ephemeral_public.as_bytes());
    ikm.extend_from_slice(shared.as_bytes());
    let mut key = [0u8; 32];
    Hkdf::<Sha256>::new(None, &ikm).expand(&[], &mut key).unwrap();

    let nonce = [0x5au8; 16];
    let mut ciphertext = b"hello-tss".to_vec();
    let tag = AesGcm::<Aes256, U16>::new_from_slice(&key)
        .unwrap()
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce), &[], &mut ciphertext)
        .unwrap();

    let mut envelope = ephemeral_public.as_bytes().to_vec();
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&tag);
    envelope.extend_from_slice(&ciphertext);

    let decrypted = decrypt(&STANDARD.encode(&envelope), &recipient.secret_key().to_hex());
    assert_eq!(decrypted.unwrap(), "hello-tss");
}

#[test]
fn test_private_key_without_leading_zeros_is_accepted() {
    let mut bytes = [0x42u8; 32];
    bytes[0] = 0;
    let secret_key = SecretKey::from_bytes(&bytes).unwrap();
    let public_key = secret_key.public_key().to_hex();

    let ciphertext = encrypt_with_rng(&mut seeded_rng(43), "short key", &public_key).unwrap();
    assert_eq!(decrypt(&ciphertext, &hex::encode(&bytes[1..])).unwrap(), "short key");
}

// FAILURES
// ================================================================================================

#[test]
fn test_decrypting_with_another_key_fails() {
    let sender_target = key_pair(23);
    let other = key_pair(24);

    let ciphertext =
        encrypt_with_rng(&mut seeded_rng(25), "for someone else", &sender_target.public_key)
            .unwrap();

    assert_matches!(decrypt(&ciphertext, &other.private_key), Err(CipherError::Decryption));
}

#[test]
fn test_every_bit_flip_is_detected() {
    let document = key_pair(26);
    let ciphertext =
        encrypt_with_rng(&mut seeded_rng(27), "tamper me", &document.public_key).unwrap();
    let sealed = STANDARD.decode(&ciphertext).unwrap();

    for position in 0..sealed.len() {
        for bit in 0..8 {
            let mut tampered = sealed.clone();
            tampered[position] ^= 1 << bit;

            let result = decrypt(&STANDARD.encode(&tampered), &document.private_key);
            assert_eq!(result, Err(CipherError::Decryption), "byte {position}, bit {bit}");
        }
    }
}

#[rstest]
#[case::empty(0)]
#[case::one_byte(1)]
#[case::below_overhead(96)]
fn test_short_ciphertexts_fail_decryption(#[case] len: usize) {
    let document = key_pair(28);
    let ciphertext = STANDARD.encode(vec![0x04u8; len]);

    assert_matches!(decrypt(&ciphertext, &document.private_key), Err(CipherError::Decryption));
}

#[test]
fn test_truncated_ciphertext_fails_decryption() {
    let document = key_pair(29);
    let ciphertext =
        encrypt_with_rng(&mut seeded_rng(30), "cut short", &document.public_key).unwrap();
    let sealed = STANDARD.decode(&ciphertext).unwrap();

    let truncated = STANDARD.encode(&sealed[..sealed.len() - 1]);
    assert_matches!(decrypt(&truncated, &document.private_key), Err(CipherError::Decryption));
}

#[test]
fn test_encrypt_rejects_non_hex_public_key() {
    assert_matches!(
        encrypt_with_rng(&mut seeded_rng(31), "data", "not-hex"),
        Err(CipherError::InvalidKey { role: KeyRole::Public, source: KeyError::InvalidHex(_) })
    );
}

#[rstest]
#[case::empty("", KeyError::InvalidPublicKeyLength(0))]
#[case::private_key_length(
    "0101010101010101010101010101010101010101010101010101010101010101",
    KeyError::InvalidPublicKeyLength(32)
)]
#[case::bad_prefix(
    "050000000000000000000000000000000000000000000000000000000000000001",
    KeyError::InvalidPoint
)]
fn test_encrypt_rejects_invalid_public_keys(#[case] public_key: &str, #[case] expected: KeyError) {
    assert_eq!(
        encrypt_with_rng(&mut seeded_rng(32), "data", public_key),
        Err(CipherError::InvalidKey { role: KeyRole::Public, source: expected })
    );
}

#[test]
fn test_encrypt_rejects_compact_public_key() {
    // same x-coordinate as a valid key, so the bytes do decode as a point under the 05 tag
    let document = key_pair(47);
    let compact = format!("05{}", &document.public_key[2..]);

    assert_eq!(
        encrypt_with_rng(&mut seeded_rng(48), "hello-tss", &compact),
        Err(CipherError::InvalidKey { role: KeyRole::Public, source: KeyError::InvalidPoint })
    );
}

#[rstest]
#[case::lf(76, "\n")]
#[case::crlf(64, "\r\n")]
fn test_decrypt_accepts_line_wrapped_base64(#[case] width: usize, #[case] separator: &str) {
    let document = key_pair(49);
    let plaintext = "a message long enough that its base64 form spans several lines";
    let ciphertext = encrypt_with_rng(&mut seeded_rng(50), plaintext, &document.public_key).unwrap();

    let wrapped = ciphertext
        .as_bytes()
        .chunks(width)
        .map(|line| core::str::from_utf8(line).unwrap())
        .collect::<Vec<_>>()
        .join(separator);
    assert!(wrapped.contains('\n'));

    assert_eq!(decrypt(&wrapped, &document.private_key).unwrap(), plaintext);
}

#[test]
fn test_decrypt_rejects_invalid_base64() {
    let document = key_pair(33);

    assert_matches!(
        decrypt("not-base64!", &document.private_key),
        Err(CipherError::InvalidEncoding(EncodingError::Base64(_)))
    );
}

#[rstest]
#[case::not_hex("not-hex")]
#[case::odd_length("abc")]
#[case::empty("")]
#[case::zero("00")]
fn test_decrypt_rejects_invalid_private_keys(#[case] private_key: &str) {
    let document = key_pair(34);
    let ciphertext =
        encrypt_with_rng(&mut seeded_rng(35), "data", &document.public_key).unwrap();

    assert_matches!(
        decrypt(&ciphertext, private_key),
        Err(CipherError::InvalidKey { role: KeyRole::Private, .. })
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(CipherError::Decryption.to_string(), "failed to decrypt data");

    let err = encrypt_with_rng(&mut seeded_rng(36), "data", "not-hex").unwrap_err();
    assert!(err.to_string().starts_with("failed to decode public key: "));

    let document = key_pair(37);
    let err = decrypt("not-base64!", &document.private_key).unwrap_err();
    assert!(err.to_string().starts_with("failed to decode encrypted data: "));
}

// CONCURRENCY
// ================================================================================================

#[cfg(feature = "std")]
#[test]
fn test_concurrent_use() {
    use std::thread;

    let document = key_pair(38);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let document = document.clone();
            thread::spawn(move || {
                let plaintext = format!("message from thread {i}");
                let ciphertext = encrypt(&plaintext, &document.public_key).unwrap();
                let decrypted = decrypt(&ciphertext, &document.private_key).unwrap();
                (plaintext, decrypted)
            })
        })
        .collect();

    for handle in handles {
        let (plaintext, decrypted): (String, String) = handle.join().unwrap();
        assert_eq!(plaintext, decrypted);
    }
}

// PROPERTIES
// ================================================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_roundtrip(plaintext in ".*", seed in any::<u64>()) {
        let document = key_pair(seed);
        let ciphertext =
            encrypt_with_rng(&mut seeded_rng(seed ^ 1), &plaintext, &document.public_key).unwrap();

        prop_assert_eq!(decrypt(&ciphertext, &document.private_key).unwrap(), plaintext);
    }

    #[test]
    fn prop_bytes_roundtrip(plaintext in prop::collection::vec(any::<u8>(), 0..512)) {
        let document = key_pair(39);
        let ciphertext =
            encrypt_bytes_with_rng(&mut seeded_rng(40), &plaintext, &document.public_key).unwrap();

        prop_assert_eq!(decrypt_bytes(&ciphertext, &document.private_key).unwrap(), plaintext);
    }

    #[test]
    fn prop_arbitrary_ciphertext_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let document = key_pair(41);
        let result = decrypt_bytes(&STANDARD.encode(&data), &document.private_key);
        prop_assert_eq!(result, Err(CipherError::Decryption));
    }
}
