#![no_main]

use libfuzzer_sys::fuzz_target;
use tss_ecies::{PublicKey, SecretKey, text};

fuzz_target!(|data: &[u8]| {
    // Key decoding must return an error on malformed input, never panic.
    if let Ok(secret_key) = SecretKey::from_bytes(data) {
        let reparsed = SecretKey::from_hex(&secret_key.to_hex()).unwrap();
        assert_eq!(reparsed, secret_key);
    }
    if let Ok(public_key) = PublicKey::from_sec1_bytes(data) {
        let reparsed = PublicKey::from_hex(&public_key.to_hex()).unwrap();
        assert_eq!(reparsed, public_key);
    }

    if let Ok(input) = core::str::from_utf8(data) {
        let _ = SecretKey::from_hex(input);
        let _ = PublicKey::from_hex(input);
        let _ = text::parse_key_pair(input);
    }
});
