#![no_main]

use base64::{Engine, engine::general_purpose::STANDARD};
use libfuzzer_sys::fuzz_target;
use tss_ecies::{SealedMessage, SecretKey, text};

// Fixed recipient key so that runs are reproducible.
const PRIVATE_KEY_HEX: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

fuzz_target!(|data: &[u8]| {
    // Malformed envelopes must be rejected with an error, never a panic.
    let Ok(secret_key) = SecretKey::from_hex(PRIVATE_KEY_HEX) else {
        return;
    };
    if let Ok(sealed) = SealedMessage::read_from_bytes(data) {
        assert_eq!(sealed.to_bytes(), data);
        assert!(secret_key.unseal(&sealed).is_err());
    }

    // The facade sees the same bytes both as raw text input and as an encoded envelope.
    if let Ok(input) = core::str::from_utf8(data) {
        let _ = text::decrypt(input, PRIVATE_KEY_HEX);
    }
    assert!(text::decrypt_bytes(&STANDARD.encode(data), PRIVATE_KEY_HEX).is_err());
});
