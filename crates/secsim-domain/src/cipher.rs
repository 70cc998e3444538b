//! Caesar-cipher toy used by the encryption lesson. Not cryptography.

/// Shift used when no key is given.
pub const DEFAULT_SHIFT: u8 = 3;

/// The first UTF-16 code unit of the key, modulo 26.
pub fn shift_for_key(key: &str) -> u8 {
    key.encode_utf16()
        .next()
        .map(|unit| (unit % 26) as u8)
        .unwrap_or(DEFAULT_SHIFT)
}

pub fn encrypt(plaintext: &str, key: &str) -> String {
    rotate(plaintext, shift_for_key(key))
}

pub fn decrypt(ciphertext: &str, key: &str) -> String {
    rotate(ciphertext, 26 - shift_for_key(key))
}

fn rotate(text: &str, shift: u8) -> String {
    text.chars()
        .map(|c| {
            let base = if c.is_ascii_uppercase() {
                b'A'
            } else if c.is_ascii_lowercase() {
                b'a'
            } else {
                return c;
            };
            let offset = (c as u8 - base + shift) % 26;
            (base + offset) as char
        })
        .collect()
}
