//! The `cipher` use case for the Caesar toy.

use secsim_domain::cipher;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherDirection {
    Encrypt,
    Decrypt,
}

pub fn run_cipher(direction: CipherDirection, key: &str, text: &str) -> String {
    let shift = cipher::shift_for_key(key);
    tracing::debug!(?direction, shift, "caesar cipher");
    match direction {
        CipherDirection::Encrypt => cipher::encrypt(text, key),
        CipherDirection::Decrypt => cipher::decrypt(text, key),
    }
}
