//! Reversible text encoding: UTF-8 bytes as standard base64.
//!
//! Not encryption. Anyone can decode the output.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Error decoding text. Make sure the encoded message is correct and was generated here.")]
    Decode,
}

pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn decode(encoded: &str) -> Result<String, CipherError> {
    let bytes = STANDARD.decode(encoded).map_err(|_| CipherError::Decode)?;
    String::from_utf8(bytes).map_err(|_| CipherError::Decode)
}
