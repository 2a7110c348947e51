//! Cryptographic utility functions

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::core::constants::SIGNING_KEY_LEN;

/// Generate `len` cryptographically secure random bytes
pub fn generate_key(len: usize) -> Vec<u8> {
    let mut key = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Generate a fresh session signing key
pub fn generate_signing_key() -> Vec<u8> {
    generate_key(SIGNING_KEY_LEN)
}

/// Decode a hex string (either case) to bytes
pub fn decode_hex(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(value)
}

/// Encode bytes as lowercase hex
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// SHA-256 digest of a string, lowercase hex
pub fn sha256_hex(data: &str) -> String {
    encode_hex(&Sha256::digest(data.as_bytes()))
}
