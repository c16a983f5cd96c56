//! Password-based key derivation.
//!
//! The Revelation format fixes the KDF to PBKDF2-HMAC-SHA1 with 12000
//! iterations and a 32-byte output (the AES-256 key size).  These
//! parameters are interoperability constants, not tunables: changing
//! them would make existing databases unreadable.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;

use crate::envelope::{IV_LEN, SALT_LEN};

/// PBKDF2 iteration count mandated by the format.
pub const PBKDF2_ROUNDS: u32 = 12_000;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Derive the 32-byte cipher key from a password and salt.
///
/// Deterministic: the same (password, salt) pair always yields the same
/// key, which is what lets decrypt reproduce the key used at encrypt
/// time.  Deliberately slow; callers needing responsiveness run it on a
/// worker thread.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
    key
}

/// Generate a fresh random salt.  Called once per save; salts are never
/// reused across saves.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Generate a fresh random initialization vector, also once per save.
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}
