//! Cryptographic pipeline for StorePass.
//!
//! This module provides:
//! - PBKDF2 password-based key derivation and salt/IV generation (`kdf`)
//! - the AES-256-CBC + zlib payload pipeline (`cipher`)

pub mod cipher;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, encrypt_payload, ...};
pub use cipher::{decrypt_payload, encrypt_payload};
pub use kdf::{derive_key, generate_iv, generate_salt, KEY_LEN, PBKDF2_ROUNDS};
