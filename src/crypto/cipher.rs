//! AES-256-CBC payload pipeline.
//!
//! Layout of the plaintext produced by decryption:
//!
//! ```text
//! [SHA-256 digest: 32 bytes][zlib stream + padding to a 16-byte boundary]
//! ```
//!
//! The digest covers the padded zlib stream.  The format carries no MAC:
//! a wrong password surfaces indirectly as a digest mismatch, invalid
//! padding, or a broken zlib stream, all of which map to
//! `Authentication`.  The digest is keyless, so it detects corruption
//! but proves nothing about authenticity; that is a constraint of the
//! format itself.

use std::io::Read;

use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};

use crate::envelope::{BLOCK_LEN, IV_LEN};
use crate::errors::{Result, StorePassError};
use crate::crypto::kdf::KEY_LEN;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Length of the SHA-256 digest prefix.
const DIGEST_LEN: usize = 32;

/// Decrypt, verify, and decompress a ciphertext into the markup text.
///
/// The ciphertext must already be block-aligned (the envelope codec
/// checks this).
pub fn decrypt_payload(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<String> {
    let plaintext = Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| StorePassError::Authentication)?;

    if plaintext.len() <= DIGEST_LEN {
        return Err(StorePassError::Format(
            "compressed data have zero size".to_string(),
        ));
    }
    let (stored_digest, compressed) = plaintext.split_at(DIGEST_LEN);

    // A wrong password turns the whole plaintext into garbage, so the
    // digest check is where a bad password is (almost always) caught.
    if Sha256::digest(compressed).as_slice() != stored_digest {
        return Err(StorePassError::Authentication);
    }

    let unpadded = strip_padding(compressed)?;

    let mut decoder = ZlibDecoder::new(unpadded);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|_| StorePassError::Authentication)?;

    String::from_utf8(decompressed)
        .map_err(|e| StorePassError::Format(format!("payload is not valid UTF-8: {e}")))
}

/// Compress, pad, hash, and encrypt markup text into the ciphertext.
pub fn encrypt_payload(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], xml: &str) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    std::io::Write::write_all(&mut encoder, xml.as_bytes())?;
    let compressed = encoder.finish()?;

    let padded = pad(compressed);

    let mut plaintext = Vec::with_capacity(DIGEST_LEN + padded.len());
    plaintext.extend_from_slice(&Sha256::digest(&padded));
    plaintext.extend_from_slice(&padded);

    let ciphertext =
        Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<NoPadding>(&plaintext);
    Ok(ciphertext)
}

/// Pad a buffer to the AES block size: `padlen` bytes of value `padlen`,
/// where `padlen` is 1..=16.  An already-aligned buffer gets a full
/// block of padding, as in PKCS#7.
fn pad(mut data: Vec<u8>) -> Vec<u8> {
    let padlen = BLOCK_LEN - data.len() % BLOCK_LEN;
    data.resize(data.len() + padlen, padlen as u8);
    data
}

/// Validate and strip the padding from a decrypted compressed stream.
///
/// `padlen` values of 1..=16 are accepted.  The upstream reader rejected
/// 16 even though its own writer produces it for aligned streams; we
/// accept it so every database we write can be read back.
fn strip_padding(data: &[u8]) -> Result<&[u8]> {
    let padlen = *data.last().ok_or(StorePassError::Authentication)? as usize;
    if padlen == 0 || padlen > BLOCK_LEN || padlen > data.len() {
        return Err(StorePassError::Authentication);
    }
    let (rest, padding) = data.split_at(data.len() - padlen);
    if padding.iter().any(|&b| b as usize != padlen) {
        return Err(StorePassError::Authentication);
    }
    Ok(rest)
}
