//! Binary envelope framing for the Revelation data-version-2 format.
//!
//! A database file has this layout:
//!
//! ```text
//! [magic "rvl\0": 4][data version: 1][pad: 1][app version: 3][pad: 3]
//! [salt: 8][IV: 16][ciphertext: rest of file, 16-byte aligned]
//! ```
//!
//! - **Magic** (`rvl\0`): identifies the format family.
//! - **Data version**: `2` is the only supported value; anything else is
//!   a `Version` error so callers can offer an upgrade path.
//! - **App version**: the producing application's version bytes; ignored
//!   on read, written as zeros.
//! - **Salt / IV**: fresh random bytes on every save, consumed by the
//!   crypto pipeline.
//! - **Ciphertext**: everything after the IV.  There is no length field;
//!   the rest of the file is the encrypted payload and must be an exact
//!   multiple of the AES block size.

use crate::errors::{Result, StorePassError};

/// Magic bytes at the start of every database file.
pub const MAGIC: &[u8; 4] = b"rvl\x00";

/// The only supported data version.
pub const DATA_VERSION: u8 = 2;

/// Length of the fixed-size header.
pub const HEADER_LEN: usize = 12;

/// Length of the key-derivation salt.
pub const SALT_LEN: usize = 8;

/// Length of the AES-CBC initialization vector.
pub const IV_LEN: usize = 16;

/// AES block size; the ciphertext length must be a multiple of this.
pub const BLOCK_LEN: usize = 16;

/// The parts of a database file, borrowed from the raw bytes.
#[derive(Debug)]
pub struct Envelope<'a> {
    pub version: u8,
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    pub ciphertext: &'a [u8],
}

/// Split raw file bytes into the envelope parts, validating the header.
pub fn read(data: &[u8]) -> Result<Envelope<'_>> {
    if data.len() < HEADER_LEN {
        return Err(StorePassError::Format(format!(
            "file header is incomplete, expected {HEADER_LEN} bytes but found {}",
            data.len()
        )));
    }
    let header = &data[..HEADER_LEN];

    if &header[..4] != MAGIC {
        return Err(StorePassError::Format(format!(
            "invalid magic number, expected {MAGIC:?} but found {:?}",
            &header[..4]
        )));
    }
    if header[4] != DATA_VERSION {
        return Err(StorePassError::Version(format!(
            "data version {}, only version {DATA_VERSION} is supported",
            header[4]
        )));
    }
    if header[5] != 0 {
        return Err(StorePassError::Format(format!(
            "non-zero header padding at byte 5, found {:#04x}",
            header[5]
        )));
    }
    // Bytes 6..9 carry the producing application's version; ignore them.
    if header[9..12] != [0, 0, 0] {
        return Err(StorePassError::Format(format!(
            "non-zero header padding at bytes 9..12, found {:?}",
            &header[9..12]
        )));
    }

    if data.len() < HEADER_LEN + SALT_LEN {
        return Err(StorePassError::Format(format!(
            "salt record is incomplete, expected {SALT_LEN} bytes but found {}",
            data.len() - HEADER_LEN
        )));
    }
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&data[HEADER_LEN..HEADER_LEN + SALT_LEN]);

    if data.len() < HEADER_LEN + SALT_LEN + IV_LEN {
        return Err(StorePassError::Format(format!(
            "initialization vector is incomplete, expected {IV_LEN} bytes but found {}",
            data.len() - HEADER_LEN - SALT_LEN
        )));
    }
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&data[HEADER_LEN + SALT_LEN..HEADER_LEN + SALT_LEN + IV_LEN]);

    let ciphertext = &data[HEADER_LEN + SALT_LEN + IV_LEN..];
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(StorePassError::Format(format!(
            "ciphertext of {} bytes is not {BLOCK_LEN}-byte aligned",
            ciphertext.len()
        )));
    }

    Ok(Envelope {
        version: header[4],
        salt,
        iv,
        ciphertext,
    })
}

/// Assemble a database file from its parts.  Pure concatenation; the
/// caller guarantees the ciphertext is block-aligned.
pub fn write(salt: &[u8; SALT_LEN], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + SALT_LEN + IV_LEN + ciphertext.len());
    buf.extend_from_slice(MAGIC); // 4 bytes
    buf.push(DATA_VERSION); // 1 byte
    buf.push(0); // header padding
    buf.extend_from_slice(&[0, 0, 0]); // app version
    buf.extend_from_slice(&[0, 0, 0]); // header padding
    buf.extend_from_slice(salt); // 8 bytes
    buf.extend_from_slice(iv); // 16 bytes
    buf.extend_from_slice(ciphertext);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_roundtrip() {
        let salt = [1u8; SALT_LEN];
        let iv = [2u8; IV_LEN];
        let ciphertext = [3u8; 32];

        let blob = write(&salt, &iv, &ciphertext);
        let env = read(&blob).unwrap();

        assert_eq!(env.version, DATA_VERSION);
        assert_eq!(env.salt, salt);
        assert_eq!(env.iv, iv);
        assert_eq!(env.ciphertext, ciphertext);
    }

    #[test]
    fn header_layout_is_exact() {
        let blob = write(&[0xAA; SALT_LEN], &[0xBB; IV_LEN], &[]);
        assert_eq!(&blob[..12], b"rvl\x00\x02\x00\x00\x00\x00\x00\x00\x00");
        assert_eq!(blob.len(), HEADER_LEN + SALT_LEN + IV_LEN);
    }

    #[test]
    fn short_file_is_rejected() {
        for len in [0, 11, HEADER_LEN + 3, HEADER_LEN + SALT_LEN + 7] {
            let mut blob = write(&[0; SALT_LEN], &[0; IV_LEN], &[]);
            blob.truncate(len);
            assert!(
                matches!(read(&blob), Err(StorePassError::Format(_))),
                "length {len}"
            );
        }
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut blob = write(&[0; SALT_LEN], &[0; IV_LEN], &[0; 16]);
        blob[0] = b'x';
        assert!(matches!(read(&blob), Err(StorePassError::Format(_))));
    }

    #[test]
    fn unsupported_version_is_distinct() {
        let mut blob = write(&[0; SALT_LEN], &[0; IV_LEN], &[0; 16]);
        blob[4] = 3;
        assert!(matches!(read(&blob), Err(StorePassError::Version(_))));
    }

    #[test]
    fn nonzero_padding_is_rejected() {
        let mut blob = write(&[0; SALT_LEN], &[0; IV_LEN], &[0; 16]);
        blob[5] = 1;
        assert!(matches!(read(&blob), Err(StorePassError::Format(_))));

        let mut blob = write(&[0; SALT_LEN], &[0; IV_LEN], &[0; 16]);
        blob[10] = 1;
        assert!(matches!(read(&blob), Err(StorePassError::Format(_))));
    }

    #[test]
    fn app_version_bytes_are_ignored() {
        let mut blob = write(&[0; SALT_LEN], &[0; IV_LEN], &[0; 16]);
        blob[6] = 0;
        blob[7] = 4;
        blob[8] = 14;
        assert!(read(&blob).is_ok());
    }

    #[test]
    fn misaligned_ciphertext_is_rejected() {
        let blob = write(&[0; SALT_LEN], &[0; IV_LEN], &[0; 17]);
        assert!(matches!(read(&blob), Err(StorePassError::Format(_))));
    }
}
