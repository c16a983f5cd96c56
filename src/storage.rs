//! Storage engine façade.
//!
//! `Storage` binds a database file path and composes the lower layers:
//! file bytes → envelope codec → crypto pipeline → markup mapper on
//! load, and the inverse on save.  It adds no error kinds of its own:
//! `File`, `Format`, `Version`, and `Authentication` propagate from the
//! layer that produced them.
//!
//! A `Storage` value is also the session object: callers own one per
//! open database and there is no process-global state.  The engine does
//! no locking; two writers targeting the same path must be serialized
//! by the caller.

use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use crate::crypto::{decrypt_payload, derive_key, encrypt_payload, generate_iv, generate_salt};
use crate::envelope;
use crate::errors::Result;
use crate::markup;
use crate::model::Database;

/// Handle to one on-disk password database.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Bind a handle to a database file path.  No I/O happens until
    /// `open` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decrypt the database and return its plain markup text.
    ///
    /// This is the diagnostic `dump` surface; normal callers want
    /// `open`.
    pub fn read_plain(&self, password: &str) -> Result<String> {
        let raw = fs::read(&self.path)?;
        let env = envelope::read(&raw)?;

        let mut key = derive_key(password, &env.salt);
        let result = decrypt_payload(&key, &env.iv, env.ciphertext);
        key.zeroize();
        result
    }

    /// Decrypt and parse the database.
    pub fn open(&self, password: &str) -> Result<Database> {
        let xml = self.read_plain(password)?;
        markup::parse(&xml)
    }

    /// Encrypt plain markup text and write it to the database file.
    ///
    /// Every save draws a fresh salt and a fresh IV, so saving the same
    /// database twice produces different file bytes.  The write is an
    /// atomic replace: the blob goes to a temp file in the target
    /// directory and is renamed over the destination, so a crash
    /// mid-write cannot corrupt the previously valid file.
    pub fn write_plain(&self, xml: &str, password: &str) -> Result<()> {
        let salt = generate_salt();
        let iv = generate_iv();

        let mut key = derive_key(password, &salt);
        let ciphertext = encrypt_payload(&key, &iv, xml);
        key.zeroize();

        let blob = envelope::write(&salt, &iv, &ciphertext?);

        // The temp file must live in the same directory so the rename
        // stays on one filesystem and is atomic.
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &blob)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Serialize and save the database.
    pub fn save(&self, db: &Database, password: &str) -> Result<()> {
        let xml = markup::serialize(db)?;
        self.write_plain(&xml, password)
    }
}
