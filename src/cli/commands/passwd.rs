//! `storepass passwd` — change the master password.
//!
//! The whole database is re-encrypted under a key derived from the new
//! password with a fresh salt and IV; the old password stops working
//! as soon as the atomic rename completes.

use zeroize::Zeroizing;

use crate::cli::{database_path, output, Cli};
use crate::errors::{Result, StorePassError};
use crate::storage::Storage;

/// Execute the `passwd` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = database_path(cli)?;
    let storage = Storage::new(&path);

    // Both prompts are interactive here on purpose: STOREPASS_PASSWORD
    // cannot supply two different passwords for one invocation.
    let old_password = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Current database password")
            .interact()
            .map_err(|e| StorePassError::Command(format!("password prompt: {e}")))?,
    );
    let db = storage.open(old_password.as_str())?;

    let new_password = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("New database password")
            .with_confirmation("Confirm new database password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| StorePassError::Command(format!("password prompt: {e}")))?,
    );

    storage.save(&db, new_password.as_str())?;
    output::success("Master password changed.");
    Ok(())
}
