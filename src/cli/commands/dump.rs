//! `storepass dump` — print the raw decrypted markup for diagnostics.

use crate::cli::{database_path, prompt_password, Cli};
use crate::errors::Result;
use crate::storage::Storage;

/// Execute the `dump` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = database_path(cli)?;
    let password = prompt_password()?;
    let xml = Storage::new(&path).read_plain(password.as_str())?;
    println!("{xml}");
    Ok(())
}
