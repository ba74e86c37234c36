//! Account database lookups through `getent`.

use std::path::PathBuf;

use crate::adapters::command::run_checked;

/// Home directory of `user` from the passwd database.
pub fn passwd_home(user: &str) -> Result<PathBuf, String> {
    let output = run_checked("getent", &["passwd", user])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_passwd_home(&stdout).ok_or_else(|| format!("no home directory listed for '{}'", user))
}

/// Sixth field of the first passwd line, when non-empty.
fn parse_passwd_home(entry: &str) -> Option<PathBuf> {
    let line = entry.lines().next()?;
    let home = line.split(':').nth(5)?.trim();
    (!home.is_empty()).then(|| PathBuf::from(home))
}
