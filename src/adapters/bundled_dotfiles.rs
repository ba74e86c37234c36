//! Dotfiles embedded in the binary, used as the distribution root when none is
//! supplied.

use std::path::Path;

use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static DOTFILES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/dotfiles");

/// Write every bundled dotfile under `root`, preserving relative paths.
pub fn materialize(root: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(root)?;
    DOTFILES_DIR.extract(root).map_err(|err| {
        AppError::config_error(format!(
            "Failed to write bundled dotfiles to {}: {}",
            root.display(),
            err
        ))
    })
}
