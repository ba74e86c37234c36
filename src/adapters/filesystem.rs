//! Filesystem placement primitives: recursive copy, forced symlinks and
//! archive-contents placement.

use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

/// Copy `source` (file or directory) to `dest`, replacing whatever is there.
pub fn copy_replacing(source: &Path, dest: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;

    remove_existing(dest)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    if metadata.is_dir() { copy_dir(source, dest) } else { fs::copy(source, dest).map(|_| ()) }
}

fn copy_dir(source: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else if file_type.is_symlink() {
            symlink(fs::read_link(entry.path())?, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Remove a file, symlink or directory tree if present.
pub fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Create a symlink at `link` pointing to `target`, replacing an existing entry.
pub fn replace_symlink(target: &Path, link: &Path) -> io::Result<()> {
    if !target.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("link target {} does not exist", target.display()),
        ));
    }
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::symlink_metadata(link).is_ok_and(|metadata| metadata.is_dir()) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} is a directory", link.display()),
        ));
    }
    remove_existing(link)?;
    symlink(target, link)
}

/// Move unpacked archive contents from `staging` to `dest`, dropping the first
/// `strip_components` path levels the way `tar --strip-components` does.
///
/// `dest` is replaced. Files sitting above the stripped depth are discarded.
pub fn place_unpacked(staging: &Path, dest: &Path, strip_components: usize) -> io::Result<()> {
    let mut level = vec![staging.to_path_buf()];
    for _ in 0..strip_components {
        let mut next = Vec::new();
        for dir in &level {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    next.push(entry.path());
                }
            }
        }
        level = next;
    }

    let mut entries: Vec<PathBuf> = Vec::new();
    for dir in &level {
        for entry in fs::read_dir(dir)? {
            entries.push(entry?.path());
        }
    }

    if entries.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("archive has no entries below depth {}", strip_components),
        ));
    }

    remove_existing(dest)?;
    fs::create_dir_all(dest)?;
    for entry in entries {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let target = dest.join(name);
        remove_existing(&target)?;
        fs::rename(&entry, &target)?;
    }
    Ok(())
}
