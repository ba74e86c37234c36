use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{ActionError, Ownership};
use crate::ports::{ArchiveExtractor, OwnershipFixer, RepositoryCloner};

/// Unpacks any archive `name.ext` as `name-release/bin/name`.
#[derive(Default)]
pub struct FakeArchiveExtractor {
    unpacked: Mutex<Vec<PathBuf>>,
}

impl FakeArchiveExtractor {
    pub fn unpacked(&self) -> Vec<PathBuf> {
        self.unpacked.lock().unwrap().clone()
    }
}

impl ArchiveExtractor for FakeArchiveExtractor {
    fn unpack(&self, archive: &Path, into: &Path) -> Result<(), ActionError> {
        self.unpacked.lock().unwrap().push(archive.to_path_buf());
        let file_name = archive.file_name().and_then(|n| n.to_str()).unwrap_or("tool");
        let tool = file_name.split('.').next().unwrap_or("tool");
        let bin = into.join(format!("{}-release", tool)).join("bin");
        std::fs::create_dir_all(&bin)
            .and_then(|_| std::fs::write(bin.join(tool), "#!/bin/sh\n"))
            .map_err(|err| ActionError::ExtractFailed {
                archive: archive.display().to_string(),
                details: err.to_string(),
            })
    }
}

/// Creates `dest/.git` instead of cloning.
#[derive(Default)]
pub struct FakeCloner {
    clones: Mutex<Vec<String>>,
}

impl FakeCloner {
    pub fn clones(&self) -> Vec<String> {
        self.clones.lock().unwrap().clone()
    }
}

impl RepositoryCloner for FakeCloner {
    fn clone_repository(&self, url: &str, dest: &Path) -> Result<(), ActionError> {
        self.clones.lock().unwrap().push(url.to_string());
        std::fs::create_dir_all(dest.join(".git")).map_err(|err| ActionError::CloneFailed {
            url: url.to_string(),
            details: err.to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingOwnership {
    assigned: Mutex<Vec<PathBuf>>,
}

impl RecordingOwnership {
    pub fn assigned(&self) -> Vec<PathBuf> {
        self.assigned.lock().unwrap().clone()
    }
}

impl OwnershipFixer for RecordingOwnership {
    fn assign(&self, path: &Path, _owner: Ownership) -> Result<(), ActionError> {
        self.assigned.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
