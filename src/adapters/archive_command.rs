//! Archive extraction through the system `tar` and `unzip` tools.

use std::path::Path;

use crate::adapters::command::run_checked;
use crate::domain::ActionError;
use crate::ports::ArchiveExtractor;

const TAR_SUFFIXES: [&str; 6] = [".tar", ".tar.gz", ".tgz", ".tar.xz", ".txz", ".tar.bz2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveFormat {
    Tar,
    Zip,
}

impl ArchiveFormat {
    fn detect(file_name: &str) -> Option<Self> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else if TAR_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
            Some(ArchiveFormat::Tar)
        } else {
            None
        }
    }
}

/// Subprocess-backed extractor. `tar` detects the compression itself.
#[derive(Debug, Clone, Default)]
pub struct CommandArchiveExtractor;

impl CommandArchiveExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for CommandArchiveExtractor {
    fn unpack(&self, archive: &Path, into: &Path) -> Result<(), ActionError> {
        let extract_failed = |details: String| ActionError::ExtractFailed {
            archive: archive.display().to_string(),
            details,
        };

        let file_name = archive.file_name().and_then(|name| name.to_str()).unwrap_or_default();
        let format = ArchiveFormat::detect(file_name)
            .ok_or_else(|| extract_failed(format!("unsupported archive format: '{}'", file_name)))?;

        let archive_str = archive.to_string_lossy();
        let into_str = into.to_string_lossy();

        tracing::info!(archive = %archive.display(), into = %into.display(), "unpacking");

        let result = match format {
            ArchiveFormat::Tar => run_checked("tar", &["-xf", &archive_str, "-C", &into_str]),
            ArchiveFormat::Zip => {
                run_checked("unzip", &["-q", "-o", &archive_str, "-d", &into_str])
            }
        };

        result.map(|_| ()).map_err(extract_failed)
    }
}
