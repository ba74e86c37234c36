use std::path::Path;

use crate::domain::ActionError;

/// Port for unpacking downloaded archives.
pub trait ArchiveExtractor {
    /// Unpack `archive` into the existing, empty directory `into`.
    fn unpack(&self, archive: &Path, into: &Path) -> Result<(), ActionError>;
}
