pub mod ports;

use crate::domain::PackageTarget;
use crate::ports::Ports;

pub use ports::{
    FakeArchiveExtractor, FakeCloner, FakePackageManager, FakeReleaseFeed, RecordingOwnership,
    release_with_assets,
};

/// One fake per port, borrowed together as [`Ports`].
pub struct FakePorts {
    pub packages: FakePackageManager,
    pub releases: FakeReleaseFeed,
    pub archives: FakeArchiveExtractor,
    pub repositories: FakeCloner,
    pub ownership: RecordingOwnership,
}

impl FakePorts {
    pub fn new() -> Self {
        Self {
            packages: FakePackageManager::new(PackageTarget::Apt),
            releases: FakeReleaseFeed::new(),
            archives: FakeArchiveExtractor::default(),
            repositories: FakeCloner::default(),
            ownership: RecordingOwnership::default(),
        }
    }

    pub fn ports(&self) -> Ports<'_> {
        Ports {
            packages: &self.packages,
            releases: &self.releases,
            archives: &self.archives,
            repositories: &self.repositories,
            ownership: &self.ownership,
        }
    }
}
