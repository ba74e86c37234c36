mod archive_extractor;
mod ownership;
mod package_manager;
mod release_feed;
mod repository_cloner;

pub use archive_extractor::ArchiveExtractor;
pub use ownership::OwnershipFixer;
pub use package_manager::PackageManager;
pub use release_feed::ReleaseFeed;
pub use repository_cloner::RepositoryCloner;

/// The external collaborators an action may call.
#[derive(Clone, Copy)]
pub struct Ports<'a> {
    pub packages: &'a dyn PackageManager,
    pub releases: &'a dyn ReleaseFeed,
    pub archives: &'a dyn ArchiveExtractor,
    pub repositories: &'a dyn RepositoryCloner,
    pub ownership: &'a dyn OwnershipFixer,
}
