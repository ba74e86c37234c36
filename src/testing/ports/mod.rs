mod package_manager_stub;
mod release_feed_stub;
mod tool_stubs;

pub use package_manager_stub::FakePackageManager;
pub use release_feed_stub::{FakeReleaseFeed, release_with_assets};
pub use tool_stubs::{FakeArchiveExtractor, FakeCloner, RecordingOwnership};
