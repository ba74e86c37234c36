pub mod archive_command;
pub mod bundled_dotfiles;
pub(crate) mod command;
pub mod filesystem;
pub mod git_clone;
pub mod ownership_command;
pub mod package_manager_command;
pub mod release_feed_http;
pub mod user_account;

pub use archive_command::CommandArchiveExtractor;
pub use git_clone::Git2Cloner;
pub use ownership_command::ChownCommand;
pub use package_manager_command::CommandPackageManager;
pub use release_feed_http::HttpReleaseFeed;
