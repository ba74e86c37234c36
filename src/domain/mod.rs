pub mod action;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod package;
pub mod release;
pub mod step;

pub use action::{Action, MissingSource, PathSpec};
pub use config::{HttpConfig, ManagerSelection, PackagesConfig, ProvisionConfig, ReleasesConfig};
pub use context::{ExecutionContext, Ownership};
pub use error::{ActionError, AppError};
pub use package::PackageTarget;
pub use release::{AssetPattern, Release, ReleaseAsset, RepoSlug, select_asset};
pub use step::{
    ActionOutcome, RunReport, RunResult, Step, StepName, StepReport, StepStatus,
};
