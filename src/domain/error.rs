use std::io;

use thiserror::Error;

/// Failure of a single provisioning action.
///
/// Every variant names the subject it was acting on so the failing step can be
/// reported without further context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The package manager returned a failure for a package.
    #[error("installing package '{package}' failed: {details}")]
    PackageInstallFailed { package: String, details: String },

    /// A bundled or global configuration file could not be placed.
    #[error("copying '{source_path}' to '{dest}' failed: {details}")]
    ConfigCopyFailed { source_path: String, dest: String, details: String },

    /// No release asset could be resolved (endpoint error or no match).
    #[error("resolving a release of '{repo}' failed: {details}")]
    ReleaseResolutionFailed { repo: String, details: String },

    /// The selected asset could not be downloaded.
    #[error("downloading '{url}' failed: {details}")]
    DownloadFailed { url: String, details: String },

    /// An archive could not be unpacked or placed.
    #[error("extracting '{archive}' failed: {details}")]
    ExtractFailed { archive: String, details: String },

    /// A symbolic link could not be created.
    #[error("linking '{link}' failed: {details}")]
    LinkFailed { link: String, details: String },

    /// A configuration repository could not be cloned.
    #[error("cloning '{url}' failed: {details}")]
    CloneFailed { url: String, details: String },

    /// Ownership of placed files could not be handed back to the invoking user.
    #[error("restoring ownership of '{path}' failed: {details}")]
    OwnershipFailed { path: String, details: String },
}

impl ActionError {
    /// Process exit code reported when this failure ends a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ActionError::PackageInstallFailed { .. } => 10,
            ActionError::ConfigCopyFailed { .. } => 11,
            ActionError::ReleaseResolutionFailed { .. } => 12,
            ActionError::DownloadFailed { .. } => 13,
            ActionError::ExtractFailed { .. } => 14,
            ActionError::LinkFailed { .. } => 15,
            ActionError::CloneFailed { .. } => 16,
            ActionError::OwnershipFailed { .. } => 17,
        }
    }
}

/// Library-wide error type for rigup operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file content is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Step identifier is invalid.
    #[error("Invalid step name '{0}': must be lowercase alphanumeric with hyphens or underscores")]
    InvalidStepName(String),

    /// Two steps share a name within one pipeline.
    #[error("Step '{0}' is declared more than once")]
    DuplicateStep(String),

    /// Selector does not name a step of the pipeline.
    #[error("Step '{name}' not found. Available: {available}")]
    UnknownStep { name: String, available: String },

    /// Target home directory could not be determined.
    #[error("Home directory not found. Set HOME or pass --home.")]
    HomeNotFound,

    /// The running distribution has no supported package manager target.
    #[error("Unsupported distribution '{0}': expected a Debian or Fedora family system")]
    UnsupportedDistribution(String),

    /// A pipeline step failed; no later step ran.
    #[error("step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: ActionError,
    },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::StepFailed { source, .. } => source.exit_code(),
            _ => 1,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting io semantics.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidConfig(_)
            | AppError::TomlParse(_)
            | AppError::InvalidStepName(_)
            | AppError::DuplicateStep(_) => io::ErrorKind::InvalidInput,
            AppError::UnknownStep { .. } | AppError::HomeNotFound => io::ErrorKind::NotFound,
            AppError::UnsupportedDistribution(_) => io::ErrorKind::Unsupported,
            AppError::StepFailed { .. } => io::ErrorKind::Other,
        }
    }
}
