pub(crate) mod actions;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod environment;
pub mod pipeline;

pub use environment::Environment;
pub use pipeline::{Pipeline, RunObserver, SilentObserver};
