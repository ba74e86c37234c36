//! Config file discovery and loading.
//!
//! Schema and validation live in `domain::config`.

mod load_config;

pub use load_config::{config_candidates, load_config};
