pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod manifest;
pub mod network;

pub use config::ProjectConfig;
pub use error::{ConfigError, ConfigResult};
