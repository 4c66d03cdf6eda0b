//! Server endpoint configuration

mod config_error;
mod launch;
mod server_config;
mod server_options;

pub use config_error::ConfigError;
pub use launch::{Launch, LaunchRef};
pub use server_config::ServerConfig;
pub use server_options::ServerOptions;
