//! Typed configuration files
//!
//! - **paths**: per-OS user and application configuration directories
//! - **serializer**: JSON, XML and TOML file formats
//! - **store**: [`Configuration`] binding a value to its file
//! - **env**: single-setting overrides from environment variables

pub mod env;
pub mod paths;
pub mod serializer;
pub mod store;

pub use env::{env_key, env_setting, env_setting_from};
pub use paths::{base_directory, configuration_directory, configuration_filename, ConfigurationKind};
pub use serializer::{ConfigSerializer, JsonSerializer, TomlSerializer, XmlSerializer};
pub use store::Configuration;
