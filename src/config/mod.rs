//! Configuration management module

pub mod loader;
pub mod secrets;
pub mod validation;

pub use loader::{Config, ExtraRepo};
pub use secrets::{EnvSecretStore, SecretStore, YamlSecretStore, github_token};
pub use validation::ValidationError;
