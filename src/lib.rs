//! bundle-ops - Git lifecycle management for the bundle of repositories behind one application

pub mod admin;
pub mod bundle;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod inspector;
pub mod lifecycle;
pub mod utils;
pub mod workspace;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use admin::{GitUsage, RepoAdministration};
pub use bundle::{RepoBundle, RepoDescriptor};
pub use commands::{Command, CommandContext};
pub use config::Config;
pub use error::{RepoAdminError, RepoResult};
pub use inspector::{Inspector, RepoInspector, RepoLocator};
pub use lifecycle::BranchLifecycleManager;
pub use workspace::BundleWorkspace;

/// Load the configuration from the default location
pub fn load_default_config() -> anyhow::Result<Config> {
    Config::load(constants::config::DEFAULT_CONFIG_FILE)
}
