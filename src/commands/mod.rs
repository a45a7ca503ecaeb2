//! Command implementations

pub mod base;
pub mod feature;
pub mod init;
pub mod release;
pub mod status;
pub mod validators;

pub use base::{Command, CommandContext};
pub use feature::{FeatureAction, FeatureCommand};
pub use init::InitCommand;
pub use release::{CheckoutCommand, ReleaseCommand, ReleaseStep};
pub use status::{LogCommand, ReportCommand, StatusCommand};
