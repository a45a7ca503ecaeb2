//! Utility modules for common functionality

pub mod filesystem;

pub use filesystem::ensure_directory_exists;
