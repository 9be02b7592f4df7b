//! CLI command implementations for the Toolauth token CLI.

pub mod keys;
pub mod token;
