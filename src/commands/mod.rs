//! Command implementations for the bootstrapper CLI

pub mod completions;
pub mod run;
pub mod status;
pub mod version;
