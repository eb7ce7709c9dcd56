//! CLI library for testing purposes

pub mod commands;

pub use commands::GlobalOptions;
pub use tizencodec::{Error, StringTable};
