#![forbid(unsafe_code)]
//! Tizen string-table localization codec for Rust.
//!
//! Reads Tizen `string_table` XML files into a shared [`StringTable`] and
//! writes them back, one file per language, with Tizen's escaping and
//! placeholder conventions applied symmetrically on both paths.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tizencodec::{StringTable, formats::FormatterRegistry};
//!
//! let registry = FormatterRegistry::with_defaults();
//! let tizen = registry.get("tizen")?;
//!
//! // Read every `<locale>.xml` below `res/`, then write them all to `out/`
//! let mut table = StringTable::new();
//! tizen.read_all_files(&mut table, "res".as_ref())?;
//! tizen.write_all_files(&table, "out".as_ref())?;
//! # Ok::<(), tizencodec::Error>(())
//! ```

pub mod error;
pub mod escape;
pub mod formats;
pub mod languages;
pub mod options;
pub mod placeholder;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{FormatterRegistry, TizenFormatter},
    languages::LanguageTable,
    options::TizenOptions,
    placeholder::{PrintfSubstitutions, SubstitutionTranslator},
    traits::Formatter,
    types::{Row, Section, StringTable},
};
