//! All supported localization file formats for tizencodec.
//!
//! This module re-exports each format's formatter and provides the
//! [`FormatterRegistry`] for looking formats up by name.

pub mod tizen;

use std::path::Path;

// Reexporting the formats for easier access
pub use tizen::TizenFormatter;

use crate::{error::Error, traits::Formatter};

/// An explicit name → formatter mapping, built once at startup.
///
/// # Example
/// ```rust
/// use tizencodec::formats::FormatterRegistry;
/// let registry = FormatterRegistry::with_defaults();
/// assert_eq!(registry.get("tizen").unwrap().extension(), "xml");
/// assert_eq!(registry.get("TIZEN").unwrap().name(), "tizen");
/// assert!(registry.get("android").is_err());
/// ```
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in format registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TizenFormatter::new()));
        registry
    }

    /// Registers a formatter, replacing any formatter with the same name.
    pub fn register(&mut self, formatter: Box<dyn Formatter>) {
        self.formatters.retain(|f| f.name() != formatter.name());
        self.formatters.push(formatter);
    }

    /// Looks a formatter up by case-insensitive name.
    pub fn get(&self, name: &str) -> Result<&dyn Formatter, Error> {
        let name = name.trim();
        self.formatters
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .map(|f| f.as_ref())
            .ok_or_else(|| Error::UnknownFormat(name.to_string()))
    }

    /// Names of all registered formats, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }

    /// The first registered formatter that recognizes files in `path`.
    pub fn formatter_for_directory(&self, path: &Path) -> Option<&dyn Formatter> {
        self.formatters
            .iter()
            .find(|f| f.can_handle_directory(path))
            .map(|f| f.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{languages::LanguageTable, types::StringTable};

    #[test]
    fn test_with_defaults_registers_tizen() {
        let registry = FormatterRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["tizen"]);
        assert!(registry.get(" tizen ").is_ok());
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatterRegistry::new();
        let err = registry.get("tizen").err().unwrap();
        assert!(matches!(err, Error::UnknownFormat(ref name) if name == "tizen"));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = FormatterRegistry::with_defaults();
        registry.register(Box::new(
            TizenFormatter::new()
                .with_languages(LanguageTable::empty().with_mapping("kor-KR", "ko")),
        ));
        assert_eq!(registry.names().len(), 1);

        let formatter = registry.get("tizen").unwrap();
        assert_eq!(formatter.file_name_for_language("ko"), Some("kor-KR.xml".to_string()));
        assert_eq!(formatter.file_name_for_language("en"), None);
    }

    #[test]
    fn test_formatter_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FormatterRegistry::with_defaults();
        assert!(registry.formatter_for_directory(dir.path()).is_none());

        std::fs::write(dir.path().join("eng-GB.xml"), "<string_table></string_table>").unwrap();
        let formatter = registry.formatter_for_directory(dir.path()).unwrap();
        assert_eq!(formatter.name(), "tizen");

        let mut table = StringTable::new();
        assert_eq!(formatter.read_all_files(&mut table, dir.path()).unwrap(), vec!["en"]);
    }
}
