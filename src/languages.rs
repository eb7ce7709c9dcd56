//! Locale code ↔ Tizen language tag resolution.
//!
//! Files are named after a locale code (`eng-GB.xml`, `values-eng-GB.xml`)
//! while the generated files declare the short Tizen tag (`en`).

use std::{collections::BTreeMap, path::Path};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::Error;

lazy_static! {
    /// Built-in locale code → Tizen language tag table.
    static ref LANG_CODES: BTreeMap<&'static str, &'static str> = {
        let mut m = BTreeMap::new();
        m.insert("eng-GB", "en");
        m.insert("rus-RU", "ru");
        m.insert("fra-FR", "fr");
        m.insert("deu-DE", "de");
        m.insert("spa-ES", "es");
        m.insert("ita-IT", "it");
        m.insert("ces-CZ", "cs");
        m.insert("pol-PL", "pl");
        m.insert("por-PT", "pt");
        m.insert("ukr-UA", "uk");
        m
    };

    /// `<anything>-<locale>-<region>.xml`: the candidate is the last two hyphenated pieces.
    static ref CANDIDATE_REGEX: Regex = Regex::new(r"^(?:.*-)?([^-]+-[^-]+)\.xml$").unwrap();
}

/// Mapping from locale codes to Tizen language tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    codes: BTreeMap<String, String>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self {
            codes: LANG_CODES
                .iter()
                .map(|(locale, tag)| (locale.to_string(), tag.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LanguageMapConfig {
    #[serde(default)]
    languages: BTreeMap<String, String>,
}

impl LanguageTable {
    /// Creates the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with no mappings at all.
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// Adds or overrides a mapping.
    pub fn with_mapping(mut self, locale: impl Into<String>, tag: impl Into<String>) -> Self {
        self.insert(locale, tag);
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, tag: impl Into<String>) {
        self.codes.insert(locale.into(), tag.into());
    }

    /// Parses a TOML document with a `[languages]` table and merges it over the built-in table.
    ///
    /// ```rust
    /// use tizencodec::languages::LanguageTable;
    /// let table = LanguageTable::from_toml_str("[languages]\n\"kor-KR\" = \"ko\"\n").unwrap();
    /// assert_eq!(table.resolve("kor-KR"), Some("ko"));
    /// assert_eq!(table.resolve("eng-GB"), Some("en"));
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        let config: LanguageMapConfig =
            toml::from_str(s).map_err(|e| Error::config_error(e.to_string()))?;
        let mut table = Self::default();
        for (locale, tag) in config.languages {
            if locale.trim().is_empty() || tag.trim().is_empty() {
                return Err(Error::config_error(format!(
                    "empty language mapping `{}` = `{}`",
                    locale, tag
                )));
            }
            table.insert(locale, tag);
        }
        Ok(table)
    }

    /// Looks up the Tizen tag for a locale code.
    pub fn resolve(&self, locale: &str) -> Option<&str> {
        self.codes.get(locale).map(String::as_str)
    }

    /// Reverse lookup: the first locale code (in sorted order) mapped to `tag`.
    pub fn locale_for_tag(&self, tag: &str) -> Option<&str> {
        self.codes
            .iter()
            .find(|(_, t)| t.as_str() == tag)
            .map(|(locale, _)| locale.as_str())
    }

    /// Resolves a table language, given either as locale code or as Tizen tag,
    /// to the `(locale, tag)` pair used for output files.
    pub fn output_locale(&self, lang: &str) -> Option<(&str, &str)> {
        if let Some((locale, tag)) = self.codes.get_key_value(lang) {
            return Some((locale.as_str(), tag.as_str()));
        }
        let locale = self.locale_for_tag(lang)?;
        Some((locale, self.resolve(locale)?))
    }

    /// Extracts a candidate locale code from the first path component shaped like
    /// `<stem>.xml` with a hyphen in its stem.
    ///
    /// ```rust
    /// use tizencodec::languages::LanguageTable;
    /// assert_eq!(
    ///     LanguageTable::extract_candidate("res/values-eng-GB.xml"),
    ///     Some("eng-GB".to_string())
    /// );
    /// assert_eq!(LanguageTable::extract_candidate("res/strings.xml"), None);
    /// ```
    pub fn extract_candidate<P: AsRef<Path>>(path: P) -> Option<String> {
        path.as_ref().components().find_map(|c| {
            let component = c.as_os_str().to_str()?;
            CANDIDATE_REGEX
                .captures(component)
                .map(|caps| caps[1].to_string())
        })
    }

    /// Extracts the candidate locale code from `path` and resolves it.
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> Option<&str> {
        let candidate = Self::extract_candidate(path)?;
        self.resolve(&candidate)
    }

    /// Iterates `(locale, tag)` pairs in locale order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes
            .iter()
            .map(|(locale, tag)| (locale.as_str(), tag.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = LanguageTable::new();
        assert_eq!(table.len(), 10);
        assert_eq!(table.resolve("eng-GB"), Some("en"));
        assert_eq!(table.resolve("ukr-UA"), Some("uk"));
        assert_eq!(table.resolve("en"), None);
        assert_eq!(table.resolve("jpn-JP"), None);
    }

    #[test]
    fn test_extract_candidate_variants() {
        assert_eq!(
            LanguageTable::extract_candidate("eng-GB.xml"),
            Some("eng-GB".to_string())
        );
        assert_eq!(
            LanguageTable::extract_candidate("dir/values-eng-GB.xml"),
            Some("eng-GB".to_string())
        );
        assert_eq!(LanguageTable::extract_candidate("dir/eng-GB.json"), None);
        assert_eq!(LanguageTable::extract_candidate("values/strings.xml"), None);
    }

    #[test]
    fn test_extract_candidate_uses_first_match() {
        assert_eq!(
            LanguageTable::extract_candidate("fra-FR.xml/deu-DE.xml"),
            Some("fra-FR".to_string())
        );
    }

    #[test]
    fn test_resolve_path() {
        let table = LanguageTable::new();
        assert_eq!(table.resolve_path("dir/values-eng-GB.xml"), Some("en"));
        assert_eq!(table.resolve_path("res/deu-DE.xml"), Some("de"));
        assert_eq!(table.resolve_path("res/jpn-JP.xml"), None);
        assert_eq!(table.resolve_path("res/strings.xml"), None);
    }

    #[test]
    fn test_output_locale_accepts_locale_or_tag() {
        let table = LanguageTable::new();
        assert_eq!(table.output_locale("fra-FR"), Some(("fra-FR", "fr")));
        assert_eq!(table.output_locale("fr"), Some(("fra-FR", "fr")));
        assert_eq!(table.output_locale("jp"), None);
    }

    #[test]
    fn test_with_mapping_extends_table() {
        let table = LanguageTable::empty().with_mapping("kor-KR", "ko");
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("kor-KR"), Some("ko"));
        assert_eq!(table.locale_for_tag("ko"), Some("kor-KR"));
        assert!(LanguageTable::empty().is_empty());
    }

    #[test]
    fn test_from_toml_str_overrides_and_extends() {
        let toml = r#"
            [languages]
            "eng-GB" = "en-GB"
            "kor-KR" = "ko"
        "#;
        let table = LanguageTable::from_toml_str(toml).unwrap();
        assert_eq!(table.resolve("eng-GB"), Some("en-GB"));
        assert_eq!(table.resolve("kor-KR"), Some("ko"));
        assert_eq!(table.resolve("fra-FR"), Some("fr"));
    }

    #[test]
    fn test_from_toml_str_rejects_invalid_documents() {
        assert!(LanguageTable::from_toml_str("languages = 3").is_err());
        assert!(LanguageTable::from_toml_str("[languages]\n\"kor-KR\" = \"\"").is_err());
        assert!(LanguageTable::from_toml_str("").is_ok());
    }
}
