//! Core, format-agnostic types for tizencodec.
//! Formatters parse into these; formatters render these.

use std::{
    collections::BTreeMap,
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The shared string table: every key, its per-language values and comments,
/// grouped into ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringTable {
    /// Ordered sections. Order drives the layout of rendered files.
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Every language that has a value somewhere in the table, in order of first appearance.
    #[serde(default)]
    pub languages: Vec<String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new, empty section and returns it.
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        self.sections.push(Section::new(name));
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Records a language as known to the table, keeping first-appearance order.
    pub fn add_language(&mut self, lang: &str) {
        if !self.languages.iter().any(|l| l == lang) {
            self.languages.push(lang.to_string());
        }
    }

    /// Iterates all rows of all sections in stable order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    pub fn find_row(&self, key: &str) -> Option<&Row> {
        self.rows().find(|row| row.key == key)
    }

    pub fn find_row_mut(&mut self, key: &str) -> Option<&mut Row> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.rows.iter_mut())
            .find(|row| row.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_row(key).is_some()
    }

    pub fn translation(&self, key: &str, lang: &str) -> Option<&str> {
        self.find_row(key)
            .and_then(|row| row.translated_string_for_lang(lang))
    }

    /// Sets the value of `key` for `lang`.
    ///
    /// Unknown keys are appended to the last section; an unnamed section is
    /// created when the table has none.
    pub fn set_translation(&mut self, key: &str, lang: &str, value: impl Into<String>) {
        self.add_language(lang);
        let value = value.into();

        if let Some(row) = self.find_row_mut(key) {
            row.translations.insert(lang.to_string(), value);
            return;
        }

        if self.sections.is_empty() {
            self.add_section("");
        }
        let mut row = Row::new(key);
        row.translations.insert(lang.to_string(), value);
        if let Some(section) = self.sections.last_mut() {
            section.rows.push(row);
        }
    }

    pub fn comment(&self, key: &str) -> Option<&str> {
        self.find_row(key).and_then(|row| row.comment.as_deref())
    }

    /// Sets the comment of an existing row. Returns `false` when the key is unknown.
    pub fn set_comment(&mut self, key: &str, comment: impl Into<String>) -> bool {
        match self.find_row_mut(key) {
            Some(row) => {
                row.comment = Some(comment.into());
                true
            }
            None => false,
        }
    }

    /// Every language with a value in the table: the recorded `languages` first,
    /// then languages only found on rows, in order of first appearance.
    pub fn all_languages(&self) -> Vec<String> {
        let mut langs = self.languages.clone();
        for row in self.rows() {
            for lang in row.translations.keys() {
                if !langs.contains(lang) {
                    langs.push(lang.clone());
                }
            }
        }
        langs
    }

    /// Maps a normalized (upper-cased) key read from a file back onto an
    /// existing key of the table. Falls back to `candidate` itself.
    pub fn resolve_key(&self, candidate: &str) -> String {
        if self.contains_key(candidate) {
            return candidate.to_string();
        }
        self.rows()
            .find(|row| row.key.to_uppercase() == candidate)
            .map(|row| row.key.clone())
            .unwrap_or_else(|| candidate.to_string())
    }

    /// Loads a table from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Saves the table as pretty-printed JSON, creating parent directories as needed.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// A named group of rows. Sections only affect file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row and returns it for further editing.
    pub fn add_row(&mut self, row: Row) -> &mut Row {
        self.rows.push(row);
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }
}

/// A single key with its translations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Row {
    /// Unique key, format-agnostic.
    pub key: String,

    /// Optional comment for translators.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    /// Map from language → value.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Row {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            comment: None,
            translations: BTreeMap::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_translation(mut self, lang: impl Into<String>, value: impl Into<String>) -> Self {
        self.translations.insert(lang.into(), value.into());
        self
    }

    pub fn translated_string_for_lang(&self, lang: &str) -> Option<&str> {
        self.translations.get(lang).map(String::as_str)
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Row {{ key: {}, languages: {} }}",
            self.key,
            self.translations
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
