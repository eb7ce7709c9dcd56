//! Support for the Tizen `string_table` localization format.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <!-- Tizen Strings File -->
//! <!-- Generated by tizencodec 0.1.0 -->
//! <!-- Language: en -->
//! <string_table  Bversion="2.0.0.201311071819" Dversion="20120315">
//! 	<!-- SECTION: General -->
//! 	<text id="IDS_HELLO">Hello</text>
//! </string_table>
//! ```
//!
//! Reading is line oriented: every line of the root element's body may declare at
//! most one key and one comment, and a comment only attaches to a key declared on
//! the line right after it. The legacy `<resources>`/`<string name="…">` layout is
//! accepted on read as well.

use std::path::Path;

use indoc::formatdoc;
use lazy_static::lazy_static;
use quick_xml::{
    Reader,
    escape::escape,
    events::{BytesStart, Event},
};
use regex::Regex;
use tracing::debug;

use crate::{
    escape::{decode_value, encode_value, format_comment, format_key},
    languages::LanguageTable,
    options::TizenOptions,
    placeholder::{PrintfSubstitutions, SubstitutionTranslator},
    traits::Formatter,
    types::{Row, Section, StringTable},
};

pub const FORMAT_NAME: &str = "tizen";
pub const EXTENSION: &str = "xml";

/// Namespace prefix of every Tizen string id.
pub const KEY_PREFIX: &str = "IDS_";

/// Comments starting with this prefix mark section boundaries, not entry comments.
pub const SECTION_MARKER: &str = "SECTION:";

const STRING_TABLE_START: &str =
    r#"<string_table  Bversion="2.0.0.201311071819" Dversion="20120315">"#;
const STRING_TABLE_END: &str = "</string_table>";

lazy_static! {
    static ref ROOT_REGEX: Regex = Regex::new(
        r"(?s)<(?:string_table|resources)(?:\s[^>]*)?>(.*)</(?:string_table|resources)>"
    )
    .unwrap();
}

/// Reader and writer for Tizen string tables.
pub struct TizenFormatter {
    languages: LanguageTable,
    options: TizenOptions,
    substitutions: Box<dyn SubstitutionTranslator>,
}

impl Default for TizenFormatter {
    fn default() -> Self {
        Self {
            languages: LanguageTable::default(),
            options: TizenOptions::default(),
            substitutions: Box::new(PrintfSubstitutions),
        }
    }
}

impl TizenFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_languages(mut self, languages: LanguageTable) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_options(mut self, options: TizenOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the placeholder translator used on both read and write.
    pub fn with_substitutions(mut self, substitutions: Box<dyn SubstitutionTranslator>) -> Self {
        self.substitutions = substitutions;
        self
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    pub fn options(&self) -> &TizenOptions {
        &self.options
    }

    /// Decodes a raw `<text>` body into the table's canonical form.
    pub fn decode(&self, raw: &str) -> String {
        decode_value(raw, self.substitutions.as_ref())
    }

    /// Encodes a canonical value for a `<text>` body.
    pub fn encode(&self, value: &str) -> String {
        encode_value(value, self.substitutions.as_ref())
    }

    fn format_header(&self, tag: &str) -> String {
        formatdoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <!-- Tizen Strings File -->
            <!-- {generator} -->
            <!-- Language: {tag} -->"#,
            generator = format_comment(&self.options.generator),
            tag = tag,
        }
    }

    fn format_section(&self, section: &Section, lang: &str) -> Option<String> {
        let rows: Vec<String> = section
            .rows
            .iter()
            .filter_map(|row| self.format_row(row, lang))
            .collect();
        if rows.is_empty() {
            return None;
        }

        let mut result = String::new();
        if !section.name.is_empty() {
            result.push_str(&format!(
                "\n\t<!-- {} {} -->",
                SECTION_MARKER,
                format_comment(&section.name)
            ));
        }
        result.push('\n');
        result.push_str(&rows.join("\n"));
        Some(result)
    }

    fn format_row(&self, row: &Row, lang: &str) -> Option<String> {
        let value = row.translated_string_for_lang(lang)?;
        let mut result = String::new();
        if let Some(comment) = row.comment.as_deref().filter(|c| !c.is_empty()) {
            result.push_str(&format!("\t<!-- {} -->\n", format_comment(comment)));
        }
        result.push_str(&format!(
            "\t<text id=\"{}{}\">{}</text>",
            KEY_PREFIX,
            escape(&format_key(&row.key)),
            self.encode(value)
        ));
        Some(result)
    }
}

impl Formatter for TizenFormatter {
    fn name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn default_file_name(&self) -> &str {
        &self.options.file_name
    }

    fn can_handle_directory(&self, path: &Path) -> bool {
        let Ok(entries) = std::fs::read_dir(path) else {
            return false;
        };
        entries
            .filter_map(Result::ok)
            .any(|entry| self.languages.resolve_path(entry.file_name()).is_some())
    }

    fn determine_language_given_path(&self, path: &Path) -> Option<String> {
        self.languages.resolve_path(path).map(str::to_string)
    }

    fn file_name_for_language(&self, lang: &str) -> Option<String> {
        self.languages
            .output_locale(lang)
            .map(|(locale, _)| format!("{}.{}", locale, EXTENSION))
    }

    fn parse(&self, table: &mut StringTable, content: &str, lang: &str) {
        let Some(body) = ROOT_REGEX.captures(content).and_then(|caps| caps.get(1)) else {
            debug!(lang, "no string table element found");
            return;
        };

        let mut comment: Option<String> = None;
        for line in body.as_str().lines() {
            let tokens = tokenize_line(line);

            if let Some(decl) = &tokens.key {
                let key = match &decl.name {
                    KeyName::Id(id) => table.resolve_key(id.strip_prefix(KEY_PREFIX).unwrap_or(id)),
                    KeyName::Name(name) => name.clone(),
                };
                table.set_translation(&key, lang, self.decode(&decl.raw_value));
                if let Some(text) = comment.take().filter(|c| is_entry_comment(c)) {
                    table.set_comment(&key, text);
                }
            }

            match tokens.comment {
                Some(text) => comment = Some(text),
                // Anything else between a comment and its key breaks the association.
                None if tokens.key.is_none() => comment = None,
                None => {}
            }
        }
    }

    fn render(&self, table: &StringTable, lang: &str) -> String {
        let tag = self
            .languages
            .output_locale(lang)
            .map_or(lang, |(_, tag)| tag);

        let mut content = self.format_header(tag);
        content.push('\n');
        content.push_str(STRING_TABLE_START);

        let sections: Vec<String> = table
            .sections
            .iter()
            .filter_map(|section| self.format_section(section, lang))
            .collect();
        content.push_str(&sections.join("\n"));

        content.push('\n');
        content.push_str(STRING_TABLE_END);
        content.push('\n');
        content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyName {
    /// `<text id="IDS_…">`
    Id(String),
    /// `<string name="…">`
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyDecl {
    name: KeyName,
    raw_value: String,
}

/// What a single body line declares.
#[derive(Debug, Default, PartialEq, Eq)]
struct LineTokens {
    key: Option<KeyDecl>,
    comment: Option<String>,
}

/// Tokenizes one line of the root element's body.
///
/// Only the first key and the first comment count. A key element that does not
/// close on the same line has an empty value. Malformed markup stops tokenizing
/// and keeps whatever was found before it.
fn tokenize_line(line: &str) -> LineTokens {
    let mut reader = Reader::from_str(line);
    reader.config_mut().check_end_names = false;

    let mut tokens = LineTokens::default();
    let mut open: Option<KeyDecl> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Comment(text)) => {
                if tokens.comment.is_none() {
                    tokens.comment = Some(strip_delimiter_spaces(&String::from_utf8_lossy(&text)));
                }
            }
            Ok(Event::Start(e)) => {
                if tokens.key.is_none() && open.is_none() {
                    open = key_name(&e).map(|name| KeyDecl {
                        name,
                        raw_value: String::new(),
                    });
                }
            }
            Ok(Event::Empty(e)) => {
                if tokens.key.is_none() && open.is_none() {
                    tokens.key = key_name(&e).map(|name| KeyDecl {
                        name,
                        raw_value: String::new(),
                    });
                }
            }
            Ok(Event::Text(text)) => {
                if let Some(decl) = open.as_mut() {
                    decl.raw_value.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Ok(Event::End(_)) => {
                if let Some(decl) = open.take() {
                    tokens.key = Some(decl);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, line, "malformed line");
                break;
            }
        }
    }

    if let Some(mut decl) = open.take() {
        if tokens.key.is_none() {
            decl.raw_value.clear();
            tokens.key = Some(decl);
        }
    }
    tokens
}

/// Blank comments and section markers never attach to entries.
fn is_entry_comment(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && !text.starts_with(SECTION_MARKER)
}

/// Drops the single space on each side of `<!-- text -->`, keeping any padding beyond it.
fn strip_delimiter_spaces(text: &str) -> String {
    let text = text.strip_prefix(' ').unwrap_or(text);
    text.strip_suffix(' ').unwrap_or(text).to_string()
}

fn key_name(e: &BytesStart) -> Option<KeyName> {
    let attribute = |name: &str| {
        e.try_get_attribute(name)
            .ok()
            .flatten()
            .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
            .filter(|v| !v.is_empty())
    };
    match e.name().as_ref() {
        b"text" => attribute("id").map(KeyName::Id),
        b"string" => attribute("name").map(KeyName::Name),
        _ => None,
    }
}
