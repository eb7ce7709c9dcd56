//! The escaping pipeline shared by reading and writing Tizen values.
//!
//! Decoding applies, in order: entity unescaping, quote unescaping,
//! placeholder translation to canonical syntax, whitespace decoding.
//! Encoding mirrors it: quote escaping, entity escaping, placeholder
//! translation to native syntax, whitespace encoding. Quotes are escaped
//! before entities so the backslash markers survive entity escaping unchanged.

use std::borrow::Cow;

use lazy_static::lazy_static;
use quick_xml::escape::{escape, unescape};
use regex::{Captures, Regex};

use crate::placeholder::SubstitutionTranslator;

/// Escape sequence Tizen uses for a single significant space.
pub const SPACE_ESCAPE: &str = r"\u0020";

lazy_static! {
    static ref ENTITY_REGEX: Regex = Regex::new(r"&(?:#[0-9]+|#x[0-9a-fA-F]+|[A-Za-z]+);").unwrap();
}

/// Decodes a raw value taken from markup into the table's canonical form.
pub fn decode_value(raw: &str, substitutions: &dyn SubstitutionTranslator) -> String {
    let value = unescape_entities(raw);
    let value = value.replace(r"\'", "'").replace(r#"\""#, "\"");
    let value = substitutions.to_canonical(&value);
    decode_spaces(&value)
}

/// Encodes a canonical value for emission inside a `<text>` element.
pub fn encode_value(value: &str, substitutions: &dyn SubstitutionTranslator) -> String {
    let value = value.replace('"', r#"\""#).replace('\'', r"\'");
    let value = escape(value.as_str()).into_owned();
    let value = substitutions.from_canonical(&value);
    encode_spaces(&value)
}

/// Tizen keys are upper-case; the `IDS_` namespace is added by the entry template.
pub fn format_key(key: &str) -> String {
    key.to_uppercase()
}

/// Makes text safe for an XML comment body.
pub fn format_comment(comment: &str) -> String {
    comment.replace("--", "—")
}

/// Unescapes every well-formed entity. Unknown entities and bare ampersands are kept as-is.
pub fn unescape_entities(raw: &str) -> Cow<'_, str> {
    ENTITY_REGEX.replace_all(raw, |caps: &Captures| {
        let entity = &caps[0];
        match unescape(entity) {
            Ok(text) => text.into_owned(),
            Err(_) => entity.to_string(),
        }
    })
}

/// Replaces leading and trailing `\u0020` runs with the same number of spaces.
/// Runs elsewhere in the value are left alone.
pub fn decode_spaces(value: &str) -> String {
    let mut body = value;
    let mut leading = 0;
    while let Some(rest) = body.strip_prefix(SPACE_ESCAPE) {
        body = rest;
        leading += 1;
    }
    let mut trailing = 0;
    while let Some(rest) = body.strip_suffix(SPACE_ESCAPE) {
        body = rest;
        trailing += 1;
    }

    if leading == 0 && trailing == 0 {
        return value.to_string();
    }
    format!("{}{}{}", " ".repeat(leading), body, " ".repeat(trailing))
}

/// Replaces leading and trailing spaces with `\u0020`, which Tizen would otherwise strip.
pub fn encode_spaces(value: &str) -> String {
    let without_leading = value.trim_start_matches(' ');
    let body = without_leading.trim_end_matches(' ');
    let leading = value.len() - without_leading.len();
    let trailing = without_leading.len() - body.len();

    if leading == 0 && trailing == 0 {
        return value.to_string();
    }
    format!(
        "{}{}{}",
        SPACE_ESCAPE.repeat(leading),
        body,
        SPACE_ESCAPE.repeat(trailing)
    )
}
