//! Placeholder translation between the table's canonical syntax and a format's native syntax.
//!
//! The canonical syntax is the Apple-style object placeholder:
//! - `%@`, `%1$@` for strings
//! - numeric specifiers (`%d`, `%2$d`, `%.2f`) as-is
//!
//! Tizen uses printf-style string placeholders (`%s`, `%1$s`). Escaped percent
//! `%%` is never treated as a placeholder.

/// Converts values between the canonical placeholder syntax and a format's own syntax.
pub trait SubstitutionTranslator {
    /// Native syntax → canonical syntax (used when reading).
    fn to_canonical(&self, value: &str) -> String;

    /// Canonical syntax → native syntax (used when writing).
    fn from_canonical(&self, value: &str) -> String;
}

/// Translator for printf-style string placeholders (`%s` ↔ `%@`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintfSubstitutions;

impl SubstitutionTranslator for PrintfSubstitutions {
    fn to_canonical(&self, value: &str) -> String {
        to_object_placeholders(value)
    }

    fn from_canonical(&self, value: &str) -> String {
        to_printf_placeholders(value)
    }
}

/// Leaves values untouched. Useful when a table already stores native placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerbatimSubstitutions;

impl SubstitutionTranslator for VerbatimSubstitutions {
    fn to_canonical(&self, value: &str) -> String {
        value.to_string()
    }

    fn from_canonical(&self, value: &str) -> String {
        value.to_string()
    }
}

/// Convert printf string placeholders to object placeholders.
/// - %s   -> %@
/// - %1$s -> %1$@
pub fn to_object_placeholders(input: &str) -> String {
    swap_string_conversion(input, 's', '@')
}

/// Convert object placeholders to printf string placeholders.
/// - %@   -> %s
/// - %1$@ -> %1$s
pub fn to_printf_placeholders(input: &str) -> String {
    swap_string_conversion(input, '@', 's')
}

/// Rewrites the conversion character of every `%[n$]<from>` placeholder to `to`.
///
/// Slices are only cut at ASCII positions, so multi-byte text passes through intact.
fn swap_string_conversion(input: &str, from: char, to: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        // Escaped percent
        if let Some(tail) = after.strip_prefix('%') {
            out.push_str("%%");
            rest = tail;
            continue;
        }

        // Optional positional index: digits followed by '$'
        let digits = after.len()
            - after
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .len();
        let (position, conversion) = match after[digits..].strip_prefix('$') {
            Some(conversion) if digits > 0 => (&after[..=digits], conversion),
            _ => ("", after),
        };

        match conversion.strip_prefix(from) {
            Some(tail) => {
                out.push('%');
                out.push_str(position);
                out.push(to);
                rest = tail;
            }
            None => {
                // Not a string placeholder; copy the '%' and continue after it
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printf_to_canonical() {
        let s = "Hello %s, you have %d items";
        assert_eq!(
            PrintfSubstitutions.to_canonical(s),
            "Hello %@, you have %d items"
        );
    }

    #[test]
    fn test_positional_placeholders() {
        assert_eq!(to_object_placeholders("%1$s and %2$s"), "%1$@ and %2$@");
        assert_eq!(to_printf_placeholders("%2$@ before %1$@"), "%2$s before %1$s");
    }

    #[test]
    fn test_numeric_specifiers_untouched() {
        let s = "%d %2$d %.2f %ld";
        assert_eq!(to_object_placeholders(s), s);
        assert_eq!(to_printf_placeholders(s), s);
    }

    #[test]
    fn test_ignore_escaped_percent() {
        assert_eq!(to_object_placeholders("50%%s off"), "50%%s off");
        assert_eq!(to_printf_placeholders("100%%@"), "100%%@");
    }

    #[test]
    fn test_trailing_percent() {
        assert_eq!(to_object_placeholders("100%"), "100%");
        assert_eq!(to_printf_placeholders("%1$"), "%1$");
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let s = "Привет, %@! Ça va? 日本語 %1$@";
        let native = PrintfSubstitutions.from_canonical(s);
        assert_eq!(native, "Привет, %s! Ça va? 日本語 %1$s");
        assert_eq!(PrintfSubstitutions.to_canonical(&native), s);
    }

    #[test]
    fn test_verbatim_is_identity() {
        let s = "%s %@";
        assert_eq!(VerbatimSubstitutions.to_canonical(s), s);
        assert_eq!(VerbatimSubstitutions.from_canonical(s), s);
    }
}
