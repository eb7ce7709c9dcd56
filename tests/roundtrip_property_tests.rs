use std::collections::BTreeMap;

use proptest::prelude::*;
use tizencodec::escape::{SPACE_ESCAPE, decode_value, encode_value};
use tizencodec::{Formatter, PrintfSubstitutions, Row, StringTable, TizenFormatter};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn body_strategy() -> impl Strategy<Value = String> {
    let pieces = prop_oneof![
        proptest::string::string_regex("[A-Za-z0-9]{1,8}").expect("valid word regex"),
        Just("'".to_string()),
        Just("\"".to_string()),
        Just("&".to_string()),
        Just("<b>".to_string()),
        Just("%@".to_string()),
        Just("%1$@".to_string()),
        Just("%2$d".to_string()),
        Just("%%".to_string()),
        Just(" ".to_string()),
        Just("Ünïcödé".to_string()),
    ];
    prop::collection::vec(pieces, 0..8).prop_map(|parts| parts.concat())
}

fn value_strategy() -> impl Strategy<Value = String> {
    (0usize..=10, body_strategy(), 0usize..=10).prop_map(|(leading, body, trailing)| {
        format!("{}{}{}", " ".repeat(leading), body, " ".repeat(trailing))
    })
}

fn table_strategy() -> impl Strategy<Value = BTreeMap<String, (String, String)>> {
    prop::collection::btree_map(key_strategy(), (value_strategy(), value_strategy()), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn decode_inverts_encode(value in value_strategy()) {
        let encoded = encode_value(&value, &PrintfSubstitutions);
        prop_assert_eq!(decode_value(&encoded, &PrintfSubstitutions), value);
    }

    #[test]
    fn encoded_values_have_no_raw_markup_or_edge_spaces(value in value_strategy()) {
        let encoded = encode_value(&value, &PrintfSubstitutions);
        prop_assert!(!encoded.contains('<'));
        prop_assert!(!encoded.contains('"'));
        prop_assert!(!encoded.contains('\''));
        prop_assert!(!encoded.starts_with(' '));
        prop_assert!(!encoded.ends_with(' '));
    }

    #[test]
    fn edge_spaces_become_escape_runs(leading in 0usize..=10, trailing in 0usize..=10) {
        let value = format!("{}hello{}", " ".repeat(leading), " ".repeat(trailing));
        let encoded = encode_value(&value, &PrintfSubstitutions);
        prop_assert_eq!(
            &encoded,
            &format!("{}hello{}", SPACE_ESCAPE.repeat(leading), SPACE_ESCAPE.repeat(trailing))
        );
        prop_assert_eq!(decode_value(&encoded, &PrintfSubstitutions), value);
    }

    #[test]
    fn render_then_parse_preserves_every_translation(values in table_strategy()) {
        let mut table = StringTable::new();
        let section = table.add_section("Main");
        for (key, (en, fr)) in &values {
            section.add_row(
                Row::new(key.clone())
                    .with_translation("en", en.clone())
                    .with_translation("fr", fr.clone()),
            );
        }
        table.add_language("en");
        table.add_language("fr");

        let formatter = TizenFormatter::new();
        let mut reread = StringTable::new();
        let reread_section = reread.add_section("Main");
        for key in values.keys() {
            reread_section.add_row(Row::new(key.clone()));
        }
        for lang in ["en", "fr"] {
            let rendered = formatter.render(&table, lang);
            formatter.parse(&mut reread, &rendered, lang);
        }

        for (key, (en, fr)) in &values {
            prop_assert_eq!(reread.translation(key, "en"), Some(en.as_str()));
            prop_assert_eq!(reread.translation(key, "fr"), Some(fr.as_str()));
        }
        prop_assert_eq!(reread.rows().count(), values.len());
    }
}
