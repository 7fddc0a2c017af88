//! Shared helpers for building and reading section fields.
//!
//! The build helpers never invent values: an absent attribute pushes
//! nothing, so documented defaults are a mapper decision, not a renderer
//! side effect.

use serde_json::{Map, Value};
use uci_text_core::{FieldValue, UciField, UciSection};

use crate::profile::NativeParseError;
use crate::tables;

/// Normalize separator characters in a slug token to underscores.
pub(crate) fn slug_token(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub(crate) fn push_option(fields: &mut Vec<UciField>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        fields.push(UciField::option(key, value));
    }
}

/// Booleans serialize as the literal strings `1`/`0`.
pub(crate) fn push_flag(fields: &mut Vec<UciField>, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        fields.push(UciField::option(key, if value { "1" } else { "0" }));
    }
}

/// Always-list keys: one `list` line per value, even when singular.
pub(crate) fn push_list(fields: &mut Vec<UciField>, key: &str, values: &[String]) {
    if !values.is_empty() {
        fields.push(UciField::list(key, values.to_vec()));
    }
}

/// Space-joined scalar keys: one value renders as an option, several as a list.
pub(crate) fn push_scalar_or_list(fields: &mut Vec<UciField>, key: &str, values: &[String]) {
    match values {
        [] => {}
        [single] => fields.push(UciField::option(key, single.clone())),
        many => fields.push(UciField::list(key, many.to_vec())),
    }
}

/// `{tcp, udp}` in any order collapses to the single `tcpudp` token.
pub(crate) fn push_proto(fields: &mut Vec<UciField>, values: &[String]) {
    if is_tcp_udp(values) {
        fields.push(UciField::option("proto", "tcpudp"));
    } else {
        push_scalar_or_list(fields, "proto", values);
    }
}

fn is_tcp_udp(values: &[String]) -> bool {
    values.len() == 2
        && values.iter().any(|value| value == "tcp")
        && values.iter().any(|value| value == "udp")
}

/// Render unknown entry attributes as generic fields, after the known ones.
pub(crate) fn push_extra(fields: &mut Vec<UciField>, extra: &Map<String, Value>) {
    for (key, value) in extra {
        match value {
            Value::String(text) => fields.push(UciField::option(key, text.clone())),
            Value::Bool(flag) => {
                fields.push(UciField::option(key, if *flag { "1" } else { "0" }))
            }
            Value::Number(number) => fields.push(UciField::option(key, number.to_string())),
            Value::Array(items) => {
                let values = items.iter().map(scalar_text).collect();
                fields.push(UciField::list(key, values));
            }
            Value::Null | Value::Object(_) => {}
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => String::from(if *flag { "1" } else { "0" }),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// First value of a field, as an optional owned scalar.
pub(crate) fn scalar(values: &[String]) -> Option<String> {
    values.first().cloned()
}

/// First value of a field as a required scalar, empty when missing.
///
/// Callers validate the result afterwards; an entry whose identity field
/// stayed empty is reported through [`missing_field`] rather than carried
/// along as an empty string.
pub(crate) fn required(values: &[String]) -> String {
    values.first().cloned().unwrap_or_default()
}

/// `0` parses to false, any other value to true.
pub(crate) fn flag(values: &[String]) -> Option<bool> {
    values.first().map(|value| value != "0")
}

/// Re-expand the `tcpudp` collapse token.
pub(crate) fn proto_values(values: &[String]) -> Vec<String> {
    match values {
        [single] if single == "tcpudp" => vec!["tcp".to_string(), "udp".to_string()],
        other => other.to_vec(),
    }
}

/// Split whitespace-joined scalars into individual tokens.
pub(crate) fn space_joined(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split_whitespace().map(str::to_string))
        .collect()
}

/// Weekday values, expanding a single `!`-prefixed negated form.
pub(crate) fn weekday_values(values: &[String]) -> Vec<String> {
    if let [single] = values {
        if tables::is_negation(single) {
            return tables::expand_negation(single, tables::weekday_domain());
        }
    }
    values.to_vec()
}

/// Month-day values as integers, expanding a single negated form.
pub(crate) fn monthday_values(values: &[String]) -> Result<Vec<u8>, NativeParseError> {
    let tokens = if let [single] = values {
        if tables::is_negation(single) {
            tables::expand_negation(single, tables::monthday_domain())
        } else {
            values.to_vec()
        }
    } else {
        values.to_vec()
    };
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|_| NativeParseError::InvalidMonthday(token.clone()))
        })
        .collect()
}

/// Preserve an unrecognized field in the entry's extra map.
pub(crate) fn insert_extra(extra: &mut Map<String, Value>, field: &UciField) {
    let value = match &field.value {
        FieldValue::Option(value) => Value::String(value.clone()),
        FieldValue::List(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
    };
    extra.insert(field.key.clone(), value);
}

/// Error for a section missing a mandatory identity field.
pub(crate) fn missing_field(package: &str, section: &UciSection, field: &str) -> NativeParseError {
    NativeParseError::MissingField {
        package: package.to_string(),
        section: section.section_type.clone(),
        field: field.to_string(),
    }
}

/// Error for a section type the domain mapper does not understand.
pub(crate) fn unsupported(package: &str, section: &UciSection) -> NativeParseError {
    NativeParseError::UnsupportedSection {
        package: package.to_string(),
        section: section.section_type.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uci_text_core::{FieldValue, UciField};

    use super::{
        monthday_values, proto_values, push_proto, push_scalar_or_list, slug_token, space_joined,
        weekday_values,
    };

    #[test]
    fn tcp_udp_pair_collapses_in_either_order() {
        for pair in [["tcp", "udp"], ["udp", "tcp"]] {
            let mut fields = Vec::new();
            let values: Vec<String> = pair.iter().map(|s| s.to_string()).collect();
            push_proto(&mut fields, &values);
            assert_eq!(fields[0].value, FieldValue::Option("tcpudp".to_string()));
        }
    }

    #[test]
    fn single_proto_renders_as_option() {
        let mut fields = Vec::new();
        push_proto(&mut fields, &["icmp".to_string()]);
        assert_eq!(fields[0].value, FieldValue::Option("icmp".to_string()));
    }

    #[test]
    fn multiple_non_tcpudp_protos_render_as_list() {
        let mut fields = Vec::new();
        let values = vec!["tcp".to_string(), "icmp".to_string()];
        push_proto(&mut fields, &values);
        assert_eq!(fields[0].value, FieldValue::List(values));
    }

    #[test]
    fn tcpudp_token_expands_back_to_both_protocols() {
        assert_eq!(proto_values(&["tcpudp".to_string()]), ["tcp", "udp"]);
        assert_eq!(proto_values(&["icmp".to_string()]), ["icmp"]);
    }

    #[test]
    fn scalar_or_list_picks_kind_by_cardinality() {
        let mut fields = Vec::new();
        push_scalar_or_list(&mut fields, "network", &["lan".to_string()]);
        push_scalar_or_list(
            &mut fields,
            "network",
            &["wan".to_string(), "wan6".to_string()],
        );
        assert!(matches!(fields[0].value, FieldValue::Option(_)));
        assert!(matches!(fields[1].value, FieldValue::List(_)));
    }

    #[test]
    fn space_joined_scalar_splits_into_tokens() {
        assert_eq!(space_joined(&["wan wan6".to_string()]), ["wan", "wan6"]);
        assert_eq!(
            space_joined(&["wan".to_string(), "wan6".to_string()]),
            ["wan", "wan6"]
        );
    }

    #[test]
    fn negated_weekdays_expand_against_the_domain() {
        let values = vec!["! mon tue wed".to_string()];
        assert_eq!(weekday_values(&values), ["thu", "fri", "sat", "sun"]);
    }

    #[test]
    fn plain_weekday_list_passes_through() {
        let values = vec!["mon".to_string(), "fri".to_string()];
        assert_eq!(weekday_values(&values), ["mon", "fri"]);
    }

    #[test]
    fn monthdays_convert_to_integers() {
        let values = vec!["1".to_string(), "29".to_string()];
        assert_eq!(monthday_values(&values).expect("parse"), [1, 29]);
    }

    #[test]
    fn non_numeric_monthday_is_an_error() {
        let values = vec!["abc".to_string()];
        assert!(monthday_values(&values).is_err());
    }

    #[test]
    fn slug_token_normalizes_separators() {
        assert_eq!(slug_token("Allow-Ping"), "Allow_Ping");
        assert_eq!(slug_token("eth0.2"), "eth0_2");
    }

    #[test]
    fn always_list_builder_skips_empty_collections() {
        let mut fields: Vec<UciField> = Vec::new();
        super::push_list(&mut fields, "icmp_type", &[]);
        assert!(fields.is_empty());
    }
}
