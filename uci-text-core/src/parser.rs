use std::collections::BTreeSet;

use thiserror::Error;

use crate::section::{FieldValue, UciField, UciPackage, UciSection};

/// Errors that can occur while parsing native configuration text.
///
/// Every variant carries the 1-based line number and the offending line so
/// callers can point at the exact spot in hand-authored input. Nothing is
/// skipped silently.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An `option` or `list` statement appeared before any `config` header.
    #[error("line {line}: option/list statement outside a config section: '{content}'")]
    OrphanField { line: usize, content: String },
    /// A `config` statement appeared before any `package` header.
    #[error("line {line}: config section outside a package: '{content}'")]
    OrphanSection { line: usize, content: String },
    /// The line matches no statement form of the grammar.
    #[error("line {line}: not a valid statement: '{content}'")]
    Malformed { line: usize, content: String },
}

/// Domain metadata the parser needs to resolve grammar ambiguity.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Keys whose `option` form still yields a single-element `List` field.
    pub always_list: BTreeSet<String>,
}

impl ParseOptions {
    /// Build options from the given always-list keys.
    pub fn with_always_list<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            always_list: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse native text into an ordered package/section sequence.
///
/// Blank lines and `#` comment lines are ignored, so hand-authored text
/// parses the same as renderer output. Values may be single-quoted or bare.
/// Repeated `list` lines for one key accumulate into a single `List` field
/// in encounter order.
pub fn parse(text: &str, options: &ParseOptions) -> Result<Vec<UciPackage>, ParseError> {
    let mut packages: Vec<UciPackage> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;
        let (keyword, rest) = split_statement(line);

        match keyword {
            "package" => {
                if rest.is_empty() {
                    return Err(malformed(number, line));
                }
                packages.push(UciPackage::new(unquote(rest)));
            }
            "config" => {
                let package = packages.last_mut().ok_or_else(|| ParseError::OrphanSection {
                    line: number,
                    content: line.to_string(),
                })?;
                let (section_type, name) = split_statement(rest);
                if section_type.is_empty() {
                    return Err(malformed(number, line));
                }
                // Anonymous sections are legal in hand-authored text.
                package
                    .sections
                    .push(UciSection::new(section_type, unquote(name)));
            }
            "option" | "list" => {
                let section = packages
                    .last_mut()
                    .and_then(|package| package.sections.last_mut())
                    .ok_or_else(|| ParseError::OrphanField {
                        line: number,
                        content: line.to_string(),
                    })?;
                let (key, value) = split_statement(rest);
                if key.is_empty() {
                    return Err(malformed(number, line));
                }
                let value = unquote(value);
                if keyword == "list" || options.always_list.contains(key) {
                    append_list_value(section, key, value);
                } else {
                    section.fields.push(UciField {
                        key: key.to_string(),
                        value: FieldValue::Option(value),
                    });
                }
            }
            _ => return Err(malformed(number, line)),
        }
    }

    Ok(packages)
}

fn malformed(line: usize, content: &str) -> ParseError {
    ParseError::Malformed {
        line,
        content: content.to_string(),
    }
}

/// Split a statement into its leading token and the trimmed remainder.
fn split_statement(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

/// Strip one layer of single quotes, if present.
fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        raw[1..raw.len() - 1].to_string()
    } else {
        raw.to_string()
    }
}

/// Append to an existing `List` field with the same key, or start a new one.
fn append_list_value(section: &mut UciSection, key: &str, value: String) {
    if let Some(field) = section.fields.iter_mut().find(|field| field.key == key) {
        if let FieldValue::List(values) = &mut field.value {
            values.push(value);
            return;
        }
    }
    section.fields.push(UciField {
        key: key.to_string(),
        value: FieldValue::List(vec![value]),
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{parse, ParseError, ParseOptions};
    use crate::section::FieldValue;

    #[test]
    fn parses_packages_sections_and_fields_in_order() {
        let text = "package firewall\n\nconfig defaults 'defaults'\n\nconfig rule 'rule_test'\n\toption name 'test'\n\tlist icmp_type 'echo-request'\n\tlist icmp_type 'echo-reply'\n";
        let packages = parse(text, &ParseOptions::default()).expect("parse");

        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "firewall");
        assert_eq!(packages[0].sections.len(), 2);

        let rule = &packages[0].sections[1];
        assert_eq!(rule.section_type, "rule");
        assert_eq!(rule.name, "rule_test");
        assert_eq!(rule.fields[0].value, FieldValue::Option("test".to_string()));
        assert_eq!(
            rule.fields[1].value,
            FieldValue::List(vec!["echo-request".to_string(), "echo-reply".to_string()])
        );
    }

    #[test]
    fn option_on_always_list_key_becomes_single_element_list() {
        let text = "package firewall\nconfig rule 'r'\noption icmp_type 'echo-request'\n";
        let options = ParseOptions::with_always_list(["icmp_type"]);
        let packages = parse(text, &options).expect("parse");

        assert_eq!(
            packages[0].sections[0].fields[0].value,
            FieldValue::List(vec!["echo-request".to_string()])
        );
    }

    #[test]
    fn quoted_section_names_may_contain_spaces() {
        let text = "package firewall\nconfig redirect 'redirect_Adblock DNS, port 53'\n";
        let packages = parse(text, &ParseOptions::default()).expect("parse");
        assert_eq!(packages[0].sections[0].name, "redirect_Adblock DNS, port 53");
    }

    #[test]
    fn quoted_option_values_keep_interior_whitespace() {
        let text = "package firewall\nconfig zone 'zone_wan'\noption network 'wan wan6'\n";
        let packages = parse(text, &ParseOptions::default()).expect("parse");
        assert_eq!(
            packages[0].sections[0].fields[0].value,
            FieldValue::Option("wan wan6".to_string())
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# generated\n\npackage system\n\nconfig system 'system'\n# local override\noption timezone 'UTC'\n";
        let packages = parse(text, &ParseOptions::default()).expect("parse");
        assert_eq!(packages[0].sections[0].fields.len(), 1);
    }

    #[test]
    fn anonymous_sections_get_an_empty_name() {
        let text = "package network\nconfig interface\noption proto 'dhcp'\n";
        let packages = parse(text, &ParseOptions::default()).expect("parse");
        assert_eq!(packages[0].sections[0].name, "");
    }

    #[test]
    fn option_before_any_config_header_is_an_error() {
        let text = "package firewall\noption name 'test'\n";
        let err = parse(text, &ParseOptions::default()).expect_err("should fail");
        match err {
            ParseError::OrphanField { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "option name 'test'");
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn config_before_any_package_header_is_an_error() {
        let text = "config rule 'r'\n";
        let err = parse(text, &ParseOptions::default()).expect_err("should fail");
        assert!(matches!(err, ParseError::OrphanSection { line: 1, .. }));
    }

    #[test]
    fn unknown_statement_reports_line_number_and_content() {
        let text = "package firewall\nconfig rule 'r'\nnonsense here\n";
        let err = parse(text, &ParseOptions::default()).expect_err("should fail");
        match err {
            ParseError::Malformed { line, content } => {
                assert_eq!(line, 3);
                assert_eq!(content, "nonsense here");
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }
}
