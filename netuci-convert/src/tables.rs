//! Canonical per-section-type metadata.
//!
//! These tables drive every place where the grammar alone is ambiguous:
//! which keys stay multi-valued even with one value, which scalar keys may
//! carry whitespace-joined values, the fixed field order inside each section
//! type, and the enumerable value domains used to expand negated forms.

use std::collections::BTreeSet;

use uci_text_core::UciField;

/// Weekday tokens in canonical domain order.
pub const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Month-day domain bounds, inclusive.
pub const MONTHDAY_MIN: u8 = 1;
pub const MONTHDAY_MAX: u8 = 31;

/// Keys that always render as `list` lines, even with a single value.
pub const ALWAYS_LIST: [&str; 4] = ["icmp_type", "weekdays", "monthdays", "ports"];

/// Keys whose scalar form may carry several whitespace-joined values.
pub const SPACE_JOINED: [&str; 1] = ["network"];

const RULE_ORDER: &[&str] = &[
    "name", "src", "src_ip", "src_mac", "src_port", "dest", "dest_ip", "dest_port", "proto",
    "family", "icmp_type", "weekdays", "monthdays", "target", "enabled",
];
const ZONE_ORDER: &[&str] = &[
    "name", "input", "output", "forward", "network", "masq", "mtu_fix", "family", "log", "enabled",
];
const FORWARDING_ORDER: &[&str] = &["src", "dest", "family", "enabled"];
const REDIRECT_ORDER: &[&str] = &[
    "name", "src", "dest", "src_ip", "src_dport", "dest_ip", "dest_port", "proto", "family",
    "target", "weekdays", "monthdays", "enabled",
];
const BRIDGE_ORDER: &[&str] = &["name", "ports"];
const VLAN_ORDER: &[&str] = &["devname", "id", "status"];
const NAMESERVER_ORDER: &[&str] = &["ip"];
const SYSTEM_ORDER: &[&str] = &[
    "hostname", "timezone", "latitude", "longitude", "timestamp", "reset",
];
const USER_ORDER: &[&str] = &["name", "password"];

/// Fixed field order for a section type; empty for unknown types.
pub fn field_order(section_type: &str) -> &'static [&'static str] {
    match section_type {
        "rule" => RULE_ORDER,
        "zone" => ZONE_ORDER,
        "forwarding" => FORWARDING_ORDER,
        "redirect" => REDIRECT_ORDER,
        "bridge" => BRIDGE_ORDER,
        "vlan" => VLAN_ORDER,
        "nameserver" => NAMESERVER_ORDER,
        "system" => SYSTEM_ORDER,
        "user" => USER_ORDER,
        _ => &[],
    }
}

/// Sort fields into the canonical order for the section type.
///
/// Unknown keys sort after all known keys and keep their insertion order.
pub fn sort_fields(section_type: &str, fields: &mut [UciField]) {
    let order = field_order(section_type);
    fields.sort_by_key(|field| {
        order
            .iter()
            .position(|key| *key == field.key)
            .unwrap_or(order.len())
    });
}

/// The always-list keys as an owned set, for parser options.
pub fn always_list_keys() -> BTreeSet<String> {
    ALWAYS_LIST.iter().map(|key| key.to_string()).collect()
}

/// True when a single-valued field carries the `!`-prefixed negation form.
pub fn is_negation(value: &str) -> bool {
    value.trim_start().starts_with('!')
}

/// Expand `! a b c` into the complement of the named tokens.
///
/// The result preserves canonical domain order; the tokens after `!` are the
/// values to exclude. Tokens outside the domain are ignored rather than
/// rejected, since semantic validation happens elsewhere.
pub fn expand_negation<I>(value: &str, domain: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let negated: BTreeSet<&str> = value
        .trim_start()
        .trim_start_matches('!')
        .split_whitespace()
        .collect();
    domain
        .into_iter()
        .filter(|candidate| !negated.contains(candidate.as_str()))
        .collect()
}

/// The weekday domain in canonical order.
pub fn weekday_domain() -> impl Iterator<Item = String> {
    WEEKDAYS.iter().map(|day| day.to_string())
}

/// The month-day domain, `1..=31`, as canonical tokens.
pub fn monthday_domain() -> impl Iterator<Item = String> {
    (MONTHDAY_MIN..=MONTHDAY_MAX).map(|day| day.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uci_text_core::UciField;

    use super::{expand_negation, monthday_domain, sort_fields, weekday_domain};

    #[test]
    fn negated_weekdays_expand_to_complement_in_canonical_order() {
        let expanded = expand_negation("! mon tue wed", weekday_domain());
        assert_eq!(expanded, ["thu", "fri", "sat", "sun"]);
    }

    #[test]
    fn negated_monthdays_expand_to_complement() {
        let expanded = expand_negation("! 1 2 3 4 5", monthday_domain());
        let expected: Vec<String> = (6u8..=31).map(|d| d.to_string()).collect();
        assert_eq!(expanded, expected);
    }

    #[test]
    fn negating_nothing_yields_the_full_domain() {
        let expanded = expand_negation("!", weekday_domain());
        assert_eq!(expanded.len(), 7);
    }

    #[test]
    fn sort_fields_applies_canonical_order_and_keeps_unknowns_last() {
        let mut fields = vec![
            UciField::option("limit", "10/second"),
            UciField::option("target", "ACCEPT"),
            UciField::option("name", "r"),
            UciField::option("custom", "x"),
        ];
        sort_fields("rule", &mut fields);
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["name", "target", "limit", "custom"]);
    }
}
