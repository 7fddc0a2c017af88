//! Firewall collections to and from native `firewall` package sections.
//!
//! Forward mapping emits the fixed `defaults` section first, then one
//! section per rule, zone, forwarding, and redirect, in declaration order.
//! Section names are deterministic slugs over entry attributes; the inverse
//! direction never reads them back, recovering identity from the explicit
//! `name`/`src`/`dest` fields instead; a section missing its identity field
//! is an error, never an empty entry. The synthetic `defaults` section is
//! dropped on parse.

use uci_text_core::UciSection;

use crate::fields::{
    flag, insert_extra, missing_field, monthday_values, proto_values, push_extra, push_flag,
    push_list, push_option, push_proto, push_scalar_or_list, required, scalar, slug_token,
    space_joined, unsupported, weekday_values,
};
use crate::model::{Firewall, Forwarding, Redirect, Rule, Zone};
use crate::profile::NativeParseError;
use crate::tables;

/// Map the firewall collections to an ordered section sequence.
pub fn to_sections(firewall: &Firewall) -> Vec<UciSection> {
    let mut sections = vec![UciSection::new("defaults", "defaults")];
    sections.extend(firewall.rules.iter().map(rule_section));
    sections.extend(firewall.zones.iter().map(zone_section));
    sections.extend(firewall.forwardings.iter().map(forwarding_section));
    sections.extend(firewall.redirects.iter().map(redirect_section));
    sections
}

/// Rebuild the firewall collections from parsed sections.
pub fn from_sections(sections: &[UciSection]) -> Result<Firewall, NativeParseError> {
    let mut firewall = Firewall::default();
    for section in sections {
        match section.section_type.as_str() {
            "defaults" => {}
            "rule" => firewall.rules.push(rule_from_section(section)?),
            "zone" => firewall.zones.push(zone_from_section(section)?),
            "forwarding" => firewall.forwardings.push(forwarding_from_section(section)?),
            "redirect" => firewall.redirects.push(redirect_from_section(section)?),
            _ => return Err(unsupported("firewall", section)),
        }
    }
    Ok(firewall)
}

fn rule_section(rule: &Rule) -> UciSection {
    let mut section = UciSection::new("rule", format!("rule_{}", slug_token(&rule.name)));
    let fields = &mut section.fields;
    push_option(fields, "name", Some(&rule.name));
    push_option(fields, "src", rule.src.as_deref());
    push_option(fields, "src_ip", rule.src_ip.as_deref());
    push_option(fields, "src_mac", rule.src_mac.as_deref());
    push_option(fields, "src_port", rule.src_port.as_deref());
    push_option(fields, "dest", rule.dest.as_deref());
    push_option(fields, "dest_ip", rule.dest_ip.as_deref());
    push_option(fields, "dest_port", rule.dest_port.as_deref());
    push_proto(fields, &rule.proto);
    push_option(fields, "family", rule.family.as_deref());
    push_list(fields, "icmp_type", &rule.icmp_type);
    push_list(fields, "weekdays", &rule.weekdays);
    push_list(fields, "monthdays", &monthday_tokens(&rule.monthdays));
    push_option(fields, "target", rule.target.as_deref());
    push_flag(fields, "enabled", rule.enabled);
    push_extra(fields, &rule.extra);
    tables::sort_fields("rule", fields);
    section
}

fn rule_from_section(section: &UciSection) -> Result<Rule, NativeParseError> {
    let mut rule = Rule::default();
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "name" => rule.name = required(values),
            "src" => rule.src = scalar(values),
            "src_ip" => rule.src_ip = scalar(values),
            "src_mac" => rule.src_mac = scalar(values),
            "src_port" => rule.src_port = scalar(values),
            "dest" => rule.dest = scalar(values),
            "dest_ip" => rule.dest_ip = scalar(values),
            "dest_port" => rule.dest_port = scalar(values),
            "proto" => rule.proto = proto_values(values),
            "family" => rule.family = scalar(values),
            "icmp_type" => rule.icmp_type = values.to_vec(),
            "weekdays" => rule.weekdays = weekday_values(values),
            "monthdays" => rule.monthdays = monthday_values(values)?,
            "target" => rule.target = scalar(values),
            "enabled" => rule.enabled = flag(values),
            _ => insert_extra(&mut rule.extra, field),
        }
    }
    if rule.name.is_empty() {
        return Err(missing_field("firewall", section, "name"));
    }
    Ok(rule)
}

fn zone_section(zone: &Zone) -> UciSection {
    let mut section = UciSection::new("zone", format!("zone_{}", slug_token(&zone.name)));
    let fields = &mut section.fields;
    push_option(fields, "name", Some(&zone.name));
    push_option(fields, "input", zone.input.as_deref());
    push_option(fields, "output", zone.output.as_deref());
    push_option(fields, "forward", zone.forward.as_deref());
    push_scalar_or_list(fields, "network", &zone.network);
    push_flag(fields, "masq", zone.masq);
    push_flag(fields, "mtu_fix", zone.mtu_fix);
    push_option(fields, "family", zone.family.as_deref());
    push_flag(fields, "log", zone.log);
    push_flag(fields, "enabled", zone.enabled);
    push_extra(fields, &zone.extra);
    tables::sort_fields("zone", fields);
    section
}

fn zone_from_section(section: &UciSection) -> Result<Zone, NativeParseError> {
    let mut zone = Zone::default();
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "name" => zone.name = required(values),
            "input" => zone.input = scalar(values),
            "output" => zone.output = scalar(values),
            "forward" => zone.forward = scalar(values),
            "network" => zone.network = space_joined(values),
            "masq" => zone.masq = flag(values),
            "mtu_fix" => zone.mtu_fix = flag(values),
            "family" => zone.family = scalar(values),
            "log" => zone.log = flag(values),
            "enabled" => zone.enabled = flag(values),
            _ => insert_extra(&mut zone.extra, field),
        }
    }
    if zone.name.is_empty() {
        return Err(missing_field("firewall", section, "name"));
    }
    Ok(zone)
}

fn forwarding_section(forwarding: &Forwarding) -> UciSection {
    let mut slug = format!(
        "forwarding_{}_{}",
        slug_token(&forwarding.src),
        slug_token(&forwarding.dest)
    );
    // The family segment is only present when the entry carries one.
    if let Some(family) = &forwarding.family {
        slug.push('_');
        slug.push_str(&slug_token(family));
    }
    let mut section = UciSection::new("forwarding", slug);
    let fields = &mut section.fields;
    push_option(fields, "src", Some(&forwarding.src));
    push_option(fields, "dest", Some(&forwarding.dest));
    push_option(fields, "family", forwarding.family.as_deref());
    push_flag(fields, "enabled", forwarding.enabled);
    push_extra(fields, &forwarding.extra);
    tables::sort_fields("forwarding", fields);
    section
}

fn forwarding_from_section(section: &UciSection) -> Result<Forwarding, NativeParseError> {
    let mut forwarding = Forwarding::default();
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "src" => forwarding.src = required(values),
            "dest" => forwarding.dest = required(values),
            "family" => forwarding.family = scalar(values),
            "enabled" => forwarding.enabled = flag(values),
            _ => insert_extra(&mut forwarding.extra, field),
        }
    }
    if forwarding.src.is_empty() {
        return Err(missing_field("firewall", section, "src"));
    }
    if forwarding.dest.is_empty() {
        return Err(missing_field("firewall", section, "dest"));
    }
    Ok(forwarding)
}

fn redirect_section(redirect: &Redirect) -> UciSection {
    // Redirect names carry over verbatim, non-identifier characters included.
    let mut section = UciSection::new("redirect", format!("redirect_{}", redirect.name));
    let fields = &mut section.fields;
    push_option(fields, "name", Some(&redirect.name));
    push_option(fields, "src", redirect.src.as_deref());
    push_option(fields, "dest", redirect.dest.as_deref());
    push_option(fields, "src_ip", redirect.src_ip.as_deref());
    push_option(fields, "src_dport", redirect.src_dport.as_deref());
    push_option(fields, "dest_ip", redirect.dest_ip.as_deref());
    push_option(fields, "dest_port", redirect.dest_port.as_deref());
    push_proto(fields, &redirect.proto);
    push_option(fields, "family", redirect.family.as_deref());
    push_option(fields, "target", redirect.target.as_deref());
    push_list(fields, "weekdays", &redirect.weekdays);
    push_list(fields, "monthdays", &monthday_tokens(&redirect.monthdays));
    push_flag(fields, "enabled", redirect.enabled);
    push_extra(fields, &redirect.extra);
    tables::sort_fields("redirect", fields);
    section
}

fn redirect_from_section(section: &UciSection) -> Result<Redirect, NativeParseError> {
    let mut redirect = Redirect::default();
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "name" => redirect.name = required(values),
            "src" => redirect.src = scalar(values),
            "dest" => redirect.dest = scalar(values),
            "src_ip" => redirect.src_ip = scalar(values),
            "src_dport" => redirect.src_dport = scalar(values),
            "dest_ip" => redirect.dest_ip = scalar(values),
            "dest_port" => redirect.dest_port = scalar(values),
            "proto" => redirect.proto = proto_values(values),
            "family" => redirect.family = scalar(values),
            "target" => redirect.target = scalar(values),
            "weekdays" => redirect.weekdays = weekday_values(values),
            "monthdays" => redirect.monthdays = monthday_values(values)?,
            "enabled" => redirect.enabled = flag(values),
            _ => insert_extra(&mut redirect.extra, field),
        }
    }
    if redirect.name.is_empty() {
        return Err(missing_field("firewall", section, "name"));
    }
    Ok(redirect)
}

fn monthday_tokens(monthdays: &[u8]) -> Vec<String> {
    monthdays.iter().map(u8::to_string).collect()
}
