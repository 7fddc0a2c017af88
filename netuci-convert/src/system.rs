//! Resolver, system, and user settings to and from `system` package sections.
//!
//! Nameserver sections are numbered by reverse enumeration, matching the
//! append-to-front behavior the target resolver configuration expects. The
//! system section only appears when `general` is present and non-empty;
//! when it does appear, unset settings are materialized to their documented
//! defaults. Those defaults are a forward-mapping decision: the renderer
//! itself never invents them, and the inverse direction reads back whatever
//! the text carries.

use uci_text_core::UciSection;

use crate::fields::{
    insert_extra, missing_field, push_extra, push_option, required, scalar, slug_token, unsupported,
};
use crate::model::{Config, GeneralSettings, User};
use crate::profile::NativeParseError;
use crate::tables;

/// Map DNS servers, general settings, and users to a section sequence.
pub fn to_sections(config: &Config) -> Vec<UciSection> {
    let mut sections = Vec::new();

    for (index, server) in config.dns_servers.iter().rev().enumerate() {
        sections.push(nameserver_section(index, server));
    }

    if let Some(general) = &config.general {
        if !general.is_empty() {
            sections.push(system_section(general));
        }
    }

    for user in &config.users {
        sections.push(user_section(user));
    }

    sections
}

/// Rebuild resolver, system, and user settings from parsed sections.
pub fn apply_sections(config: &mut Config, sections: &[UciSection]) -> Result<(), NativeParseError> {
    let mut nameservers = Vec::new();
    for section in sections {
        match section.section_type.as_str() {
            "nameserver" => {
                let ip = section.first_value("ip").unwrap_or_default();
                if ip.is_empty() {
                    return Err(missing_field("system", section, "ip"));
                }
                nameservers.push(ip.to_string());
            }
            "system" => config.general = Some(general_from_section(section)),
            "user" => config.users.push(user_from_section(section)?),
            _ => return Err(unsupported("system", section)),
        }
    }
    // Undo the reverse emission order.
    nameservers.reverse();
    config.dns_servers = nameservers;
    Ok(())
}

fn nameserver_section(index: usize, server: &str) -> UciSection {
    let mut section = UciSection::new("nameserver", format!("nameserver_{index}"));
    push_option(&mut section.fields, "ip", Some(server));
    section
}

fn system_section(general: &GeneralSettings) -> UciSection {
    let mut section = UciSection::new("system", "system");
    let fields = &mut section.fields;
    push_option(fields, "hostname", general.hostname.as_deref());
    push_option(
        fields,
        "timezone",
        Some(general.timezone.as_deref().unwrap_or("UTC")),
    );
    push_option(
        fields,
        "latitude",
        Some(general.latitude.as_deref().unwrap_or("")),
    );
    push_option(
        fields,
        "longitude",
        Some(general.longitude.as_deref().unwrap_or("")),
    );
    push_option(
        fields,
        "timestamp",
        Some(general.timestamp.as_deref().unwrap_or("")),
    );
    push_option(
        fields,
        "reset",
        Some(general.reset.as_deref().unwrap_or("enabled")),
    );
    push_extra(fields, &general.extra);
    tables::sort_fields("system", fields);
    section
}

fn general_from_section(section: &UciSection) -> GeneralSettings {
    let mut general = GeneralSettings::default();
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "hostname" => general.hostname = scalar(values),
            "timezone" => general.timezone = scalar(values),
            "latitude" => general.latitude = scalar(values),
            "longitude" => general.longitude = scalar(values),
            "timestamp" => general.timestamp = scalar(values),
            "reset" => general.reset = scalar(values),
            _ => insert_extra(&mut general.extra, field),
        }
    }
    general
}

fn user_section(user: &User) -> UciSection {
    let mut section = UciSection::new("user", format!("user_{}", slug_token(&user.name)));
    let fields = &mut section.fields;
    push_option(fields, "name", Some(&user.name));
    push_option(fields, "password", user.password.as_deref());
    push_extra(fields, &user.extra);
    tables::sort_fields("user", fields);
    section
}

fn user_from_section(section: &UciSection) -> Result<User, NativeParseError> {
    let mut user = User::default();
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "name" => user.name = required(values),
            "password" => user.password = scalar(values),
            _ => insert_extra(&mut user.extra, field),
        }
    }
    if user.name.is_empty() {
        return Err(missing_field("system", section, "name"));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uci_text_core::UciSection;

    use super::{apply_sections, to_sections};
    use crate::model::{Config, GeneralSettings, User};

    #[test]
    fn last_declared_nameserver_gets_index_zero() {
        let config = Config {
            dns_servers: vec!["10.11.12.13".to_string(), "8.8.8.8".to_string()],
            ..Default::default()
        };
        let sections = to_sections(&config);
        assert_eq!(sections[0].name, "nameserver_0");
        assert_eq!(sections[0].first_value("ip"), Some("8.8.8.8"));
        assert_eq!(sections[1].name, "nameserver_1");
        assert_eq!(sections[1].first_value("ip"), Some("10.11.12.13"));
    }

    #[test]
    fn nameserver_order_survives_a_round_trip() {
        let config = Config {
            dns_servers: vec!["10.11.12.13".to_string(), "8.8.8.8".to_string()],
            ..Default::default()
        };
        let mut restored = Config::default();
        apply_sections(&mut restored, &to_sections(&config)).expect("inverse");
        assert_eq!(restored.dns_servers, config.dns_servers);
    }

    #[test]
    fn absent_general_suppresses_the_system_section() {
        let config = Config::default();
        assert!(to_sections(&config).is_empty());

        let empty = Config {
            general: Some(GeneralSettings::default()),
            ..Default::default()
        };
        assert!(to_sections(&empty).is_empty());
    }

    #[test]
    fn sparse_general_materializes_documented_defaults() {
        let config = Config {
            general: Some(GeneralSettings {
                hostname: Some("router-01".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let sections = to_sections(&config);
        let system = &sections[0];
        assert_eq!(system.first_value("hostname"), Some("router-01"));
        assert_eq!(system.first_value("timezone"), Some("UTC"));
        assert_eq!(system.first_value("latitude"), Some(""));
        assert_eq!(system.first_value("longitude"), Some(""));
        assert_eq!(system.first_value("timestamp"), Some(""));
        assert_eq!(system.first_value("reset"), Some("enabled"));
    }

    #[test]
    fn nameserver_without_an_ip_is_rejected() {
        let section = UciSection::new("nameserver", "nameserver_0");
        let mut config = Config::default();
        let err = apply_sections(&mut config, std::slice::from_ref(&section))
            .expect_err("should fail");
        assert!(err
            .to_string()
            .contains("section 'nameserver' in package 'system' is missing required field 'ip'"));
    }

    #[test]
    fn users_render_and_parse_by_explicit_name() {
        let config = Config {
            users: vec![User {
                name: "field tech".to_string(),
                password: Some("86fe06e1e0e2b4b1d6a3".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let sections = to_sections(&config);
        assert_eq!(sections[0].name, "user_field_tech");

        let mut restored = Config::default();
        apply_sections(&mut restored, &sections).expect("inverse");
        assert_eq!(restored.users, config.users);
    }
}
