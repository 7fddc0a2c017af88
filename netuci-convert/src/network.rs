//! Bridge and VLAN interfaces to and from native `network` package sections.
//!
//! Bridge sections are numbered by reverse enumeration: index 0 belongs to
//! the last-declared bridge, matching the target firmware's convention that
//! the most recently declared interface occupies the lowest device slot.
//! VLAN sections are numbered by forward enumeration. The asymmetry is a
//! firmware legacy and is preserved on purpose.

use uci_text_core::UciSection;

use crate::fields::{
    insert_extra, missing_field, push_extra, push_list, push_option, required, unsupported,
};
use crate::model::Interface;
use crate::profile::NativeParseError;
use crate::tables;

/// Map bridge and VLAN interfaces to an ordered section sequence.
pub fn to_sections(interfaces: &[Interface]) -> Vec<UciSection> {
    let mut sections = Vec::new();

    let bridges: Vec<&Interface> = interfaces
        .iter()
        .filter(|interface| interface.interface_type == "bridge")
        .collect();
    for (index, bridge) in bridges.iter().rev().enumerate() {
        sections.push(bridge_section(index, bridge));
    }

    let vlans = interfaces
        .iter()
        .filter(|interface| interface.name.contains('.'));
    for (index, vlan) in vlans.enumerate() {
        sections.push(vlan_section(index, vlan));
    }

    sections
}

/// Rebuild interfaces from parsed sections.
///
/// Section indices are discarded; bridge declaration order is restored by
/// undoing the reverse emission order. Bridges come back before VLANs since
/// their original interleaving is not representable in the native text.
pub fn from_sections(sections: &[UciSection]) -> Result<Vec<Interface>, NativeParseError> {
    let mut bridges = Vec::new();
    let mut vlans = Vec::new();
    for section in sections {
        match section.section_type.as_str() {
            "bridge" => bridges.push(bridge_from_section(section)?),
            "vlan" => vlans.push(vlan_from_section(section)?),
            _ => return Err(unsupported("network", section)),
        }
    }
    bridges.reverse();
    bridges.extend(vlans);
    Ok(bridges)
}

fn bridge_section(index: usize, interface: &Interface) -> UciSection {
    let mut section = UciSection::new("bridge", format!("bridge_{index}"));
    let fields = &mut section.fields;
    push_option(fields, "name", Some(&interface.name));
    push_list(fields, "ports", &interface.bridge_members);
    push_extra(fields, &interface.extra);
    tables::sort_fields("bridge", fields);
    section
}

fn bridge_from_section(section: &UciSection) -> Result<Interface, NativeParseError> {
    let mut interface = Interface {
        interface_type: "bridge".to_string(),
        ..Default::default()
    };
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "name" => interface.name = required(values),
            "ports" => interface.bridge_members = values.to_vec(),
            _ => insert_extra(&mut interface.extra, field),
        }
    }
    if interface.name.is_empty() {
        return Err(missing_field("network", section, "name"));
    }
    Ok(interface)
}

fn vlan_section(index: usize, interface: &Interface) -> UciSection {
    let (devname, id) = interface
        .name
        .split_once('.')
        .unwrap_or((interface.name.as_str(), ""));
    let status = if interface.disabled.unwrap_or(false) {
        "disabled"
    } else {
        "enabled"
    };
    let mut section = UciSection::new("vlan", format!("vlan_{index}"));
    let fields = &mut section.fields;
    push_option(fields, "devname", Some(devname));
    push_option(fields, "id", Some(id));
    push_option(fields, "status", Some(status));
    push_extra(fields, &interface.extra);
    tables::sort_fields("vlan", fields);
    section
}

fn vlan_from_section(section: &UciSection) -> Result<Interface, NativeParseError> {
    // The original interface type is not representable in the native text.
    let mut interface = Interface {
        interface_type: "ethernet".to_string(),
        ..Default::default()
    };
    let mut devname = String::new();
    let mut id = String::new();
    for field in &section.fields {
        let values = field.value.values();
        match field.key.as_str() {
            "devname" => devname = required(values),
            "id" => id = required(values),
            "status" => {
                if values.first().map(String::as_str) == Some("disabled") {
                    interface.disabled = Some(true);
                }
            }
            _ => insert_extra(&mut interface.extra, field),
        }
    }
    if devname.is_empty() {
        return Err(missing_field("network", section, "devname"));
    }
    if id.is_empty() {
        return Err(missing_field("network", section, "id"));
    }
    interface.name = format!("{devname}.{id}");
    Ok(interface)
}
