use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// The value of a single section field.
///
/// The grammar distinguishes single-valued `option` statements from
/// multi-valued `list` statements. The distinction is carried as an explicit
/// tag rather than inferred from the number of values: a `List` with one
/// entry and an `Option` with the same value render differently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldValue {
    /// A single `option <key> '<value>'` line.
    Option(String),
    /// One `list <key> '<value>'` line per entry, zero or more.
    List(Vec<String>),
}

impl FieldValue {
    /// All values carried by the field, regardless of kind.
    pub fn values(&self) -> &[String] {
        match self {
            FieldValue::Option(value) => std::slice::from_ref(value),
            FieldValue::List(values) => values,
        }
    }
}

/// A keyed field within a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UciField {
    pub key: String,
    pub value: FieldValue,
}

impl UciField {
    /// Build a single-valued `option` field.
    pub fn option(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Option(value.into()),
        }
    }

    /// Build a multi-valued `list` field.
    pub fn list(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::List(values),
        }
    }
}

/// One named, typed `config` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UciSection {
    pub section_type: String,
    pub name: String,
    pub fields: Vec<UciField>,
}

impl UciSection {
    /// Create an empty section of the given type and name.
    pub fn new(section_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            section_type: section_type.into(),
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Return the first field with the provided key.
    pub fn get_field(&self, key: &str) -> Option<&UciField> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Return the first value of the first field with the provided key.
    pub fn first_value(&self, key: &str) -> Option<&str> {
        self.get_field(key)
            .and_then(|field| field.value.values().first())
            .map(String::as_str)
    }
}

impl Display for UciSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "config {} '{}'", self.section_type, self.name)?;
        for field in &self.fields {
            match &field.value {
                FieldValue::Option(value) => {
                    writeln!(f, "\toption {} '{}'", field.key, value)?;
                }
                FieldValue::List(values) => {
                    for value in values {
                        writeln!(f, "\tlist {} '{}'", field.key, value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// An ordered group of sections sharing one `package` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UciPackage {
    pub name: String,
    pub sections: Vec<UciSection>,
}

impl UciPackage {
    /// Create an empty package.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }
}
