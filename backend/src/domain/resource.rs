//! Contract shared by every CRUD resource.
//!
//! Products, recipes and users are flat records with a server-assigned
//! identifier and a handful of scalar fields. [`Resource`] captures what the
//! generic service and patch applier need to know about each of them: the
//! uniqueness key, the table of mutable fields and how to read and write a
//! field by name.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::EntityId;

/// Value type stored in a mutable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "a 32-bit integer",
        }
    }
}

/// Typed value read from or written to a mutable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
}

impl FieldValue {
    /// Value a field takes once it has been removed.
    #[must_use]
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Integer => Self::Integer(0),
        }
    }

    /// Convert a JSON value into a field value of the requested kind.
    ///
    /// `null` maps to the kind's default, mirroring removal.
    pub fn from_json(kind: FieldKind, value: &Value) -> Option<Self> {
        match (kind, value) {
            (_, Value::Null) => Some(Self::default_for(kind)),
            (FieldKind::Text, Value::String(text)) => Some(Self::Text(text.clone())),
            (FieldKind::Integer, Value::Number(number)) => number
                .as_i64()
                .and_then(|raw| i32::try_from(raw).ok())
                .map(Self::Integer),
            _ => None,
        }
    }
}

/// Describes one mutable field of a resource.
///
/// `name` is the field's wire name; patch paths are matched against it
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDescriptor {
    /// Optional text field.
    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: false,
        }
    }

    /// Text field that must be non-blank.
    #[must_use]
    pub const fn required_text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: true,
        }
    }

    /// Integer field.
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            required: false,
        }
    }

    /// Violation reported when a value of the wrong JSON type is supplied.
    pub(crate) fn type_mismatch(&self) -> FieldViolation {
        FieldViolation::new(
            self.name,
            format!("{} must be {}", self.name, self.kind.expected()),
        )
    }
}

/// A single field-level invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    field: String,
    message: String,
}

impl FieldViolation {
    /// Create a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field the violation refers to.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Lower-cased uniqueness key used for case-insensitive comparisons.
///
/// # Examples
/// ```
/// use pantry::domain::normalise_unique_key;
///
/// assert_eq!(normalise_unique_key("Eggs"), normalise_unique_key("eGGs"));
/// ```
#[must_use]
pub fn normalise_unique_key(key: &str) -> String {
    key.to_lowercase()
}

/// A flat, independently stored CRUD resource.
pub trait Resource: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Singular noun used in messages and logs.
    const NAME: &'static str;
    /// Wire name of the field that must be unique case-insensitively.
    const UNIQUE_FIELD: &'static str;
    /// Mutable fields in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Identifier of this record.
    fn id(&self) -> &EntityId;

    /// Return the record with its identifier replaced.
    #[must_use]
    fn with_id(self, id: EntityId) -> Self;

    /// Value of [`Resource::UNIQUE_FIELD`].
    fn unique_key(&self) -> &str;

    /// Overwrite every mutable field with `source`'s values, keeping the id.
    fn overwrite_from(&mut self, source: &Self);

    /// Read a mutable field by its wire name.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Write a mutable field by its wire name.
    ///
    /// Returns `false` when the name is unknown or the value kind does not
    /// match the field.
    fn set_field(&mut self, name: &str, value: FieldValue) -> bool;

    /// Look up a field descriptor by wire name, ignoring case.
    fn descriptor(name: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS
            .iter()
            .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
    }

    /// Check required-field invariants.
    fn validate(&self) -> Vec<FieldViolation> {
        Self::FIELDS
            .iter()
            .filter(|descriptor| descriptor.required)
            .filter(|descriptor| match self.field(descriptor.name) {
                Some(FieldValue::Text(text)) => text.trim().is_empty(),
                Some(FieldValue::Integer(_)) => false,
                None => true,
            })
            .map(|descriptor| {
                FieldViolation::new(descriptor.name, format!("{} is required", descriptor.name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(FieldKind::Text, json!("soup"), Some(FieldValue::Text("soup".to_owned())))]
    #[case(FieldKind::Text, json!(12), None)]
    #[case(FieldKind::Integer, json!(70), Some(FieldValue::Integer(70)))]
    #[case(FieldKind::Integer, json!(1.5), None)]
    #[case(FieldKind::Integer, json!(4_294_967_296_i64), None)]
    #[case(FieldKind::Integer, json!("70"), None)]
    #[case(FieldKind::Integer, Value::Null, Some(FieldValue::Integer(0)))]
    #[case(FieldKind::Text, Value::Null, Some(FieldValue::Text(String::new())))]
    fn from_json_respects_field_kind(
        #[case] kind: FieldKind,
        #[case] value: Value,
        #[case] expected: Option<FieldValue>,
    ) {
        assert_eq!(FieldValue::from_json(kind, &value), expected);
    }

    #[rstest]
    fn type_mismatch_names_expected_kind() {
        let violation = FieldDescriptor::integer("kcal").type_mismatch();
        assert_eq!(violation.field(), "kcal");
        assert_eq!(violation.message(), "kcal must be a 32-bit integer");
    }
}
