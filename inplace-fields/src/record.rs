//! Record capabilities consumed by the renderer.
//!
//! A record only has to read fields by name. Records backed by persisted
//! domain objects additionally expose an [`Identifiable`] view, which the
//! renderer uses for the element id and the conventional update url.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::value::FieldValue;

/// Read access to the fields of a record.
pub trait FieldReadable {
    /// Type name of the record, e.g. `User` or `Cuca::Car`.
    fn type_name(&self) -> Cow<'_, str>;

    /// Current value of `field`. Unknown fields read as `Nil`.
    fn read(&self, field: &str) -> FieldValue;

    /// Zero-argument presenter used by `display_as`.
    fn present(&self, _method: &str) -> Option<String> {
        None
    }

    /// Whether `present(method)` would produce a value.
    fn responds_to(&self, method: &str) -> bool {
        self.present(method).is_some()
    }

    /// Identity view for persisted domain objects.
    fn identity(&self) -> Option<&dyn Identifiable> {
        None
    }
}

/// A domain object with a stable identifier.
pub trait Identifiable {
    /// Stable identifier, absent until the object is persisted.
    fn id(&self) -> Option<String>;
}

/// The record a field belongs to, optionally nested under namespaces.
#[derive(Clone, Copy)]
pub enum RecordRef<'a> {
    Plain(&'a dyn FieldReadable),
    Namespaced(&'a [String], &'a dyn FieldReadable),
}

impl<'a> RecordRef<'a> {
    /// The record at the end of the chain.
    pub fn record(&self) -> &'a dyn FieldReadable {
        match self {
            RecordRef::Plain(r) | RecordRef::Namespaced(_, r) => *r,
        }
    }

    /// Namespace segments in order; empty for plain references.
    pub fn namespace(&self) -> &'a [String] {
        match self {
            RecordRef::Plain(_) => &[],
            RecordRef::Namespaced(ns, _) => ns,
        }
    }
}

impl<'a, R: FieldReadable> From<&'a R> for RecordRef<'a> {
    fn from(record: &'a R) -> Self {
        RecordRef::Plain(record)
    }
}

/// A record backed by in-memory maps.
///
/// Serves hosts that describe records as data (the CLI reads them from JSON)
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct MapRecord {
    type_name: String,
    id: Option<String>,
    persisted: bool,
    fields: HashMap<String, FieldValue>,
    methods: HashMap<String, String>,
}

impl MapRecord {
    /// A domain object of the given type. It is identifiable; its id stays
    /// absent until [`MapRecord::with_id`] is called.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            persisted: true,
            ..Default::default()
        }
    }

    /// A plain value object with no identity at all.
    pub fn anonymous(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            persisted: false,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self.persisted = true;
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Register the result of a presenter method used by `display_as`.
    pub fn method(mut self, name: impl Into<String>, result: impl Into<String>) -> Self {
        self.methods.insert(name.into(), result.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }
}

impl FieldReadable for MapRecord {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.type_name)
    }

    fn read(&self, field: &str) -> FieldValue {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    fn present(&self, method: &str) -> Option<String> {
        self.methods.get(method).cloned()
    }

    fn identity(&self) -> Option<&dyn Identifiable> {
        if self.persisted {
            Some(self)
        } else {
            None
        }
    }
}

impl Identifiable for MapRecord {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// Array-like records: `first`, `last`, `size`/`length` and numeric indices.
impl FieldReadable for [FieldValue] {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("array")
    }

    fn read(&self, field: &str) -> FieldValue {
        match field {
            "first" => self.first().cloned().unwrap_or_default(),
            "last" => self.last().cloned().unwrap_or_default(),
            "size" | "length" | "count" => FieldValue::Integer(self.len() as i64),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|i| self.get(i).cloned())
                .unwrap_or_default(),
        }
    }
}

impl FieldReadable for Vec<FieldValue> {
    fn type_name(&self) -> Cow<'_, str> {
        self.as_slice().type_name()
    }

    fn read(&self, field: &str) -> FieldValue {
        self.as_slice().read(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_record_reads_fields() {
        let user = MapRecord::new("User").with_id(7).field("name", "Lucia");
        assert_eq!(user.read("name"), FieldValue::from("Lucia"));
        assert_eq!(user.read("missing"), FieldValue::Nil);
        assert_eq!(user.identity().and_then(|i| i.id()), Some("7".into()));
    }

    #[test]
    fn anonymous_record_has_no_identity() {
        let point = MapRecord::anonymous("Point").field("x", 1);
        assert!(point.identity().is_none());
    }

    #[test]
    fn unsaved_record_is_identifiable_without_id() {
        let user = MapRecord::new("User");
        let identity = user.identity().expect("domain object");
        assert_eq!(identity.id(), None);
    }

    #[test]
    fn presenter_methods() {
        let user = MapRecord::new("User").method("address_format", "Via Roma 99");
        assert!(user.responds_to("address_format"));
        assert!(!user.responds_to("custom"));
    }

    #[test]
    fn array_like_access() {
        let values = vec![FieldValue::from(1), FieldValue::from(2), FieldValue::from(3)];
        assert_eq!(values.type_name(), "array");
        assert_eq!(values.read("first"), FieldValue::Integer(1));
        assert_eq!(values.read("last"), FieldValue::Integer(3));
        assert_eq!(values.read("1"), FieldValue::Integer(2));
        assert_eq!(values.read("size"), FieldValue::Integer(3));
        assert_eq!(values.read("nope"), FieldValue::Nil);
        assert!(values.identity().is_none());
    }

    #[test]
    fn record_ref_accessors() {
        let user = MapRecord::new("User");
        let ns = vec!["admin".to_string()];
        let nested = RecordRef::Namespaced(&ns, &user);
        assert_eq!(nested.namespace(), ns.as_slice());
        assert_eq!(nested.record().type_name(), "User");
        assert!(RecordRef::from(&user).namespace().is_empty());
    }
}
