//! Canonical values and output minimization.
//!
//! Canonical values are JSON values with insertion-ordered mappings. A record
//! builds a [`FieldMap`] field by field and finishes it with [`clean`], which
//! drops every entry whose value is in the caller's [`BlankSet`].

pub use serde_json::{Map, Value};

use derive_more::Deref;

/// Reserved discriminator key of tagged mappings.
pub const TYPE_KEY: &str = "type";

///
/// Blank
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Blank {
    Null,
    EmptyString,
    EmptyArray,
    EmptyObject,
}

impl Blank {
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Null, Value::Null) => true,
            (Self::EmptyString, Value::String(s)) => s.is_empty(),
            (Self::EmptyArray, Value::Array(a)) => a.is_empty(),
            (Self::EmptyObject, Value::Object(o)) => o.is_empty(),
            _ => false,
        }
    }
}

///
/// BlankSet
/// Values treated as "absent" when cleaning a mapping.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlankSet(&'static [Blank]);

impl BlankSet {
    pub const NULL: Self = Self(&[Blank::Null]);
    pub const NULL_OR_EMPTY_OBJECT: Self = Self(&[Blank::Null, Blank::EmptyObject]);
    pub const NULL_OR_EMPTY_ARRAY: Self = Self(&[Blank::Null, Blank::EmptyArray]);
    pub const EMPTY: Self = Self(&[
        Blank::Null,
        Blank::EmptyString,
        Blank::EmptyArray,
        Blank::EmptyObject,
    ]);

    #[must_use]
    pub const fn new(blanks: &'static [Blank]) -> Self {
        Self(blanks)
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.iter().any(|blank| blank.matches(value))
    }
}

impl Default for BlankSet {
    fn default() -> Self {
        Self::NULL
    }
}

/// Drop every entry whose value is blank. Nested values are expected to be
/// minimized already; only this level is filtered.
#[must_use]
pub fn clean(map: Map<String, Value>, blanks: BlankSet) -> Map<String, Value> {
    map.into_iter()
        .filter(|(_, value)| !blanks.contains(value))
        .collect()
}

///
/// FieldMap
///
/// Ordered field mapping under construction. Absent optional fields are
/// inserted as `Null` and removed when the map is finished.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
pub struct FieldMap(Map<String, Value>);

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Splice another map's fields in after the current ones.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    #[must_use]
    pub fn clean(self, blanks: BlankSet) -> Self {
        Self(clean(self.0, blanks))
    }

    /// Minimize with the default blank set and convert to a value.
    #[must_use]
    pub fn finish(self) -> Value {
        self.finish_with(BlankSet::default())
    }

    #[must_use]
    pub fn finish_with(self, blanks: BlankSet) -> Value {
        Value::Object(clean(self.0, blanks))
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FieldMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Prefix `fields` with the `"type"` discriminator. A `"type"` entry inside
/// `fields` is dropped; the tag always wins.
#[must_use]
pub fn tagged(tag: &str, fields: FieldMap) -> FieldMap {
    let mut map = Map::new();
    map.insert(TYPE_KEY.to_string(), Value::from(tag));
    map.extend(fields.0.into_iter().filter(|(key, _)| key != TYPE_KEY));

    FieldMap(map)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finish_drops_null_fields_only() {
        let value = FieldMap::new()
            .with("name", "Sword")
            .with("icon", Option::<String>::None)
            .with("parents", json!({}))
            .finish();

        assert_eq!(value, json!({ "name": "Sword", "parents": {} }));
    }

    #[test]
    fn custom_blank_set_drops_empty_collections() {
        let value = FieldMap::new()
            .with("attributes", json!({}))
            .with("slots", Value::Null)
            .with("entries", json!([]))
            .finish_with(BlankSet::NULL_OR_EMPTY_OBJECT);

        assert_eq!(value, json!({ "entries": [] }));
        assert_eq!(
            clean(json!({"a": "", "b": 0}).as_object().unwrap().clone(), BlankSet::EMPTY),
            json!({"b": 0}).as_object().unwrap().clone()
        );
    }

    #[test]
    fn field_order_is_insertion_order() {
        let value = FieldMap::new().with("z", 1).with("a", 2).with("m", 3).finish();

        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn merge_composes_minimized_parts() {
        let header = FieldMap::new().with("id", "Widget.a");
        let body = FieldMap::new()
            .with("attributes", Value::Null)
            .clean(BlankSet::NULL);

        let value = header.merge(body).with("name", "A").finish();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"id":"Widget.a","name":"A"}"#);
    }

    #[test]
    fn tag_is_always_first() {
        let fields = FieldMap::new().with("radius", 0.5).with("type", "Bogus");
        let value = tagged("Ball", fields).finish();

        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"type":"Ball","radius":0.5}"#);
    }
}
