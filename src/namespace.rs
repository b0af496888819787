//! Attribute-style views over mapping values.
//!
//! A [`NamespaceView`] projects a mapping into named fields, the way a
//! scripting-language namespace object would. Conversion is recursive in both
//! directions and lossless for anything built by the forward direction. Keys
//! that are not valid identifiers are rejected up front with
//! [`DataError::InvalidUsage`] instead of being silently smuggled through.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{DataError, Result};

/// A value held by a [`NamespaceView`] field.
#[derive(Debug, Clone, PartialEq)]
pub enum NsValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<NsValue>),
    View(NamespaceView),
}

impl NsValue {
    /// Convert back into a plain [`Value`]. Total: every nested view becomes
    /// a mapping again.
    pub fn to_value(&self) -> Value {
        match self {
            NsValue::Null => Value::Null,
            NsValue::Bool(b) => Value::Bool(*b),
            NsValue::Number(n) => Value::Number(n.clone()),
            NsValue::String(s) => Value::String(s.clone()),
            NsValue::List(items) => Value::Array(items.iter().map(NsValue::to_value).collect()),
            NsValue::View(view) => Value::Object(view.to_mapping()),
        }
    }

    /// Borrow the nested view, if this value is one.
    pub fn as_view(&self) -> Option<&NamespaceView> {
        match self {
            NsValue::View(view) => Some(view),
            _ => None,
        }
    }
}

/// An attribute-accessible projection of a mapping.
///
/// Field order matches the source mapping's key order, so round-tripping
/// preserves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceView {
    fields: Vec<(String, NsValue)>,
}

impl NamespaceView {
    pub fn new() -> Self {
        NamespaceView::default()
    }

    /// Build a view from a mapping, recursively converting nested mappings
    /// and mapping-shaped list elements.
    pub fn from_mapping(mapping: &Map<String, Value>) -> Result<Self> {
        let mut fields = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            if !is_identifier(key) {
                return Err(DataError::InvalidUsage(format!(
                    "key {key:?} is not a valid identifier and cannot become a namespace field"
                )));
            }
            fields.push((key.clone(), value_to_namespace(value)?));
        }
        Ok(NamespaceView { fields })
    }

    /// The inverse of [`NamespaceView::from_mapping`].
    pub fn to_mapping(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&NsValue> {
        self.fields.iter().find(|(key, _)| key == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut NsValue> {
        self.fields.iter_mut().find(|(key, _)| key == name).map(|(_, v)| v)
    }

    /// Set a field, replacing an existing one in place or appending a new one.
    /// The name must be a valid identifier.
    pub fn set(&mut self, name: &str, value: NsValue) -> Result<()> {
        if !is_identifier(name) {
            return Err(DataError::InvalidUsage(format!(
                "{name:?} is not a valid identifier"
            )));
        }
        match self.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<NsValue> {
        let index = self.fields.iter().position(|(key, _)| key == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NsValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Convert any value into its namespace form: mappings become views, lists
/// recurse, scalars pass through.
pub fn value_to_namespace(value: &Value) -> Result<NsValue> {
    Ok(match value {
        Value::Null => NsValue::Null,
        Value::Bool(b) => NsValue::Bool(*b),
        Value::Number(n) => NsValue::Number(n.clone()),
        Value::String(s) => NsValue::String(s.clone()),
        Value::Array(items) => NsValue::List(
            items
                .iter()
                .map(value_to_namespace)
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(map) => NsValue::View(NamespaceView::from_mapping(map)?),
    })
}

/// Convert a namespace value back into a plain [`Value`].
pub fn namespace_to_value(value: &NsValue) -> Value {
    value.to_value()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

impl Serialize for NsValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NsValue::Null => serializer.serialize_unit(),
            NsValue::Bool(b) => serializer.serialize_bool(*b),
            NsValue::Number(n) => n.serialize(serializer),
            NsValue::String(s) => serializer.serialize_str(s),
            NsValue::List(items) => items.serialize(serializer),
            NsValue::View(view) => view.serialize(serializer),
        }
    }
}

impl Serialize for NamespaceView {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
