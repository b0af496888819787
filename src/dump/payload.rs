//! Dump inputs: a value, a view, or a list of either.

use serde_json::{Map, Value};

use crate::namespace::NamespaceView;

/// What a dump accepts: a plain structured value, a [`NamespaceView`], or a
/// list mixing both.
#[derive(Debug, Clone)]
pub enum Payload {
    Value(Value),
    View(NamespaceView),
    Many(Vec<Payload>),
}

impl Payload {
    /// Flatten into a plain [`Value`], converting every view (however deeply
    /// nested) back into a mapping.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Value(value) => value,
            Payload::View(view) => Value::Object(view.to_mapping()),
            Payload::Many(items) => {
                Value::Array(items.into_iter().map(Payload::into_value).collect())
            }
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Value(value)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Value(Value::Object(map))
    }
}

impl From<NamespaceView> for Payload {
    fn from(view: NamespaceView) -> Self {
        Payload::View(view)
    }
}

impl From<Vec<Value>> for Payload {
    fn from(values: Vec<Value>) -> Self {
        Payload::Many(values.into_iter().map(Payload::Value).collect())
    }
}

impl From<Vec<NamespaceView>> for Payload {
    fn from(views: Vec<NamespaceView>) -> Self {
        Payload::Many(views.into_iter().map(Payload::View).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceView;
    use serde_json::json;

    #[test]
    fn test_value_passes_through() {
        let payload = Payload::from(json!({"a": 1}));
        assert_eq!(payload.into_value(), json!({"a": 1}));
    }

    #[test]
    fn test_view_flattens_recursively() {
        let mapping = json!({"outer": {"inner": [1, {"deep": true}]}});
        let view = NamespaceView::from_mapping(mapping.as_object().unwrap()).unwrap();
        assert_eq!(Payload::from(view).into_value(), mapping);
    }

    #[test]
    fn test_mixed_list_flattens() {
        let view = NamespaceView::from_mapping(json!({"v": 1}).as_object().unwrap()).unwrap();
        let payload = Payload::Many(vec![Payload::from(json!({"p": 0})), Payload::from(view)]);
        assert_eq!(payload.into_value(), json!([{"p": 0}, {"v": 1}]));
    }
}
