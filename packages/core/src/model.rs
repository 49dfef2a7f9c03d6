//! Opaque semantic model handle.
//!
//! The core never interprets domain semantics; it only needs a mutable
//! object store that handlers can edit inside a session turn. Objects are
//! arbitrary JSON documents keyed by object id, loaded whole by the
//! semantic model provider when a session is created.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticModel {
    id: String,
    objects: HashMap<String, Value>,
}

impl SemanticModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            objects: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn insert_object(&mut self, object_id: impl Into<String>, value: Value) {
        self.objects.insert(object_id.into(), value);
    }

    pub fn object(&self, object_id: &str) -> Option<&Value> {
        self.objects.get(object_id)
    }

    pub fn remove_object(&mut self, object_id: &str) -> Option<Value> {
        self.objects.remove(object_id)
    }

    /// Set one field on an object. Returns false when the object does not
    /// exist or is not a JSON object.
    pub fn set_field(&mut self, object_id: &str, field: &str, value: Value) -> bool {
        match self.objects.get_mut(object_id) {
            Some(Value::Object(map)) => {
                map.insert(field.to_string(), value);
                true
            }
            _ => false,
        }
    }

    pub fn field(&self, object_id: &str, field: &str) -> Option<&Value> {
        self.objects.get(object_id)?.get(field)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_field_on_existing_object() {
        let mut model = SemanticModel::new("m1");
        model.insert_object("obj-1", json!({ "name": "Engine" }));

        assert!(model.set_field("obj-1", "name", json!("Turbine")));
        assert_eq!(model.field("obj-1", "name"), Some(&json!("Turbine")));
    }

    #[test]
    fn test_set_field_on_missing_object_fails() {
        let mut model = SemanticModel::new("m1");
        assert!(!model.set_field("ghost", "name", json!("x")));
        assert_eq!(model.object_count(), 0);
    }
}
