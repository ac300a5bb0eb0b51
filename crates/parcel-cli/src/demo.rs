//! Demo classes registered by the CLI.

use parcel_core::typed::{from_dict_via_serde, to_dict_via_serde};
use parcel_core::{ClassRegistry, DictError, FromDict, Qualified, RegistryConfig, RegistryError, ToDict};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeter {
    pub name: String,
}

impl Qualified for Greeter {
    const QUALIFIED_NAME: &'static str = "demo.Greeter";
}

impl ToDict for Greeter {
    fn to_dict(&self) -> Result<Map<String, Value>, DictError> {
        to_dict_via_serde(self)
    }
}

impl FromDict for Greeter {
    fn from_dict(data: Map<String, Value>) -> Result<Self, DictError> {
        from_dict_via_serde(data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counter {
    pub value: u64,
}

impl Qualified for Counter {
    const QUALIFIED_NAME: &'static str = "demo.Counter";
}

impl ToDict for Counter {
    fn to_dict(&self) -> Result<Map<String, Value>, DictError> {
        let mut map = Map::new();
        map.insert("value".into(), Value::from(self.value));
        Ok(map)
    }
}

impl FromDict for Counter {
    fn from_dict(data: Map<String, Value>) -> Result<Self, DictError> {
        let value = data
            .get("value")
            .ok_or_else(|| DictError::MissingField("value".into()))?;
        let value = value.as_u64().ok_or_else(|| DictError::InvalidField {
            field: "value".into(),
            reason: format!("expected an unsigned integer, got {value}"),
        })?;
        Ok(Self { value })
    }
}

/// Known by name only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opaque;

impl Qualified for Opaque {
    const QUALIFIED_NAME: &'static str = "demo.Opaque";
}

pub fn registry(config: RegistryConfig) -> Result<ClassRegistry, RegistryError> {
    let mut registry = ClassRegistry::with_config(config);
    registry.register::<Greeter>()?;
    registry.register::<Counter>()?;
    registry.register_opaque::<Opaque>()?;
    Ok(registry)
}

/// Debug rendering of a decoded demo object.
pub fn describe(obj: &(dyn std::any::Any + Send)) -> Option<String> {
    if let Some(greeter) = obj.downcast_ref::<Greeter>() {
        return Some(format!("{greeter:?}"));
    }
    if let Some(counter) = obj.downcast_ref::<Counter>() {
        return Some(format!("{counter:?}"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_core::{DeserializationError, PayloadCodec};
    use serde_json::json;
    use std::sync::Arc;

    fn codec() -> PayloadCodec {
        PayloadCodec::new(Arc::new(registry(RegistryConfig::default()).unwrap()))
    }

    #[test]
    fn demo_registry_lists_three_classes() {
        let registry = registry(RegistryConfig::default()).unwrap();
        assert_eq!(
            registry.registered_names(),
            vec!["demo.Counter", "demo.Greeter", "demo.Opaque"]
        );
    }

    #[test]
    fn decoded_objects_are_described() {
        let codec = codec();
        let obj = codec
            .decode(&json!({ "type": "demo.Counter", "data": { "value": 3 } }))
            .unwrap();
        assert_eq!(describe(obj.as_ref()).as_deref(), Some("Counter { value: 3 }"));
    }

    #[test]
    fn counter_rejects_negative_values() {
        let err = codec()
            .decode(&json!({ "type": "demo.Counter", "data": { "value": -1 } }))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            DeserializationError::FromDict { source: DictError::InvalidField { .. }, .. }
        ));
    }
}
