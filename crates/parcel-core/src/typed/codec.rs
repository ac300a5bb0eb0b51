//! Codec - オブジェクトと envelope の相互変換
//!
//! # encode フロー
//! 1. オブジェクトの TypeId から registry の型を引く
//! 2. to_dict を持たなければ MissingToDict
//! 3. `{ "type": qualified name, "data": to_dict() }` を返す
//!
//! # decode フロー（チェック順は固定）
//! 1. `type` キーがなければ MissingType
//! 2. `data` キーがなければ MissingData
//! 3. registry で名前を解決、失敗したら Import
//! 4. from_dict を持たなければ MissingFromDict
//! 5. from_dict(data) の結果をそのまま返す

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use super::capability::{FromDict, Qualified, ToDict};
use super::class::DynClass;
use super::registry::ClassRegistry;
use crate::domain::envelope::{Envelope, RawEnvelope};
use crate::domain::errors::{DeserializationError, ResolveError, SerializationError, json_kind};

/// registry に登録された型のオブジェクトを envelope にする
///
/// 未登録の型、to_dict を持たない型は MissingToDict。
pub fn serialize_class_instance<T: Any>(
    registry: &ClassRegistry,
    obj: &T,
) -> Result<Value, SerializationError> {
    encode_erased(registry, obj, Some(std::any::type_name::<T>()))
}

/// `serialize_class_instance` の型消去版
///
/// 未登録の型は名前が分からないので、エラーには TypeId を載せる。
pub fn serialize_dyn(registry: &ClassRegistry, obj: &dyn Any) -> Result<Value, SerializationError> {
    encode_erased(registry, obj, None)
}

/// decode 結果の `Box<dyn Any + Send>` などを中身まで剥がす
fn unbox(obj: &dyn Any) -> &dyn Any {
    if let Some(boxed) = obj.downcast_ref::<Box<dyn Any + Send>>() {
        return unbox(boxed.as_ref());
    }
    if let Some(boxed) = obj.downcast_ref::<Box<dyn Any + Send + Sync>>() {
        return unbox(boxed.as_ref());
    }
    if let Some(boxed) = obj.downcast_ref::<Box<dyn Any>>() {
        return unbox(boxed.as_ref());
    }
    obj
}

fn encode_erased(
    registry: &ClassRegistry,
    obj: &dyn Any,
    static_name: Option<&str>,
) -> Result<Value, SerializationError> {
    let outer_type = obj.type_id();
    let obj = unbox(obj);
    // 箱を剥がした場合、静的な型名はもう中身を指していない
    let static_name = static_name.filter(|_| obj.type_id() == outer_type);

    let class = registry
        .class_for(obj.type_id())
        .ok_or_else(|| SerializationError::MissingToDict {
            type_name: static_name
                .map(str::to_string)
                .unwrap_or_else(|| format!("<unregistered type {:?}>", obj.type_id())),
        })?;
    let type_name = class.qualified_name();

    let data = class
        .encode_dyn(obj)
        .ok_or_else(|| SerializationError::MissingToDict {
            type_name: type_name.to_string(),
        })?
        .map_err(|source| SerializationError::ToDict {
            type_name: type_name.to_string(),
            source,
        })?;

    tracing::debug!(qualified_name = type_name, "serialized class instance");
    Ok(Envelope::new(type_name, data).into_value())
}

/// envelope から registry に登録された型のオブジェクトを組み立てる
pub fn deserialize_class_instance(
    registry: &ClassRegistry,
    value: &Value,
) -> Result<Box<dyn Any + Send>, DeserializationError> {
    let envelope = RawEnvelope::from_value(value)?;

    let class = resolve_tag(registry, envelope.type_tag).map_err(|source| {
        DeserializationError::Import {
            type_name: envelope.type_tag_display(),
            source,
        }
    })?;
    let type_name = class.qualified_name();

    if !class.can_decode() {
        return Err(DeserializationError::MissingFromDict {
            type_name: type_name.to_string(),
        });
    }

    let data = envelope
        .data
        .as_object()
        .ok_or_else(|| DeserializationError::DataNotMapping {
            type_name: type_name.to_string(),
        })?
        .clone();

    let obj = class
        .decode_dyn(data)
        .ok_or_else(|| DeserializationError::MissingFromDict {
            type_name: type_name.to_string(),
        })?
        .map_err(|source| DeserializationError::FromDict {
            type_name: type_name.to_string(),
            source,
        })?;

    tracing::debug!(qualified_name = type_name, "deserialized class instance");
    Ok(obj)
}

/// `deserialize_class_instance` の結果を T に downcast する
pub fn deserialize_as<T: Qualified>(
    registry: &ClassRegistry,
    value: &Value,
) -> Result<T, DeserializationError> {
    let obj = deserialize_class_instance(registry, value)?;
    obj.downcast::<T>()
        .map(|obj| *obj)
        .map_err(|_| DeserializationError::TypeMismatch {
            expected: T::QUALIFIED_NAME.to_string(),
            found: RawEnvelope::from_value(value)
                .map(|envelope| envelope.type_tag_display())
                .unwrap_or_default(),
        })
}

fn resolve_tag(registry: &ClassRegistry, tag: &Value) -> Result<Arc<dyn DynClass>, ResolveError> {
    match tag {
        Value::String(name) => registry.resolve(name),
        other => Err(ResolveError::NotAString(json_kind(other))),
    }
}

/// registry を使わない静的な encode
pub fn serialize<T: Qualified + ToDict>(obj: &T) -> Result<Value, SerializationError> {
    let data = obj.to_dict().map_err(|source| SerializationError::ToDict {
        type_name: T::QUALIFIED_NAME.to_string(),
        source,
    })?;
    Ok(Envelope::new(T::QUALIFIED_NAME, data).into_value())
}

/// registry を使わない静的な decode
///
/// `type` が T の qualified name と一致しなければ TypeMismatch。
pub fn deserialize<T: Qualified + FromDict>(value: &Value) -> Result<T, DeserializationError> {
    let envelope = RawEnvelope::from_value(value)?;
    if envelope.type_tag.as_str() != Some(T::QUALIFIED_NAME) {
        return Err(DeserializationError::TypeMismatch {
            expected: T::QUALIFIED_NAME.to_string(),
            found: envelope.type_tag_display(),
        });
    }

    let data = envelope
        .data
        .as_object()
        .ok_or_else(|| DeserializationError::DataNotMapping {
            type_name: T::QUALIFIED_NAME.to_string(),
        })?
        .clone();

    T::from_dict(data).map_err(|source| DeserializationError::FromDict {
        type_name: T::QUALIFIED_NAME.to_string(),
        source,
    })
}

/// PayloadCodec は共有 registry を持ち、envelope の encode/decode を行う
///
/// `Arc<PayloadCodec>` を複数の task から同時に使えます。
#[derive(Clone)]
pub struct PayloadCodec {
    registry: Arc<ClassRegistry>,
}

impl PayloadCodec {
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn encode<T: Any>(&self, obj: &T) -> Result<Value, SerializationError> {
        serialize_class_instance(&self.registry, obj)
    }

    pub fn encode_dyn(&self, obj: &dyn Any) -> Result<Value, SerializationError> {
        serialize_dyn(&self.registry, obj)
    }

    pub fn decode(&self, value: &Value) -> Result<Box<dyn Any + Send>, DeserializationError> {
        deserialize_class_instance(&self.registry, value)
    }

    pub fn decode_as<T: Qualified>(&self, value: &Value) -> Result<T, DeserializationError> {
        deserialize_as(&self.registry, value)
    }

    /// envelope を JSON bytes にする
    pub fn encode_to_vec<T: Any>(&self, obj: &T) -> Result<Vec<u8>, SerializationError> {
        let value = self.encode(obj)?;
        serde_json::to_vec(&value).map_err(|source| SerializationError::Json {
            type_name: RawEnvelope::from_value(&value)
                .map(|envelope| envelope.type_tag_display())
                .unwrap_or_default(),
            source,
        })
    }

    /// JSON bytes から decode する
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>, DeserializationError> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.decode(&value)
    }
}
