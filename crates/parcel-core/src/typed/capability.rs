//! Capability traits - envelope に参加する型が実装する trait
//!
//! # 学習ポイント
//! - Associated Constants (`const QUALIFIED_NAME`)
//! - 能力ごとに trait を分ける（`ToDict` だけ、`FromDict` だけ、も表現できる）

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::errors::{DictError, json_kind};

/// Qualified は型と envelope の `type` タグを対応付ける
///
/// # 使用例
/// ```
/// use parcel_core::typed::Qualified;
///
/// struct Greeter {
///     name: String,
/// }
///
/// impl Qualified for Greeter {
///     const QUALIFIED_NAME: &'static str = "mypkg.Greeter";
/// }
/// ```
///
/// # Trait Bounds
/// - `Send`: decode 結果を `Box<dyn Any + Send>` で返すため
/// - `'static`: `TypeId` で引けるようにするため
pub trait Qualified: Send + 'static {
    /// `{module.path}.{ClassName}`
    const QUALIFIED_NAME: &'static str;
}

/// 自分自身を mapping として記述できる
pub trait ToDict {
    fn to_dict(&self) -> Result<Map<String, Value>, DictError>;
}

/// mapping から自分自身を組み立てられる
pub trait FromDict: Sized {
    fn from_dict(data: Map<String, Value>) -> Result<Self, DictError>;
}

/// `Serialize` を持つ型の `to_dict` 実装
///
/// struct 以外（数値や配列など）に serialize される型は NotAMapping になる。
pub fn to_dict_via_serde<T: Serialize + ?Sized>(value: &T) -> Result<Map<String, Value>, DictError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(DictError::NotAMapping(json_kind(&other))),
    }
}

/// `DeserializeOwned` を持つ型の `from_dict` 実装
pub fn from_dict_via_serde<T: DeserializeOwned>(data: Map<String, Value>) -> Result<T, DictError> {
    Ok(serde_json::from_value(Value::Object(data))?)
}
