//! Envelope - `{ "type": ..., "data": ... }` の運搬用データ
//!
//! encode 時に作られ、decode 時に消費されるだけの一時的な値です。
//! バージョンフィールドは持ちません。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::DeserializationError;

pub const TYPE_KEY: &str = "type";
pub const DATA_KEY: &str = "data";

/// Type tag + payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    type_name: String,
    data: Map<String, Value>,
}

impl Envelope {
    pub fn new(type_name: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            type_name: type_name.into(),
            data,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_value(self) -> Value {
        let mut map = Map::with_capacity(2);
        map.insert(TYPE_KEY.to_string(), Value::String(self.type_name));
        map.insert(DATA_KEY.to_string(), Value::Object(self.data));
        Value::Object(map)
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        envelope.into_value()
    }
}

/// decode 前の、キーの存在だけを確認した envelope
///
/// `type` / `data` の中身はまだ検査していません。
#[derive(Debug, Clone, Copy)]
pub struct RawEnvelope<'a> {
    pub type_tag: &'a Value,
    pub data: &'a Value,
}

impl<'a> RawEnvelope<'a> {
    /// `type` → `data` の順でキーの存在を確認する。
    ///
    /// mapping でない値はどちらのキーも持たないので MissingType になる。
    pub fn from_value(value: &'a Value) -> Result<Self, DeserializationError> {
        let type_tag = value.get(TYPE_KEY).ok_or(DeserializationError::MissingType)?;
        let data = value.get(DATA_KEY).ok_or(DeserializationError::MissingData)?;
        Ok(Self { type_tag, data })
    }

    /// エラーメッセージ用の tag 表記（文字列ならそのまま）
    pub fn type_tag_display(&self) -> String {
        match self.type_tag {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn into_value_has_exactly_type_and_data() {
        let mut data = Map::new();
        data.insert("name".into(), json!("Ada"));

        let value = Envelope::new("mypkg.Greeter", data).into_value();
        assert_eq!(value, json!({ "type": "mypkg.Greeter", "data": { "name": "Ada" } }));
    }

    #[test]
    fn serde_uses_type_key() {
        let envelope: Envelope =
            serde_json::from_value(json!({ "type": "a.B", "data": { "x": 1 } })).unwrap();
        assert_eq!(envelope.type_name(), "a.B");
        assert_eq!(envelope.data()["x"], json!(1));

        let back = serde_json::to_value(&envelope).unwrap();
        assert_eq!(back, envelope.into_value());
    }

    #[rstest]
    #[case::empty(json!({}))]
    #[case::data_only(json!({ "data": {} }))]
    #[case::not_a_mapping(json!(["type", "data"]))]
    #[case::null(json!(null))]
    fn missing_type_is_reported_first(#[case] value: Value) {
        let err = RawEnvelope::from_value(&value).unwrap_err();
        assert!(matches!(err, DeserializationError::MissingType));
    }

    #[test]
    fn missing_data_after_type() {
        let value = json!({ "type": "a.B" });
        let err = RawEnvelope::from_value(&value).unwrap_err();
        assert!(matches!(err, DeserializationError::MissingData));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let value = json!({ "type": "a.B", "data": {}, "version": 3 });
        let raw = RawEnvelope::from_value(&value).unwrap();
        assert_eq!(raw.type_tag_display(), "a.B");
    }

    #[test]
    fn non_string_tag_is_displayed_as_json() {
        let value = json!({ "type": 42, "data": {} });
        let raw = RawEnvelope::from_value(&value).unwrap();
        assert_eq!(raw.type_tag_display(), "42");
    }
}
