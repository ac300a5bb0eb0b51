//! Errors - encode/decode のエラー型
//!
//! # 分類
//! - `SerializationError`: encode 側（to_dict を持たない、to_dict 自体の失敗）
//! - `DeserializationError`: decode 側（キー欠落、名前解決失敗、from_dict を持たない、など）
//! - `ResolveError`: 名前 → 型の解決失敗（DeserializationError::Import の source）
//! - `DictError`: 型自身の to_dict / from_dict が返す失敗
//!
//! どのエラーも呼び出し側にそのまま返し、このレイヤーではリトライしません。

use thiserror::Error;

use super::qualified_name::QualifiedNameError;

/// 型自身の to_dict / from_dict の失敗
#[derive(Debug, Error)]
pub enum DictError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a mapping, got {0}")]
    NotAMapping(&'static str),

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("Object of class '{type_name}' does not have a 'to_dict' method")]
    MissingToDict { type_name: String },

    #[error("Object of class '{type_name}' failed to describe itself")]
    ToDict {
        type_name: String,
        #[source]
        source: DictError,
    },

    #[error("envelope for class '{type_name}' could not be written as json")]
    Json {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("type tag must be a string, got {0}")]
    NotAString(&'static str),

    #[error(transparent)]
    InvalidName(#[from] QualifiedNameError),

    #[error("no class registered under '{0}'")]
    NotRegistered(String),
}

#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("Missing 'type' in serialization data")]
    MissingType,

    #[error("Missing 'data' in serialization data")]
    MissingData,

    #[error("Class '{type_name}' not correctly imported")]
    Import {
        type_name: String,
        #[source]
        source: ResolveError,
    },

    #[error("Class '{type_name}' does not have a 'from_dict' method")]
    MissingFromDict { type_name: String },

    #[error("'data' for class '{type_name}' is not a mapping")]
    DataNotMapping { type_name: String },

    #[error("Class '{type_name}' failed to rebuild itself")]
    FromDict {
        type_name: String,
        #[source]
        source: DictError,
    },

    #[error("expected class '{expected}', found '{found}'")]
    TypeMismatch { expected: String, found: String },

    #[error("envelope is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON 値の種類名（エラーメッセージ用）
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
