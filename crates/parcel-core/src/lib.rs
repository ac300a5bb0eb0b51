//! parcel-core
//!
//! Type-tagged envelopes: `{ "type": <qualified name>, "data": <mapping> }`.
//!
//! # モジュール構成
//! - **domain**: envelope, qualified name, エラー型
//! - **typed**: capability trait（Qualified, ToDict, FromDict）, ClassRegistry, codec
//! - **config**: registry の設定

pub mod config;
pub mod domain;
pub mod typed;

pub use config::{DuplicatePolicy, RegistryConfig};
pub use domain::{
    DeserializationError, DictError, Envelope, QualifiedName, ResolveError, SerializationError,
};
pub use typed::{
    ClassRegistry, FromDict, PayloadCodec, Qualified, RegistryError, ToDict,
    deserialize_class_instance, serialize_class_instance,
};
