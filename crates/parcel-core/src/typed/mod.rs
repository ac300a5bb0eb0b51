//! Typed - envelope に参加する型の API
//!
//! # 二層構造
//! - **表層（Typed）**: `Qualified`, `ToDict`, `FromDict` trait - 型安全
//! - **内部（Dyn）**: `DynClass` trait - object-safe, type erasure
//!
//! dynamic import の代わりに `ClassRegistry` に型を明示的に登録します。

pub mod capability;
pub mod class;
pub mod codec;
pub mod registry;

#[cfg(test)]
pub(crate) mod fixtures;

// 主要な trait/型 を再エクスポート
pub use self::capability::{FromDict, Qualified, ToDict, from_dict_via_serde, to_dict_via_serde};
pub use self::class::{DynClass, TypedClass};
pub use self::codec::{
    PayloadCodec, deserialize, deserialize_as, deserialize_class_instance, serialize,
    serialize_class_instance, serialize_dyn,
};
pub use self::registry::{ClassRegistry, RegistryError};
