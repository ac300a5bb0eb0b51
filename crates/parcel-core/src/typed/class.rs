//! Class - registry に格納する型消去済みの「クラス」
//!
//! # 学習ポイント
//! - Object-safe trait (DynClass)
//! - Type erasure パターン (TypedClass<T> → DynClass)
//! - 能力の有無を fn pointer の `Option` で持つ

use std::any::{Any, TypeId};
use std::marker::PhantomData;

use serde_json::{Map, Value};

use super::capability::{FromDict, Qualified, ToDict};
use crate::domain::errors::DictError;

type EncodeFn<T> = fn(&T) -> Result<Map<String, Value>, DictError>;
type DecodeFn<T> = fn(Map<String, Value>) -> Result<T, DictError>;

/// DynClass は object-safe な型の抽象化
///
/// TypedClass<T> を DynClass に変換することで、
/// HashMap<String, Arc<dyn DynClass>> に格納可能にします。
///
/// `encode_dyn` / `decode_dyn` は能力を持たない型では `None` を返します。
pub trait DynClass: Send + Sync {
    fn qualified_name(&self) -> &'static str;

    fn rust_type_id(&self) -> TypeId;

    fn rust_type_name(&self) -> &'static str;

    fn can_encode(&self) -> bool;

    fn can_decode(&self) -> bool;

    fn encode_dyn(&self, obj: &dyn Any) -> Option<Result<Map<String, Value>, DictError>>;

    fn decode_dyn(&self, data: Map<String, Value>) -> Option<Result<Box<dyn Any + Send>, DictError>>;
}

pub struct TypedClass<T: Qualified> {
    encode: Option<EncodeFn<T>>,
    decode: Option<DecodeFn<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Qualified> TypedClass<T> {
    /// 名前だけを持ち、どの能力も持たない
    pub fn opaque() -> Self {
        Self {
            encode: None,
            decode: None,
            _marker: PhantomData,
        }
    }

    pub fn with_to_dict(mut self) -> Self
    where
        T: ToDict,
    {
        let encode: EncodeFn<T> = T::to_dict;
        self.encode = Some(encode);
        self
    }

    pub fn with_from_dict(mut self) -> Self
    where
        T: FromDict,
    {
        let decode: DecodeFn<T> = T::from_dict;
        self.decode = Some(decode);
        self
    }
}

impl<T: Qualified + ToDict + FromDict> TypedClass<T> {
    pub fn new() -> Self {
        Self::opaque().with_to_dict().with_from_dict()
    }
}

impl<T: Qualified + ToDict + FromDict> Default for TypedClass<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Qualified> DynClass for TypedClass<T> {
    fn qualified_name(&self) -> &'static str {
        T::QUALIFIED_NAME
    }

    fn rust_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn can_encode(&self) -> bool {
        self.encode.is_some()
    }

    fn can_decode(&self) -> bool {
        self.decode.is_some()
    }

    fn encode_dyn(&self, obj: &dyn Any) -> Option<Result<Map<String, Value>, DictError>> {
        let encode = self.encode?;
        Some(match obj.downcast_ref::<T>() {
            Some(obj) => encode(obj),
            None => Err(DictError::Other(format!(
                "object is not a {}",
                std::any::type_name::<T>()
            ))),
        })
    }

    fn decode_dyn(&self, data: Map<String, Value>) -> Option<Result<Box<dyn Any + Send>, DictError>> {
        let decode = self.decode?;
        Some(decode(data).map(|obj| Box::new(obj) as Box<dyn Any + Send>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::fixtures::{Greeter, Opaque};
    use serde_json::json;

    #[test]
    fn full_class_encodes_and_decodes() {
        let class = TypedClass::<Greeter>::new();
        assert!(class.can_encode());
        assert!(class.can_decode());
        assert_eq!(class.qualified_name(), "mypkg.Greeter");
        assert_eq!(class.rust_type_id(), TypeId::of::<Greeter>());

        let greeter = Greeter::new("Ada");
        let data = class.encode_dyn(&greeter).unwrap().unwrap();
        assert_eq!(Value::Object(data.clone()), json!({ "name": "Ada" }));

        let back = class.decode_dyn(data).unwrap().unwrap();
        assert_eq!(back.downcast_ref::<Greeter>(), Some(&greeter));
    }

    #[test]
    fn opaque_class_has_no_capabilities() {
        let class = TypedClass::<Opaque>::opaque();
        assert!(!class.can_encode());
        assert!(!class.can_decode());
        assert!(class.encode_dyn(&Opaque).is_none());
        assert!(class.decode_dyn(Map::new()).is_none());
    }

    #[test]
    fn encode_rejects_a_foreign_object() {
        let class = TypedClass::<Greeter>::new();
        let result = class.encode_dyn(&42_u32).unwrap();
        assert!(matches!(result, Err(DictError::Other(_))));
    }
}
