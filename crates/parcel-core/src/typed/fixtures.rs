// テスト用の型。Greeter は serde 経由、Counter は手書きで能力を実装する。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::capability::{FromDict, Qualified, ToDict, from_dict_via_serde, to_dict_via_serde};
use crate::domain::errors::DictError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeter {
    pub name: String,
}

impl Greeter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Qualified for Greeter {
    const QUALIFIED_NAME: &'static str = "mypkg.Greeter";
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
    const QUALIFIED_NAME: &'static str = "mypkg.counters.Counter";
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
            .ok_or_else(|| DictError::MissingField("value".into()))?
            .as_u64()
            .ok_or_else(|| DictError::InvalidField {
                field: "value".into(),
                reason: "expected an unsigned integer".into(),
            })?;
        Ok(Self { value })
    }
}

/// to_dict だけを持つ
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOnly;

impl Qualified for WriteOnly {
    const QUALIFIED_NAME: &'static str = "mypkg.WriteOnly";
}

impl ToDict for WriteOnly {
    fn to_dict(&self) -> Result<Map<String, Value>, DictError> {
        Ok(Map::new())
    }
}

/// from_dict だけを持つ
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadOnly {
    pub id: u64,
}

impl Qualified for ReadOnly {
    const QUALIFIED_NAME: &'static str = "mypkg.ReadOnly";
}

impl FromDict for ReadOnly {
    fn from_dict(data: Map<String, Value>) -> Result<Self, DictError> {
        from_dict_via_serde(data)
    }
}

/// 名前だけ
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque;

impl Qualified for Opaque {
    const QUALIFIED_NAME: &'static str = "mypkg.Opaque";
}

/// to_dict が常に失敗する
#[derive(Debug, Clone, PartialEq)]
pub struct Broken;

impl Qualified for Broken {
    const QUALIFIED_NAME: &'static str = "mypkg.Broken";
}

impl ToDict for Broken {
    fn to_dict(&self) -> Result<Map<String, Value>, DictError> {
        Err(DictError::Other("broken on purpose".into()))
    }
}

impl FromDict for Broken {
    fn from_dict(_data: Map<String, Value>) -> Result<Self, DictError> {
        Err(DictError::Other("broken on purpose".into()))
    }
}
