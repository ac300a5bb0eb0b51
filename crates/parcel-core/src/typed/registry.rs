//! ClassRegistry - 名前 → 型の解決（dynamic import の代わり）
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Generic methods での登録と型安全性
//! - `TypeId` による逆引き（オブジェクト → qualified name）

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use super::capability::{FromDict, Qualified, ToDict};
use super::class::{DynClass, TypedClass};
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::domain::errors::ResolveError;
use crate::domain::qualified_name::{QualifiedName, QualifiedNameError};

/// ClassRegistry は envelope に参加する型を登録・管理
///
/// # 使用例
/// ```ignore
/// let mut registry = ClassRegistry::new();
/// registry.register::<Greeter>()?;
///
/// let class = registry.resolve("mypkg.Greeter")?;
/// ```
///
/// # 内部実装
/// - 初期化時に組み立て（mutable）、実行時は `Arc` で共有して読むだけ
/// - `register::<T>()` は TypedClass<T> でラップして DynClass に変換
/// - qualified name → DynClass と TypeId → qualified name の 2 つの HashMap
pub struct ClassRegistry {
    config: RegistryConfig,
    classes: HashMap<String, Arc<dyn DynClass>>,
    names_by_type: HashMap<TypeId, String>,
}

/// RegistryError は ClassRegistry の登録エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Class '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("type {type_name} is already registered as '{existing}'")]
    TypeAlreadyRegistered { type_name: String, existing: String },

    #[error(transparent)]
    InvalidName(#[from] QualifiedNameError),
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            classes: HashMap::new(),
            names_by_type: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// to_dict と from_dict の両方を持つ型を登録
    pub fn register<T: Qualified + ToDict + FromDict>(&mut self) -> Result<(), RegistryError> {
        self.insert(Arc::new(TypedClass::<T>::new()))
    }

    /// encode だけできる型（decode すると MissingFromDict）
    pub fn register_encoder<T: Qualified + ToDict>(&mut self) -> Result<(), RegistryError> {
        self.insert(Arc::new(TypedClass::<T>::opaque().with_to_dict()))
    }

    /// decode だけできる型（encode すると MissingToDict）
    pub fn register_decoder<T: Qualified + FromDict>(&mut self) -> Result<(), RegistryError> {
        self.insert(Arc::new(TypedClass::<T>::opaque().with_from_dict()))
    }

    /// 名前だけを知っている型
    pub fn register_opaque<T: Qualified>(&mut self) -> Result<(), RegistryError> {
        self.insert(Arc::new(TypedClass::<T>::opaque()))
    }

    /// 任意の DynClass を登録
    pub fn insert(&mut self, class: Arc<dyn DynClass>) -> Result<(), RegistryError> {
        let name = class.qualified_name();
        if self.config.validate_names {
            QualifiedName::validate(name)?;
        }

        let type_id = class.rust_type_id();
        if let Some(existing) = self.names_by_type.get(&type_id) {
            if existing != name {
                return Err(RegistryError::TypeAlreadyRegistered {
                    type_name: class.rust_type_name().to_string(),
                    existing: existing.clone(),
                });
            }
        }

        if let Some(previous) = self.classes.get(name) {
            match self.config.on_duplicate {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::AlreadyRegistered(name.to_string()));
                }
                DuplicatePolicy::Replace => {
                    tracing::warn!(
                        qualified_name = name,
                        previous = previous.rust_type_name(),
                        replacement = class.rust_type_name(),
                        "replacing registered class"
                    );
                    let previous_type = previous.rust_type_id();
                    self.names_by_type.remove(&previous_type);
                }
            }
        }

        tracing::debug!(
            qualified_name = name,
            rust_type = class.rust_type_name(),
            to_dict = class.can_encode(),
            from_dict = class.can_decode(),
            "registered class"
        );
        self.names_by_type.insert(type_id, name.to_string());
        self.classes.insert(name.to_string(), class);
        Ok(())
    }

    pub fn get(&self, qualified_name: &str) -> Option<Arc<dyn DynClass>> {
        self.classes.get(qualified_name).cloned()
    }

    /// qualified name を型に解決する
    ///
    /// 未登録の場合、名前が命名規約違反なら InvalidName、そうでなければ NotRegistered。
    pub fn resolve(&self, qualified_name: &str) -> Result<Arc<dyn DynClass>, ResolveError> {
        if let Some(class) = self.get(qualified_name) {
            return Ok(class);
        }
        QualifiedName::validate(qualified_name)?;
        Err(ResolveError::NotRegistered(qualified_name.to_string()))
    }

    /// オブジェクトの TypeId から登録済みの型を引く
    pub fn class_for(&self, type_id: TypeId) -> Option<Arc<dyn DynClass>> {
        self.names_by_type
            .get(&type_id)
            .and_then(|name| self.classes.get(name))
            .cloned()
    }

    /// name-qualifier: 型 → qualified name
    pub fn qualified_name_of<T: 'static>(&self) -> Option<&str> {
        self.names_by_type.get(&TypeId::of::<T>()).map(String::as_str)
    }

    /// 登録済みの qualified name（ソート済み）
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }

    /// 登録済みの型（qualified name 順）
    pub fn classes(&self) -> Vec<Arc<dyn DynClass>> {
        self.registered_names()
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
