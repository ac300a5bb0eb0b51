//! QualifiedName - envelope の `type` タグ
//!
//! # 命名規約
//! - `{module.path}.{ClassName}`
//! - 例: `mypkg.greeting.Greeter`
//!
//! module path を持たない `Greeter` のような名前も受け付けます。

use serde::{Deserialize, Serialize};
use std::fmt;

/// QualifiedName は型を一意に識別する文字列
///
/// # 使用例
/// ```
/// use parcel_core::domain::QualifiedName;
///
/// let name = QualifiedName::parse("mypkg.greeting.Greeter").unwrap();
/// assert_eq!(name.module_path(), Some("mypkg.greeting"));
/// assert_eq!(name.class_name(), "Greeter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QualifiedNameError {
    #[error("qualified name is empty")]
    Empty,

    #[error("qualified name '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("qualified name '{0}' contains whitespace")]
    Whitespace(String),
}

impl QualifiedName {
    /// 命名規約をチェックして QualifiedName を作成
    pub fn parse(value: impl Into<String>) -> Result<Self, QualifiedNameError> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn validate(value: &str) -> Result<(), QualifiedNameError> {
        if value.is_empty() {
            return Err(QualifiedNameError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(QualifiedNameError::Whitespace(value.to_string()));
        }
        if value.split('.').any(str::is_empty) {
            return Err(QualifiedNameError::EmptySegment(value.to_string()));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 最後の `.` より前の部分（module path）
    pub fn module_path(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(module, _)| module)
    }

    /// 最後の `.` より後ろの部分（class 名）
    pub fn class_name(&self) -> &str {
        self.0
            .rsplit_once('.')
            .map_or(self.0.as_str(), |(_, class)| class)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = QualifiedNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.0
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
