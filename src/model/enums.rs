//! Enum declarations.

use serde::{Deserialize, Serialize};

/// A C++ enumeration declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    /// Scoped (`enum class`) vs. unscoped. Informational; scoping changes
    /// are not separately diffed.
    #[serde(default)]
    pub is_class_enum: bool,
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

/// A single enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// Value token as written in the source (`1`, `0x10`, `A | B`), absent
    /// for implicitly valued members.
    #[serde(default)]
    pub value: Option<String>,
}

impl EnumMember {
    /// Render `NAME = value` (or just `NAME` for implicit values).
    #[must_use]
    pub fn signature(&self) -> String {
        match &self.value {
            Some(value) => format!("{} = {}", self.name, value),
            None => self.name.clone(),
        }
    }
}
