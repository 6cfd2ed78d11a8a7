//! Class declarations.

use super::{AccessLevel, FunctionDecl};
use serde::{Deserialize, Serialize};

/// A C++ class or struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    /// Base class names. Order carries no meaning for compatibility; the
    /// differ compares them as a set.
    #[serde(default)]
    pub base_classes: Vec<String>,
    #[serde(default)]
    pub is_final: bool,
    /// Declared methods. Names are not unique (overloads); the differ keys
    /// methods by name only, a documented approximation.
    #[serde(default)]
    pub methods: Vec<FunctionDecl>,
    /// Member fields. Carried in the model for extractors that emit them,
    /// not currently diffed.
    #[serde(default)]
    pub members: Vec<FieldDecl>,
}

impl ClassDecl {
    /// Render the inheritance list for report output.
    #[must_use]
    pub fn inheritance_signature(&self) -> String {
        format!("Inheritance: {}", self.base_classes.join(", "))
    }
}

/// A class member field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_field_access")]
    pub access_level: AccessLevel,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
}

const fn default_field_access() -> AccessLevel {
    AccessLevel::Private
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inheritance_signature() {
        let class = ClassDecl {
            name: "Widget".to_string(),
            base_classes: vec!["QObject".to_string(), "Paintable".to_string()],
            is_final: false,
            methods: vec![],
            members: vec![],
        };
        assert_eq!(class.inheritance_signature(), "Inheritance: QObject, Paintable");
    }

    #[test]
    fn test_field_defaults_to_private() {
        let json = r#"{"name": "count_", "type": "int"}"#;
        let field: FieldDecl = serde_json::from_str(json).expect("valid field");
        assert_eq!(field.access_level, AccessLevel::Private);
    }
}
