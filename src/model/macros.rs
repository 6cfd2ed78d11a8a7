//! Preprocessor macro declarations.

use serde::{Deserialize, Serialize};

/// A `#define` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDecl {
    pub name: String,
    /// Replacement text. Absent for header guards and bare conditional
    /// flags (`#define FOO_H`).
    #[serde(default)]
    pub value: Option<String>,
    /// Parameter names for function-like macros; empty for object-like.
    #[serde(default)]
    pub parameters: Vec<String>,
}

impl MacroDecl {
    /// Whether this is a function-like macro (`#define MIN(a, b) ...`).
    #[must_use]
    pub fn is_function_like(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Replacement text with absence normalized to the empty string.
    ///
    /// Value comparison and signature rendering both treat a valueless
    /// macro and an empty-valued macro as equivalent.
    #[must_use]
    pub fn value_token(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Render `#define NAME value` for report output.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut out = format!("#define {}", self.name);
        if self.is_function_like() {
            out.push('(');
            out.push_str(&self.parameters.join(", "));
            out.push(')');
        }
        let value = self.value_token();
        if !value.is_empty() {
            out.push(' ');
            out.push_str(value);
        }
        out
    }
}
