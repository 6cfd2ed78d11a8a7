//! Function and method declarations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// C++ access level for class members.
///
/// Qt-style `signals`/`slots` sections are preserved as distinct levels so
/// the extractor does not have to lose information, but only `public` is
/// part of the consumable interface for compatibility purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
    Signals,
    Slots,
}

impl AccessLevel {
    /// Whether members at this level participate in compatibility checks.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Signals => "signals",
            Self::Slots => "slots",
        };
        f.write_str(s)
    }
}

/// A single function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name; may be empty for unnamed parameters.
    #[serde(default)]
    pub name: String,
    /// Opaque type token, compared by structural equality.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Default value expression. Only its presence matters for
    /// compatibility, never its content.
    #[serde(default)]
    pub default_value: Option<String>,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.type_name)?;
        } else {
            write!(f, "{} {}", self.type_name, self.name)?;
        }
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// A free function or class method declaration.
///
/// Modifier flags are fixed required fields defaulting to `false` at
/// construction; absence in the exchange format means "not set", never
/// "unknown". `access_level` is deliberately *not* defaulted: a record
/// missing it is malformed and must fail loading rather than be silently
/// treated as public (see [`crate::loader`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub access_level: AccessLevel,
    #[serde(default)]
    pub is_virtual: bool,
    /// Pure virtual (`= 0`) marker. Carried for extractors that emit it,
    /// not separately diffed and not rendered in [`signature`]: a purity
    /// change on a surviving method is invisible, a documented
    /// approximation.
    ///
    /// [`signature`]: FunctionDecl::signature
    #[serde(default)]
    pub is_pure_virtual: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_noexcept: bool,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_final: bool,
    /// Marked `[[deprecated]]` in the old headers. Halves the weight of
    /// issues raised against this element.
    #[serde(default)]
    pub is_deprecated: bool,
}

impl FunctionDecl {
    /// Render a human-readable signature for report output.
    ///
    /// Modifiers are rendered as a prefix in a fixed order so two
    /// declarations with the same structure produce identical strings.
    #[must_use]
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut modifiers = Vec::new();
        if self.is_static {
            modifiers.push("static");
        }
        if self.is_virtual {
            modifiers.push("virtual");
        }
        if self.is_const {
            modifiers.push("const");
        }
        if self.is_noexcept {
            modifiers.push("noexcept");
        }
        if self.is_override {
            modifiers.push("override");
        }
        if self.is_final {
            modifiers.push("final");
        }

        if modifiers.is_empty() {
            format!("{} {}({})", self.return_type, self.name, params)
        } else {
            format!(
                "{} {} {}({})",
                modifiers.join(" "),
                self.return_type,
                self.name,
                params
            )
        }
    }
}
