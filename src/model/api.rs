//! The API model aggregate root.

use super::{ClassDecl, EnumDecl, FunctionDecl, MacroDecl};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// One snapshot of a library's public API surface.
///
/// Declarations are keyed by name; insertion order is preserved so issue
/// output stays deterministic across runs. The diff engine never mutates a
/// model once loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiModel {
    #[serde(default)]
    pub classes: IndexMap<String, ClassDecl>,
    #[serde(default)]
    pub functions: IndexMap<String, FunctionDecl>,
    #[serde(default)]
    pub enums: IndexMap<String, EnumDecl>,
    #[serde(default)]
    pub macros: IndexMap<String, MacroDecl>,
    /// Content hash for quick equality checks between snapshots.
    #[serde(skip)]
    pub content_hash: u64,
}

impl ApiModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the model contains no declarations at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.functions.is_empty()
            && self.enums.is_empty()
            && self.macros.is_empty()
    }

    /// Total number of addressable API elements in this snapshot.
    ///
    /// Counts every class plus each of its methods, every enum plus each
    /// of its members, every free function, and every macro. This is the
    /// denominator for the old-API breakage percentage.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        let class_surface: usize = self
            .classes
            .values()
            .map(|class| 1 + class.methods.len())
            .sum();
        let enum_surface: usize = self
            .enums
            .values()
            .map(|decl| 1 + decl.members.len())
            .sum();
        class_surface + enum_surface + self.functions.len() + self.macros.len()
    }

    /// Calculate and update the content hash.
    ///
    /// Keys are hashed in sorted order so two models with the same
    /// declarations but different insertion order compare equal.
    pub fn calculate_content_hash(&mut self) {
        let mut hasher_input = Vec::new();

        let mut append_sorted = |tag: u8, entries: Vec<(&String, Vec<u8>)>| {
            let mut entries = entries;
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (name, body) in entries {
                hasher_input.push(tag);
                hasher_input.extend(name.as_bytes());
                hasher_input.push(0);
                hasher_input.extend(body);
            }
        };

        append_sorted(
            b'c',
            self.classes
                .iter()
                .filter_map(|(k, v)| Some((k, serde_json::to_vec(v).ok()?)))
                .collect(),
        );
        append_sorted(
            b'f',
            self.functions
                .iter()
                .filter_map(|(k, v)| Some((k, serde_json::to_vec(v).ok()?)))
                .collect(),
        );
        append_sorted(
            b'e',
            self.enums
                .iter()
                .filter_map(|(k, v)| Some((k, serde_json::to_vec(v).ok()?)))
                .collect(),
        );
        append_sorted(
            b'm',
            self.macros
                .iter()
                .filter_map(|(k, v)| Some((k, serde_json::to_vec(v).ok()?)))
                .collect(),
        );

        self.content_hash = xxh3_64(&hasher_input);
    }
}
