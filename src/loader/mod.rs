//! API snapshot loading and validation.
//!
//! Snapshots are JSON documents produced by the header extractor. Loading
//! is strict: unknown access levels, missing required fields, or key/name
//! mismatches fail the whole load rather than degrade into a partial
//! model. A snapshot that cannot be trusted completely is worth nothing
//! for a compatibility verdict.

use crate::error::{ApiDiffError, LoadErrorKind, Result};
use crate::model::ApiModel;
use std::path::Path;
use tracing::{debug, instrument};

/// Maximum snapshot file size (64 MB). Real extractor output for even very
/// large codebases stays well under this.
const MAX_SNAPSHOT_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Load an API snapshot from a JSON file.
///
/// Returns an error if the file exceeds [`MAX_SNAPSHOT_FILE_SIZE`], is not
/// valid JSON, or fails structural validation.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_model(path: &Path) -> Result<ApiModel> {
    let metadata = std::fs::metadata(path).map_err(|e| ApiDiffError::io(path, e))?;
    if metadata.len() > MAX_SNAPSHOT_FILE_SIZE {
        return Err(ApiDiffError::load(
            path.display().to_string(),
            LoadErrorKind::TooLarge {
                size_mb: metadata.len() / (1024 * 1024),
                limit_mb: MAX_SNAPSHOT_FILE_SIZE / (1024 * 1024),
            },
        ));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ApiDiffError::io(path, e))?;
    load_model_str(&content).map_err(|e| match e {
        ApiDiffError::Load { context, source } if context.is_empty() => {
            ApiDiffError::load(path.display().to_string(), source)
        }
        other => other,
    })
}

/// Load an API snapshot from string content.
pub fn load_model_str(content: &str) -> Result<ApiModel> {
    let mut model: ApiModel = serde_json::from_str(content)
        .map_err(|e| ApiDiffError::load(String::new(), classify_serde_error(&e)))?;
    validate(&model)?;
    model.calculate_content_hash();
    debug!(
        classes = model.classes.len(),
        functions = model.functions.len(),
        enums = model.enums.len(),
        macros = model.macros.len(),
        hash = model.content_hash,
        "snapshot loaded"
    );
    Ok(model)
}

/// Sort serde failures into the load-error taxonomy.
///
/// serde_json reports everything through one error type; the message
/// shapes for absent required fields and out-of-range enum values are
/// stable enough to classify on.
fn classify_serde_error(err: &serde_json::Error) -> LoadErrorKind {
    let message = err.to_string();
    if let Some(rest) = message.strip_prefix("missing field `") {
        if let Some(field) = rest.split('`').next() {
            return LoadErrorKind::MissingField {
                field: field.to_string(),
                location: format!("line {}, column {}", err.line(), err.column()),
            };
        }
    }
    if message.starts_with("unknown variant") || message.starts_with("invalid type") {
        return LoadErrorKind::InvalidValue { message };
    }
    LoadErrorKind::InvalidJson(message)
}

/// Structural validation beyond what serde enforces.
///
/// Every map key must match the `name` field of its declaration; the maps
/// are the authoritative index and a mismatch means the snapshot was
/// assembled inconsistently.
fn validate(model: &ApiModel) -> Result<()> {
    for (key, class) in &model.classes {
        if key != &class.name {
            return Err(mismatch("classes", key, &class.name));
        }
    }
    for (key, function) in &model.functions {
        if key != &function.name {
            return Err(mismatch("functions", key, &function.name));
        }
    }
    for (key, decl) in &model.enums {
        if key != &decl.name {
            return Err(mismatch("enums", key, &decl.name));
        }
    }
    for (key, decl) in &model.macros {
        if key != &decl.name {
            return Err(mismatch("macros", key, &decl.name));
        }
    }
    Ok(())
}

fn mismatch(section: &str, key: &str, name: &str) -> ApiDiffError {
    ApiDiffError::Validation(format!(
        "{section} entry keyed '{key}' declares name '{name}'"
    ))
}
