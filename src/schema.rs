//! Declarative request-body schema for the video resource.
//!
//! The mutable fields of a record are described once in a static table and
//! validated in one pass per request, either with every field required
//! (create, full replace) or with every field optional (partial update).
//! Validation failures name each offending field.

use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::models::{Video, VideoChanges, VideoId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Integer => "an integer",
        }
    }
}

pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Mutable fields of a video record.
pub const VIDEO_FIELDS: [FieldSpec; 3] = [
    FieldSpec { name: "name", kind: FieldKind::Text, required: true },
    FieldSpec { name: "views", kind: FieldKind::Integer, required: true },
    FieldSpec { name: "likes", kind: FieldKind::Integer, required: true },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Every required field must be present with the right type.
    Required,
    /// Absent fields are left untouched; present fields must still have
    /// the right type.
    Optional,
}

/// Validate a request body against [`VIDEO_FIELDS`] and extract the typed
/// field set. A JSON `null` counts as absent.
pub fn parse_video_body(body: &Value, mode: ParseMode) -> AppResult<VideoChanges> {
    if !body.is_object() {
        return Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    }

    let mut problems = Vec::new();
    for field in &VIDEO_FIELDS {
        match body.get(field.name).filter(|value| !value.is_null()) {
            None => {
                if mode == ParseMode::Required && field.required {
                    problems.push(format!("{} is required", field.name));
                }
            }
            Some(value) => {
                let matches_kind = match field.kind {
                    FieldKind::Text => value.is_string(),
                    FieldKind::Integer => value.as_i64().is_some(),
                };
                if !matches_kind {
                    problems.push(format!("{} must be {}", field.name, field.kind.expected()));
                }
            }
        }
    }
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join(", ")));
    }

    let mut changes = VideoChanges {
        name: body.get("name").and_then(Value::as_str).map(str::to_owned),
        views: body.get("views").and_then(Value::as_i64),
        likes: body.get("likes").and_then(Value::as_i64),
    };
    // A present-but-empty name never overwrites the stored one on partial
    // update. Integer zero is a real value and does overwrite.
    if mode == ParseMode::Optional {
        changes.name = changes.name.filter(|name| !name.is_empty());
    }
    Ok(changes)
}

/// Validate a create-grade body and build the full record for `id`.
pub fn parse_new_video(body: &Value, id: VideoId) -> AppResult<Video> {
    let changes = parse_video_body(body, ParseMode::Required)?;
    match (changes.name, changes.views, changes.likes) {
        (Some(name), Some(views), Some(likes)) => Ok(Video { id, name, views, likes }),
        _ => Err(AppError::Validation(
            "name, views and likes are required".to_string(),
        )),
    }
}
