//! Task submission normalization and validation.
//!
//! JSON and multipart submissions are mapped onto one [`TaskSubmitRequest`],
//! then checked in a fixed order where the first failure wins:
//!
//! 1. `model` must be non-blank
//! 2. a lone `image` is promoted to a one-element `images` list
//! 3. `prompt` must be non-blank
//! 4. model-family rules (defaults, allowed sizes, pricing ratios)
//! 5. the action is picked from the presence of an image reference

use super::form::{TaskForm, TaskFormFile, TaskPayload};
use super::request::{MetadataValue, TaskAction, TaskSubmitBody, TaskSubmitRequest};
use crate::core::error::TaskError;
use crate::core::error_types::TaskErrorCode;
use serde_json::Value;
use std::collections::BTreeMap;

/// Form fields that map onto [`TaskSubmitRequest`] instead of metadata.
const KNOWN_TASK_FIELDS: &[&str] = &[
    "prompt",
    "model",
    "mode",
    "image",
    "images",
    "size",
    "duration",
    "input_reference",
];

/// File parts that count as an image reference.
const IMAGE_FILE_FIELDS: &[&str] = &["input_reference", "image"];

const VIDEO_FAMILY_PREFIX: &str = "sora-2";
const VIDEO_DEFAULT_SIZE: &str = "720x1280";
const VIDEO_DEFAULT_SECONDS: i64 = 4;
const LARGE_VIDEO_SIZES: &[&str] = &["1792x1024", "1024x1792"];
const LARGE_SIZE_RATIO: f64 = 1.666667;

/// Allowed sizes per model variant. Variants not listed skip the size check.
const VIDEO_SIZE_RULES: &[(&str, &[&str])] = &[
    ("sora-2", &["720x1280", "1280x720"]),
    (
        "sora-2-pro",
        &["720x1280", "1280x720", "1792x1024", "1024x1792"],
    ),
];

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTask {
    pub request: TaskSubmitRequest,
    pub action: TaskAction,
    /// Auxiliary pricing multipliers for the billing layer; empty when the
    /// model family has none.
    pub other_ratios: BTreeMap<String, f64>,
    /// Uploaded file parts, forwarded untouched.
    pub files: Vec<TaskFormFile>,
}

struct ParsedTask {
    request: TaskSubmitRequest,
    files: Vec<TaskFormFile>,
    has_file_reference: bool,
}

/// Parse and validate a buffered task submission.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use llm_relay_core::task::{normalize_task_payload, TaskAction, TaskPayload};
///
/// let body = Bytes::from(r#"{"model":"sora-2","prompt":"a red fox"}"#);
/// let task = normalize_task_payload(TaskPayload::Json(body)).unwrap();
/// assert_eq!(task.request.size, "720x1280");
/// assert_eq!(task.request.duration, 4);
/// assert_eq!(task.action, TaskAction::TextGenerate);
/// ```
pub fn normalize_task_payload(payload: TaskPayload) -> Result<ValidatedTask, TaskError> {
    let parsed = match payload {
        TaskPayload::Json(body) => parse_json(&body)?,
        TaskPayload::Form(form) => parse_form(form),
    };

    validate(parsed).map_err(|err| {
        tracing::debug!(
            code = %err.code,
            "Task submission rejected: {}",
            err.message
        );
        err
    })
}

fn parse_json(body: &[u8]) -> Result<ParsedTask, TaskError> {
    let invalid_json = |e: serde_json::Error| {
        tracing::debug!("Task submission is not valid JSON: {}", e);
        TaskError::from_source(TaskErrorCode::InvalidJson, e)
    };

    // Only an object is a task record.
    let value: Value = serde_json::from_slice(body).map_err(invalid_json)?;
    if !value.is_object() {
        return Err(TaskError::local(
            TaskErrorCode::InvalidJson,
            "task submission must be a JSON object",
        ));
    }
    let body: TaskSubmitBody = serde_json::from_value(value).map_err(invalid_json)?;

    let seconds = body.seconds.as_ref().map_or(0, |s| s.value());
    let mut request = TaskSubmitRequest {
        prompt: body.prompt,
        model: body.model,
        mode: body.mode,
        image: body.image,
        images: body.images,
        size: body.size,
        duration: if seconds > 0 { seconds } else { body.duration },
        metadata: body
            .metadata
            .into_iter()
            .map(|(key, value)| (key, MetadataValue::from_json(value)))
            .collect(),
    };
    apply_input_reference(&mut request, &body.input_reference);

    Ok(ParsedTask {
        request,
        files: Vec::new(),
        has_file_reference: false,
    })
}

fn parse_form(form: TaskForm) -> ParsedTask {
    let seconds = form
        .first("seconds")
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0);
    let duration = form
        .first("duration")
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0);

    let metadata = form
        .field_names()
        .into_iter()
        .filter(|name| !KNOWN_TASK_FIELDS.contains(name))
        .filter_map(|name| {
            form.first(name)
                .map(|value| (name.to_string(), MetadataValue::coerce(value)))
        })
        .collect();

    let mut request = TaskSubmitRequest {
        prompt: form.first_or_empty("prompt"),
        model: form.first_or_empty("model"),
        mode: form.first_or_empty("mode"),
        image: form.first_or_empty("image"),
        images: form.all("images"),
        size: form.first_or_empty("size"),
        duration: if seconds > 0 { seconds } else { duration },
        metadata,
    };
    apply_input_reference(&mut request, &form.first_or_empty("input_reference"));

    let has_file_reference = IMAGE_FILE_FIELDS.iter().any(|name| form.has_file(name));

    ParsedTask {
        request,
        files: form.files,
        has_file_reference,
    }
}

/// A non-empty `input_reference` replaces the image list.
fn apply_input_reference(request: &mut TaskSubmitRequest, input_reference: &str) {
    if !input_reference.is_empty() {
        request.images = vec![input_reference.to_string()];
    }
}

fn validate(parsed: ParsedTask) -> Result<ValidatedTask, TaskError> {
    let ParsedTask {
        mut request,
        files,
        has_file_reference,
    } = parsed;

    if request.model.trim().is_empty() {
        return Err(TaskError::local(
            TaskErrorCode::MissingModel,
            "model field is required",
        ));
    }

    if request.images.is_empty() && !request.image.trim().is_empty() {
        request.images = vec![request.image.clone()];
    }

    validate_prompt(&request.prompt)?;

    let other_ratios = apply_model_rules(&mut request)?;

    let action = if request.has_image() || has_file_reference {
        TaskAction::Generate
    } else {
        TaskAction::TextGenerate
    };

    Ok(ValidatedTask {
        request,
        action,
        other_ratios,
        files,
    })
}

fn validate_prompt(prompt: &str) -> Result<(), TaskError> {
    if prompt.trim().is_empty() {
        return Err(TaskError::local(
            TaskErrorCode::InvalidRequest,
            "prompt is required",
        ));
    }
    Ok(())
}

/// Video-family defaults, size checks and pricing ratios.
fn apply_model_rules(request: &mut TaskSubmitRequest) -> Result<BTreeMap<String, f64>, TaskError> {
    let mut ratios = BTreeMap::new();
    if !request.model.starts_with(VIDEO_FAMILY_PREFIX) {
        return Ok(ratios);
    }

    if request.size.is_empty() {
        request.size = VIDEO_DEFAULT_SIZE.to_string();
    }
    if request.duration <= 0 {
        request.duration = VIDEO_DEFAULT_SECONDS;
    }

    let allowed = VIDEO_SIZE_RULES
        .iter()
        .find(|(model, _)| *model == request.model)
        .map(|(_, sizes)| *sizes);
    if let Some(sizes) = allowed {
        if !sizes.contains(&request.size.as_str()) {
            return Err(TaskError::local(
                TaskErrorCode::InvalidSize,
                "sora-2 size is invalid",
            ));
        }
    }

    ratios.insert("seconds".to_string(), request.duration as f64);
    let size_ratio = if LARGE_VIDEO_SIZES.contains(&request.size.as_str()) {
        LARGE_SIZE_RATIO
    } else {
        1.0
    };
    ratios.insert("size".to_string(), size_ratio);

    Ok(ratios)
}
