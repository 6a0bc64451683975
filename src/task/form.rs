//! Reading task submissions off the wire.
//!
//! A submission is either a JSON body or a `multipart/form-data` form. Both are
//! buffered into a [`TaskPayload`] before validation so the validator itself
//! stays synchronous.

use crate::core::error::TaskError;
use crate::core::error_types::TaskErrorCode;
use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
    http::{header, HeaderMap, Request},
};
use bytes::Bytes;

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// An uploaded file part.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFormFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A buffered multipart form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    /// Text fields in arrival order; repeated names are kept.
    pub fields: Vec<(String, String)>,
    pub files: Vec<TaskFormFile>,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, file: TaskFormFile) -> Self {
        self.files.push(file);
        self
    }

    /// First value of a text field.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`first`](Self::first), empty string when absent.
    pub(crate) fn first_or_empty(&self, name: &str) -> String {
        self.first(name).unwrap_or_default().to_string()
    }

    /// Every value of a text field.
    pub fn all(&self, name: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Distinct text-field names in first-seen order.
    pub(crate) fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (key, _) in &self.fields {
            if !names.contains(&key.as_str()) {
                names.push(key.as_str());
            }
        }
        names
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.iter().any(|file| file.field == name)
    }
}

/// A task submission body, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPayload {
    Json(Bytes),
    Form(TaskForm),
}

/// Whether the headers announce a multipart form.
pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(MULTIPART_FORM_DATA))
}

/// Buffer a request body into a [`TaskPayload`].
///
/// Body size is bounded by whatever `DefaultBodyLimit` the router installs.
pub async fn read_task_payload(req: Request<Body>) -> Result<TaskPayload, TaskError> {
    if is_multipart(req.headers()) {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| TaskError::from_source(TaskErrorCode::InvalidMultipartForm, e))?;
        return read_form(multipart).await.map(TaskPayload::Form);
    }

    let body = Bytes::from_request(req, &())
        .await
        .map_err(|e| TaskError::from_source(TaskErrorCode::InvalidRequest, e))?;
    Ok(TaskPayload::Json(body))
}

async fn read_form(mut multipart: Multipart) -> Result<TaskForm, TaskError> {
    let mut form = TaskForm::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TaskError::from_source(TaskErrorCode::InvalidMultipartForm, e))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_some() {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| TaskError::from_source(TaskErrorCode::InvalidMultipartForm, e))?;
            form.files.push(TaskFormFile {
                field: name,
                file_name,
                content_type,
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| TaskError::from_source(TaskErrorCode::InvalidMultipartForm, e))?;
            form.fields.push((name, value));
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "X-TASK-BOUNDARY";

    fn multipart_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/videos")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_form_accessors() {
        let form = TaskForm::new()
            .text("images", "a.png")
            .text("model", "sora-2")
            .text("images", "b.png");
        assert_eq!(form.first("images"), Some("a.png"));
        assert_eq!(form.all("images"), vec!["a.png", "b.png"]);
        assert_eq!(form.first("prompt"), None);
        assert_eq!(form.first_or_empty("prompt"), "");
        assert_eq!(form.field_names(), vec!["images", "model"]);
    }

    #[test]
    fn test_is_multipart() {
        let mut headers = HeaderMap::new();
        assert!(!is_multipart(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=abc".parse().unwrap(),
        );
        assert!(is_multipart(&headers));
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert!(!is_multipart(&headers));
    }

    #[tokio::test]
    async fn test_read_json_payload() {
        let req = Request::builder()
            .method("POST")
            .uri("/v1/videos")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"model":"sora-2"}"#))
            .unwrap();
        let payload = read_task_payload(req).await.unwrap();
        assert_eq!(payload, TaskPayload::Json(Bytes::from(r#"{"model":"sora-2"}"#)));
    }

    #[tokio::test]
    async fn test_read_multipart_payload() {
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"model\"\r\n\r\n\
             sora-2\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"input_reference\"; filename=\"ref.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             PNGDATA\r\n\
             --{b}--\r\n",
            b = BOUNDARY
        );
        let payload = read_task_payload(multipart_request(&body)).await.unwrap();
        let TaskPayload::Form(form) = payload else {
            panic!("expected a form payload");
        };
        assert_eq!(form.first("model"), Some("sora-2"));
        assert!(form.has_file("input_reference"));
        assert_eq!(form.files[0].file_name.as_deref(), Some("ref.png"));
        assert_eq!(form.files[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(form.files[0].data, Bytes::from_static(b"PNGDATA"));
    }

    #[tokio::test]
    async fn test_malformed_multipart() {
        let err = read_task_payload(multipart_request("not a multipart body"))
            .await
            .unwrap_err();
        assert_eq!(err.code, TaskErrorCode::InvalidMultipartForm);
        assert!(err.local_error);
    }
}
