//! Asynchronous generation task submissions (video and image jobs).

pub mod form;
pub mod request;
pub mod validate;

pub use form::{is_multipart, read_task_payload, TaskForm, TaskFormFile, TaskPayload};
pub use request::{MetadataValue, TaskAction, TaskSubmitRequest};
pub use validate::{normalize_task_payload, ValidatedTask};
