//! JSON HTTP client with service error detection.

mod client;
mod response;
mod upload;

pub use client::HttpClient;
pub use response::{DIAGNOSTIC_FIELD, ERROR_MARKER, ServiceError, ServiceResponse};
pub use upload::{DEFAULT_ENCODING, DEFAULT_MIMETYPE, UploadFile};
