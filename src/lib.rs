pub mod config;
pub mod http;
pub mod sink;

pub use config::ClientConfig;
pub use http::{HttpClient, ServiceError, ServiceResponse, UploadFile};
pub use sink::{ErrorSink, LogSink, StderrSink};
