//! Classification of parsed response bodies into success or service failure.

use serde_json::Value;

/// Field a service sets to a truthy value to report a logical failure.
pub const ERROR_MARKER: &str = "isBoom";

/// Field carrying the diagnostic payload next to [`ERROR_MARKER`].
pub const DIAGNOSTIC_FIELD: &str = "output";

/// A parsed response body, tagged by whether the service reported an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    Success(Value),
    Failure(ServiceError),
}

impl From<Value> for ServiceResponse {
    fn from(body: Value) -> Self {
        let is_failure = body.get(ERROR_MARKER).is_some_and(is_truthy);
        if !is_failure {
            return ServiceResponse::Success(body);
        }

        let output = body.get(DIAGNOSTIC_FIELD).cloned().unwrap_or(Value::Null);
        ServiceResponse::Failure(ServiceError { output, body })
    }
}

/// Error reported by a remote service through an `isBoom` response.
///
/// The HTTP exchange itself succeeded; the body said otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError {
    output: Value,
    body: Value,
}

impl ServiceError {
    /// The diagnostic payload (`output` field, or `null` when absent).
    pub fn diagnostic(&self) -> &Value {
        &self.output
    }

    /// The full parsed response body.
    pub fn response(&self) -> &Value {
        &self.body
    }

    pub fn into_diagnostic(self) -> Value {
        self.output
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Service reported an error: {}", self.output)
    }
}

impl std::error::Error for ServiceError {}

/// Truthiness as JSON-speaking services use it for flags.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
