//! File attachments sent as multipart forms.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Transfer encoding recorded when the caller does not provide one.
pub const DEFAULT_ENCODING: &str = "7bit";

/// Media type recorded when the caller does not provide one.
pub const DEFAULT_MIMETYPE: &str = "application/octet-stream";

/// A file to upload, with the metadata the receiving service expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub buffer: Vec<u8>,
    pub encoding: String,
    pub mimetype: String,
    pub originalname: String,
    pub size: u64,
}

impl UploadFile {
    /// Creates an upload from in-memory bytes. `size` is taken from the buffer.
    pub fn new(buffer: Vec<u8>, originalname: impl Into<String>) -> Self {
        let size = buffer.len() as u64;
        Self {
            buffer,
            encoding: DEFAULT_ENCODING.to_string(),
            mimetype: DEFAULT_MIMETYPE.to_string(),
            originalname: originalname.into(),
            size,
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = mimetype.into();
        self
    }

    /// Reads a file from disk, naming the upload after the file.
    #[tracing::instrument]
    pub async fn from_path(path: &Path) -> Result<Self> {
        let buffer = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let originalname = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("{} has no file name", path.display()))?;

        Ok(Self::new(buffer, originalname))
    }

    /// Builds the multipart form: `file`, `encoding`, `mimetype`,
    /// `originalname` and `size`, in that order.
    pub fn into_form(self) -> Form {
        Form::new()
            .part("file", Part::bytes(self.buffer))
            .text("encoding", self.encoding)
            .text("mimetype", self.mimetype)
            .text("originalname", self.originalname)
            .text("size", self.size.to_string())
    }
}
