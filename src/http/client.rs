//! JSON HTTP client that turns `isBoom` responses into errors.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use super::response::ServiceResponse;
use super::upload::UploadFile;
use crate::config::ClientConfig;
use crate::sink::{ErrorSink, StderrSink};

/// HTTP client for JSON services.
///
/// Every operation parses the response body as JSON regardless of status code.
/// A body with a truthy `isBoom` field is handed to the sink and returned as a
/// [`ServiceError`](super::ServiceError) wrapped in `anyhow::Error`.
#[derive(Clone)]
pub struct HttpClient<S = StderrSink> {
    client: Client,
    sink: S,
}

impl HttpClient<StderrSink> {
    /// Creates a client that writes service errors to standard error.
    pub fn new(client: Client) -> Self {
        Self::with_sink(client, StderrSink)
    }
}

impl<S: ErrorSink> HttpClient<S> {
    pub fn with_sink(client: Client, sink: S) -> Self {
        Self { client, sink }
    }

    /// Builds the transport from `config` and attaches `sink`.
    pub fn from_config(config: &ClientConfig, sink: S) -> Result<Self> {
        Ok(Self::with_sink(config.build_client()?, sink))
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Performs a GET request.
    ///
    /// When `params` is given it replaces the query string of `url`.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, url: &str, params: Option<&[(&str, &str)]>) -> Result<Value> {
        let url = with_query(url, params)?;
        debug!("GET {}...", url);

        self.send(self.client.get(url)).await
    }

    /// Performs a POST request with `body` encoded as JSON.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Value> {
        debug!("POST {}...", url);

        let body = encode_body(body)?;
        self.send(self.client.post(url).json(&body)).await
    }

    /// Performs a PUT request with `body` encoded as JSON.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Value> {
        debug!("PUT {}...", url);

        let body = encode_body(body)?;
        self.send(self.client.put(url).json(&body)).await
    }

    /// Performs a DELETE request without a body.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, url: &str) -> Result<Value> {
        debug!("DELETE {}...", url);

        self.send(self.client.delete(url)).await
    }

    /// POSTs `file` as a multipart form.
    ///
    /// The content type, including the boundary, is left to reqwest.
    #[tracing::instrument(skip(self, file))]
    pub async fn upload(&self, url: &str, file: UploadFile) -> Result<Value> {
        debug!("Uploading {} ({} bytes) to {}...", file.originalname, file.size, url);

        self.send(self.client.post(url).multipart(file.into_form()))
            .await
    }

    /// Sends the request and applies the shared response handling.
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("Failed to send request")?;

        let json = response
            .json::<Value>()
            .await
            .context("Failed to parse JSON response")?;

        match ServiceResponse::from(json) {
            ServiceResponse::Success(json) => Ok(json),
            ServiceResponse::Failure(err) => {
                self.sink.record(err.diagnostic());
                Err(err.into())
            }
        }
    }
}

/// Parses `url` and, when `params` is given, replaces its query string.
fn with_query(url: &str, params: Option<&[(&str, &str)]>) -> Result<Url> {
    let mut url = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;

    if let Some(params) = params {
        url.set_query(None);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
    }

    Ok(url)
}

/// Encodes `body` before it reaches the request builder.
fn encode_body<T: Serialize + ?Sized>(body: &T) -> Result<Value> {
    serde_json::to_value(body).context("Failed to encode request body as JSON")
}
