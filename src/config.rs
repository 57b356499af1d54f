//! Transport configuration.

use anyhow::{Context, Result};
use reqwest::Client;

/// Settings for the underlying reqwest Client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Uses `user_agent` when given, the default otherwise.
    pub fn new(user_agent: Option<String>) -> Self {
        match user_agent {
            Some(user_agent) => Self { user_agent },
            None => Self::default(),
        }
    }

    #[tracing::instrument]
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(&self.user_agent)
            .build()
            .context("Failed to build HTTP client")
    }
}

/// `jsonfetch/<version>`
pub fn default_user_agent() -> String {
    format!("jsonfetch/{}", env!("JSONFETCH_VERSION"))
}
