//! Pushover bindings for Rust
//! Sends push notifications through the Pushover messages API

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

/// Public Pushover messages endpoint
pub const DEFAULT_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Field limits documented by the Pushover API
pub const MAX_MESSAGE_CHARS: usize = 1024;
pub const MAX_URL_CHARS: usize = 512;
pub const MAX_URL_TITLE_CHARS: usize = 100;

/// Errors building a client
#[derive(Error, Debug)]
pub enum PushoverError {
    #[error("HTTP client setup failed: {0}")]
    ClientError(#[from] reqwest::Error),
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Errors delivering one message
#[derive(Error, Debug)]
pub enum SendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Pushover returned status {status}: {reason}")]
    Rejected { status: u16, reason: String },
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// A single notification as accepted by the messages endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message: String,
    pub url: Option<String>,
    pub url_title: Option<String>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            url: None,
            url_title: None,
        }
    }

    /// Attach a supplementary link; empty URLs are ignored
    pub fn with_link(mut self, url: &str, title: &str) -> Self {
        if !url.is_empty() {
            self.url = Some(url.to_string());
            self.url_title = Some(title.to_string());
        }
        self
    }

    /// Form fields for this message, truncated to the API limits
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![(
            "message",
            truncate_to_char_boundary(&self.message, MAX_MESSAGE_CHARS),
        )];

        if let Some(url) = &self.url {
            fields.push(("url", truncate_to_char_boundary(url, MAX_URL_CHARS)));
            if let Some(title) = &self.url_title {
                fields.push((
                    "url_title",
                    truncate_to_char_boundary(title, MAX_URL_TITLE_CHARS),
                ));
            }
        }

        fields
    }
}

pub struct PushoverClient {
    url: String,
    token: String,
    user: String,
    client: Client,
}

impl PushoverClient {
    pub fn new(url: &str, token: &str, user: &str) -> Result<Self, PushoverError> {
        if token.is_empty() {
            return Err(PushoverError::MissingCredential("token"));
        }
        if user.is_empty() {
            return Err(PushoverError::MissingCredential("user"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            url: url.to_string(),
            token: token.to_string(),
            user: user.to_string(),
            client,
        })
    }

    /// Send one message. Any status of 400 or above is a rejection.
    pub fn send_message(&self, message: &Message) -> Result<(), SendError> {
        let mut form = vec![("token", self.token.clone()), ("user", self.user.clone())];
        form.extend(message.form_fields());

        let response = self.client.post(&self.url).form(&form).send()?;

        let status = response.status();
        if status.as_u16() > 399 {
            let body = response.text().unwrap_or_default();
            return Err(SendError::Rejected {
                status: status.as_u16(),
                reason: rejection_reason(&body),
            });
        }

        Ok(())
    }
}

/// Pull the `errors` array out of a Pushover error body, falling back to the raw text
fn rejection_reason(body: &str) -> String {
    match serde_json::from_str::<ApiResponse>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join("; "),
        _ => body.trim().to_string(),
    }
}

/// Truncate string to at most `max_chars` characters, respecting char boundaries
fn truncate_to_char_boundary(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
