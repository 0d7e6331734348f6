// ABOUTME: Blocking HTTP client for the Quip REST API
// ABOUTME: Handles auth headers, rate-limit headers, and fail-fast errors

use crate::{CurrentUser, Error, FolderResponse, RateLimit, Result, ThreadResponse};
use reqwest::blocking::{Client, Response};
use std::time::Duration;

fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        return s.to_string();
    }

    // Find a valid UTF-8 boundary at or before max_chars
    let mut boundary = max_chars;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    if boundary == 0 {
        return String::new();
    }

    format!("{}...", &s[..boundary])
}

fn header_value<T: std::str::FromStr>(response: &Response, name: &str) -> Option<T> {
    response.headers().get(name)?.to_str().ok()?.trim().parse().ok()
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(token: String, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(ApiClient {
            client,
            base_url: base_url.unwrap_or_else(|| "https://platform.quip.com".into()),
            token,
        })
    }

    fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .header("User-Agent", "quipex/0.1 (Rust)")
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 | 403 => Err(Error::Auth(format!(
                "API rejected token on {} ({})",
                endpoint, status
            ))),
            404 => Err(Error::NotFound {
                endpoint: endpoint.into(),
            }),
            429 => Err(Error::RateLimited {
                endpoint: endpoint.into(),
                retry_after_secs: header_value(&response, "Retry-After").unwrap_or(60),
            }),
            code => {
                let message = truncate_str(&response.text().unwrap_or_default(), 100);
                Err(Error::Api {
                    endpoint: endpoint.into(),
                    status: code,
                    message,
                })
            }
        }
    }

    fn parse_body<T: serde::de::DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            eprintln!("Failed to parse response from {}: {}", endpoint, e);
            eprintln!(
                "Response body (first 500 chars): {}",
                truncate_str(body, 500)
            );
            Error::Protocol(e)
        })
    }

    pub fn current_user(&self) -> Result<CurrentUser> {
        let endpoint = "/1/users/current";
        let body = self.get(endpoint)?.text()?;
        Self::parse_body(endpoint, &body)
    }

    pub fn get_folder(&self, folder_id: &str) -> Result<FolderResponse> {
        let endpoint = format!("/1/folders/{}", folder_id);
        let body = self.get(&endpoint)?.text()?;
        Self::parse_body(&endpoint, &body)
    }

    /// Thread metadata plus the rate-limit headers from the same response,
    /// so the caller can decide whether to pause before the next request.
    pub fn get_thread(&self, thread_id: &str) -> Result<(ThreadResponse, RateLimit)> {
        let endpoint = format!("/2/threads/{}", thread_id);
        let response = self.get(&endpoint)?;

        let rate_limit = RateLimit {
            remaining: header_value(&response, "X-RateLimit-Remaining"),
            retry_after_secs: header_value(&response, "Retry-After"),
        };

        let body = response.text()?;
        let thread = Self::parse_body(&endpoint, &body)?;
        Ok((thread, rate_limit))
    }
}
