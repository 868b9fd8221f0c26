#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::domain::request::LookupRequest;

/// Default REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const API_VERSION: &str = "2022-11-28";

/// Head ref of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadRef {
    #[serde(rename = "ref", default, deserialize_with = "lenient")]
    pub ref_name: Option<String>,
}

/// A pull request entry from `GET /repos/{repo}/pulls`
///
/// Every field is optional; only `number` matters for resolution. A field
/// of the wrong type reads as absent instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub number: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub html_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub head: Option<HeadRef>,
}

impl PullRequest {
    /// Read one list entry; anything that is not an object yields an empty entry
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Errors from the pull request API
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("GitHub API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse pull request list: {0}")]
    Decode(#[source] serde_json::Error),
}

impl From<reqwest::Error> for GithubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(e)
        }
    }
}

/// HTTP settings for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub api_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// User agent string (GitHub rejects requests without one)
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("resolve-pr/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Trait for listing pull requests by head branch
pub trait PullRequestApi {
    /// List pull requests matching the request's head filter and state
    fn list_pulls(&self, request: &LookupRequest) -> Result<Vec<PullRequest>, GithubError>;
}

/// Real implementation of `PullRequestApi` over the GitHub REST API
pub struct RealGithubClient {
    http: reqwest::blocking::Client,
    api_url: String,
}

impl RealGithubClient {
    /// Build a client with the given settings
    pub fn new(config: ClientConfig) -> Result<Self, GithubError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn pulls_url(&self, repo: &str) -> String {
        format!("{}/repos/{repo}/pulls", self.api_url)
    }
}

/// Extract the `message` field GitHub puts in error bodies, or fall back to the raw body
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| body.chars().take(200).collect::<String>().trim().to_string(),
        |parsed| parsed.message,
    )
}

impl PullRequestApi for RealGithubClient {
    fn list_pulls(&self, request: &LookupRequest) -> Result<Vec<PullRequest>, GithubError> {
        let url = self.pulls_url(&request.repo);
        let head = request.head_filter();
        tracing::debug!(%url, %head, state = %request.state, "listing pull requests");

        let response = self
            .http
            .get(&url)
            .query(&[("head", head.as_str()), ("state", request.state.as_str())])
            .bearer_auth(&request.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "API response");

        if !status.is_success() {
            return Err(GithubError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(GithubError::Decode)?;
        Ok(entries.into_iter().map(PullRequest::from_value).collect())
    }
}
