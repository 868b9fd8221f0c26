//! Configuration schema and type definitions

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::request::PrState;
use crate::integrations::github::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

/// Configuration for resolve-pr
///
/// The API token is never read from configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// REST API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL (GitHub Enterprise uses `https://<host>/api/v3`)
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Request timeout in seconds, at least 1
    #[serde(
        default = "default_timeout_secs",
        deserialize_with = "deserialize_timeout_secs"
    )]
    pub timeout_secs: u64,
    /// Pull request state filter
    #[serde(default)]
    pub state: PrState,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            state: PrState::default(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn deserialize_timeout_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    if secs == 0 {
        return Err(de::Error::invalid_value(
            de::Unexpected::Unsigned(0),
            &"a timeout of at least 1 second",
        ));
    }
    Ok(secs)
}

/// How the resolved number is printed
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare number followed by a newline
    #[default]
    Plain,
    /// Single-line JSON object
    Json,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Also append `pr_number=<n>` to `$GITHUB_OUTPUT`
    #[serde(default)]
    pub github_output: bool,
}

/// Failure handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BehaviorConfig {
    /// Exit non-zero on API or output failures instead of staying silent
    #[serde(default)]
    pub strict: bool,
}

/// Template for global configuration file
const TEMPLATE_GLOBAL: &str = r#"# resolve-pr global configuration
# Location: ~/.config/resolve-pr/config.toml
#
# Settings here apply to every repository.
# A .resolve-pr.toml in the working directory overrides these values.
# Environment variables and command-line flags override both.
# The API token is only read from GITHUB_TOKEN or --token.

[api]
# REST API base URL (GITHUB_API_URL overrides this)
url = "https://api.github.com"
# Request timeout in seconds
timeout_secs = 10
# Pull request state to search: "open", "closed" or "all"
state = "open"

[output]
# "plain" prints the bare number, "json" prints an object
format = "plain"
# Append pr_number=<n> to the file named by GITHUB_OUTPUT
github_output = false

[behavior]
# Fail the step when the API call fails instead of printing nothing
strict = false
"#;

/// Template for local configuration file
const TEMPLATE_LOCAL: &str = r#"# resolve-pr project configuration
# Location: .resolve-pr.toml (working directory)
#
# Overrides the global config. Uncomment what this project needs.

# [api]
# url = "https://github.example.com/api/v3"
# state = "open"

# [output]
# github_output = true
"#;

impl Config {
    /// Get the global configuration template
    #[must_use]
    pub const fn template_global() -> &'static str {
        TEMPLATE_GLOBAL
    }

    /// Get the local configuration template
    #[must_use]
    pub const fn template_local() -> &'static str {
        TEMPLATE_LOCAL
    }
}
