#![allow(clippy::must_use_candidate)]
pub mod actions;
pub mod client;
mod input;

pub use client::{
    ClientConfig, GithubError, PullRequest, PullRequestApi, RealGithubClient, DEFAULT_API_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use input::BranchRef;

/// Step output key written for downstream jobs
pub const OUTPUT_KEY: &str = "pr_number";
