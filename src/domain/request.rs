//! Resolution inputs and their validation
//!
//! CI hands the tool a handful of loosely-typed strings. This module turns
//! them into a [`Target`]: either a pull request number that is already known
//! from the ref itself, or a [`LookupRequest`] that needs one API call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::integrations::github::BranchRef;

/// Pull request state filter sent to the API
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    #[default]
    Open,
    Closed,
    All,
}

impl PrState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for PrState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw inputs collected from flags, environment and config
#[derive(Clone, Default)]
pub struct ResolveInputs {
    pub branch: Option<String>,
    pub repo: Option<String>,
    pub owner: Option<String>,
    pub token: Option<String>,
    pub state: PrState,
}

impl fmt::Debug for ResolveInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveInputs")
            .field("branch", &self.branch)
            .field("repo", &self.repo)
            .field("owner", &self.owner)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("state", &self.state)
            .finish()
    }
}

/// A single API lookup for open pull requests whose head is `owner:branch`
#[derive(Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub repo: String,
    pub owner: String,
    pub branch: String,
    pub token: String,
    pub state: PrState,
}

impl LookupRequest {
    /// Value for the `head` query parameter
    #[must_use]
    pub fn head_filter(&self) -> String {
        format!("{}:{}", self.owner, self.branch)
    }
}

impl fmt::Debug for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupRequest")
            .field("repo", &self.repo)
            .field("owner", &self.owner)
            .field("branch", &self.branch)
            .field("token", &"<redacted>")
            .field("state", &self.state)
            .finish()
    }
}

/// What the resolver has to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The ref already names the pull request
    Known(u64),
    /// The number must be looked up through the API
    Lookup(LookupRequest),
}

/// Required inputs that were absent or blank
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required input(s): {}", .0.join(", "))]
pub struct MissingInputs(pub Vec<&'static str>);

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Owner part of an `owner/name` repository slug
fn repo_owner(repo: &str) -> Option<&str> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Some(owner)
        }
        _ => None,
    }
}

impl ResolveInputs {
    /// Validate inputs into a resolution target
    ///
    /// A `refs/pull/<n>/...` branch needs nothing else. Otherwise branch,
    /// repository (`owner/name`) and token are required; the owner falls back
    /// to the repository's owner when not given.
    ///
    /// # Errors
    /// Returns [`MissingInputs`] naming every input that is absent or blank.
    pub fn validate(&self) -> Result<Target, MissingInputs> {
        let branch = non_blank(self.branch.as_deref()).and_then(BranchRef::parse);

        let branch = match branch {
            Some(BranchRef::PullRequest(number)) => return Ok(Target::Known(number)),
            Some(BranchRef::Branch(name)) => Some(name),
            None => None,
        };

        let repo = non_blank(self.repo.as_deref()).filter(|r| repo_owner(r).is_some());
        let owner = non_blank(self.owner.as_deref()).or_else(|| repo.and_then(repo_owner));
        let token = non_blank(self.token.as_deref());

        let mut missing = Vec::new();
        if branch.is_none() {
            missing.push("branch");
        }
        if repo.is_none() {
            missing.push("repository");
        }
        if owner.is_none() {
            missing.push("owner");
        }
        if token.is_none() {
            missing.push("token");
        }

        match (branch, repo, owner, token) {
            (Some(branch), Some(repo), Some(owner), Some(token)) => {
                Ok(Target::Lookup(LookupRequest {
                    repo: repo.to_string(),
                    owner: owner.to_string(),
                    branch,
                    token: token.to_string(),
                    state: self.state,
                }))
            }
            _ => Err(MissingInputs(missing)),
        }
    }
}
