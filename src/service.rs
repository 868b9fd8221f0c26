#![allow(clippy::missing_errors_doc)]
use serde::Serialize;

use crate::domain::request::Target;
use crate::integrations::github::{GithubError, PullRequest, PullRequestApi};

/// A resolved pull request, as printed in JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPr {
    pub number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
}

impl ResolvedPr {
    /// Build from an API entry; `None` when the entry has no usable number
    pub fn from_pull(pull: PullRequest) -> Option<Self> {
        let number = pull.number.filter(|n| *n > 0)?;
        Some(Self {
            number,
            title: pull.title,
            url: pull.html_url,
            head: pull.head.and_then(|h| h.ref_name),
        })
    }

    pub const fn known(number: u64) -> Self {
        Self {
            number,
            title: None,
            url: None,
            head: None,
        }
    }
}

/// Resolves pull request numbers through a `PullRequestApi`
pub struct PrResolver<A>
where
    A: PullRequestApi,
{
    api: A,
}

impl<A> PrResolver<A>
where
    A: PullRequestApi,
{
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Resolve a target to its pull request
    ///
    /// Known numbers are returned without calling the API. For lookups the
    /// first entry of the list wins; an empty list or a first entry without
    /// a positive number resolves to `None`.
    pub fn resolve(&self, target: &Target) -> Result<Option<ResolvedPr>, GithubError> {
        let request = match target {
            Target::Known(number) => {
                tracing::info!(number, "pull request number taken from ref");
                return Ok(Some(ResolvedPr::known(*number)));
            }
            Target::Lookup(request) => request,
        };

        let pulls = self.api.list_pulls(request)?;
        tracing::info!(
            count = pulls.len(),
            head = %request.head_filter(),
            "pull requests matched"
        );

        Ok(pulls.into_iter().next().and_then(ResolvedPr::from_pull))
    }
}
