#![allow(clippy::must_use_candidate)]
/// Represents the kind of branch reference handed to the tool by CI
#[derive(Debug, PartialEq, Eq)]
pub enum BranchRef {
    /// Pull request ref (e.g., "refs/pull/123/merge"), number known without a lookup
    PullRequest(u64),
    /// Branch name with any `refs/heads/` prefix removed
    Branch(String),
}

impl BranchRef {
    /// Parse a branch reference string into a `BranchRef`
    ///
    /// Recognizes `refs/pull/<n>/merge` and `refs/pull/<n>/head` as pull request refs.
    /// Strips `refs/heads/` from full branch refs.
    /// Everything else is treated as a plain branch name.
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(rest) = input.strip_prefix("refs/pull/") {
            if let Some((number, suffix)) = rest.split_once('/') {
                if matches!(suffix, "merge" | "head") {
                    if let Ok(number) = number.parse::<u64>() {
                        if number > 0 {
                            return Some(Self::PullRequest(number));
                        }
                    }
                }
            }
        }

        let branch = input.strip_prefix("refs/heads/").unwrap_or(input);
        if branch.is_empty() {
            return None;
        }
        Some(Self::Branch(branch.to_string()))
    }
}
