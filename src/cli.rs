// CommandFactory is used by tests via Cli::command()
#[allow(unused_imports)]
use clap::CommandFactory;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

use crate::color::ColorMode;
use crate::config::OutputFormat;
use crate::domain::request::PrState;

/// Resolve the pull request number for a branch in CI
///
/// Prints the number on stdout, or nothing when no pull request is found.
/// Exits 0 in both cases unless --strict is given.
///
/// Flags given before a subcommand are rejected; pass them after it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, value_name = "WHEN", global = true, ignore_case = true)]
    pub color: Option<ColorMode>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub resolve: ResolveArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the pull request number (same as running without a subcommand)
    Resolve(ResolveArgs),
    /// Initialize configuration files (creates both global and local configs by default)
    Init {
        /// Generate only global config
        #[arg(long, conflicts_with = "local")]
        global: bool,
        /// Generate only local config
        #[arg(long, conflicts_with = "global")]
        local: bool,
        /// Overwrite existing config files
        #[arg(short, long)]
        force: bool,
    },
}

/// Inputs for a resolution; flags win over environment variables
#[derive(Args, Clone, Default)]
pub struct ResolveArgs {
    /// Branch name, refs/heads/<name>, or refs/pull/<n>/merge
    #[arg(long, env = "BRANCH_REF", value_name = "REF")]
    pub branch: Option<String>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Owner of the head branch (defaults to the repository owner)
    #[arg(long, env = "GITHUB_REPOSITORY_OWNER", value_name = "OWNER")]
    pub owner: Option<String>,

    /// API token sent as a bearer token
    #[arg(long, env = "GITHUB_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Pull request state to search
    #[arg(long, value_enum)]
    pub state: Option<PrState>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Step output file to append pr_number=<n> to (needs --write-output)
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH", hide_env_values = true)]
    pub github_output: Option<PathBuf>,

    /// Append pr_number=<n> to the step output file
    #[arg(long)]
    pub write_output: bool,

    /// Exit non-zero when the API call or output write fails
    #[arg(long)]
    pub strict: bool,
}

impl fmt::Debug for ResolveArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveArgs")
            .field("branch", &self.branch)
            .field("repo", &self.repo)
            .field("owner", &self.owner)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("state", &self.state)
            .field("timeout", &self.timeout)
            .field("format", &self.format)
            .field("github_output", &self.github_output)
            .field("write_output", &self.write_output)
            .field("strict", &self.strict)
            .finish()
    }
}
