//! Resolve command - Look up and print the pull request number

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::ResolveArgs;
use crate::color;
use crate::config::{Config, OutputFormat};
use crate::domain::request::{ResolveInputs, Target};
use crate::integrations::github::{
    actions, ClientConfig, PullRequestApi, RealGithubClient, OUTPUT_KEY,
};
use crate::service::{PrResolver, ResolvedPr};

/// Effective settings after layering flags and environment over config
#[derive(Debug, Clone)]
pub struct ResolveSettings {
    pub inputs: ResolveInputs,
    pub client: ClientConfig,
    pub format: OutputFormat,
    /// Step output file, set only when writing it is enabled
    pub output_file: Option<PathBuf>,
    pub strict: bool,
    /// Print a human summary on stderr
    pub announce: bool,
}

impl ResolveSettings {
    /// Merge command-line/environment values over the loaded config
    #[must_use]
    pub fn merge(args: &ResolveArgs, config: &Config, announce: bool) -> Self {
        let write_output = args.write_output || config.output.github_output;

        Self {
            inputs: ResolveInputs {
                branch: args.branch.clone(),
                repo: args.repo.clone(),
                owner: args.owner.clone(),
                token: args.token.clone(),
                state: args.state.unwrap_or(config.api.state),
            },
            client: ClientConfig {
                api_url: args
                    .api_url
                    .clone()
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or_else(|| config.api.url.clone()),
                timeout: Duration::from_secs(args.timeout.unwrap_or(config.api.timeout_secs)),
                ..ClientConfig::default()
            },
            format: args.format.unwrap_or(config.output.format),
            output_file: args.github_output.clone().filter(|_| write_output),
            strict: args.strict || config.behavior.strict,
            announce,
        }
    }
}

/// Resolve the pull request for the configured branch and print its number
///
/// # Errors
/// Only fails in strict mode, when the API call, the config file or an
/// output write fails.
pub fn cmd_resolve(args: &ResolveArgs, announce: bool, color_mode: color::ColorMode) -> Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) if !args.strict => {
            tracing::warn!("{err:#}; using defaults");
            Config::default()
        }
        Err(err) => return Err(err),
    };

    let settings = ResolveSettings::merge(args, &config, announce);
    tracing::debug!(?settings, "resolve settings");

    let target = match settings.inputs.validate() {
        Ok(target) => target,
        Err(missing) => {
            tracing::info!("{missing}; nothing to resolve");
            return Ok(());
        }
    };

    let client = match RealGithubClient::new(settings.client.clone()) {
        Ok(client) => client,
        Err(err) if settings.strict => {
            return Err(err).context("Failed to set up the API client");
        }
        Err(err) => {
            tracing::warn!("{err}");
            return Ok(());
        }
    };

    let stdout = std::io::stdout();
    resolve_and_report(client, &target, &settings, &mut stdout.lock(), color_mode)
}

/// Resolve `target` through `api` and write the result to `out`
///
/// # Errors
/// Returns an error in strict mode when the lookup, the write to `out` or
/// the step output write fails.
pub fn resolve_and_report<A: PullRequestApi, W: Write>(
    api: A,
    target: &Target,
    settings: &ResolveSettings,
    out: &mut W,
    color_mode: color::ColorMode,
) -> Result<()> {
    let resolved = match PrResolver::new(api).resolve(target) {
        Ok(Some(resolved)) => resolved,
        Ok(None) => {
            tracing::info!("no pull request found");
            if settings.announce {
                eprintln!("{}", color::info(color_mode, "No pull request found"));
            }
            return Ok(());
        }
        Err(err) if settings.strict => {
            return Err(err).context("Failed to list pull requests");
        }
        Err(err) => {
            tracing::warn!("{err}");
            return Ok(());
        }
    };

    if let Err(err) = print_resolved(&resolved, settings.format, out) {
        if settings.strict {
            return Err(err);
        }
        tracing::warn!("{err:#}");
        return Ok(());
    }

    if let Some(path) = &settings.output_file {
        if let Err(err) = actions::append_output(path, OUTPUT_KEY, &resolved.number.to_string()) {
            if settings.strict {
                return Err(err);
            }
            tracing::warn!("{err:#}");
        }
    }

    if settings.announce {
        let title = resolved.title.as_deref().unwrap_or_default();
        eprintln!(
            "{} {}",
            color::success(
                color_mode,
                format!("Resolved {}", color_mode.colorize_number(resolved.number))
            ),
            color::dim(color_mode, title)
        );
    }

    Ok(())
}

fn print_resolved<W: Write>(resolved: &ResolvedPr, format: OutputFormat, out: &mut W) -> Result<()> {
    let written = match format {
        OutputFormat::Plain => writeln!(out, "{}", resolved.number),
        OutputFormat::Json => {
            let json = serde_json::to_string(resolved)?;
            writeln!(out, "{json}")
        }
    };
    written.context("Failed to write to stdout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::{LookupRequest, PrState};
    use crate::integrations::github::client::tests::MockPullRequestApi;
    use crate::integrations::github::client::HeadRef;
    use crate::integrations::github::PullRequest;

    fn settings() -> ResolveSettings {
        ResolveSettings::merge(&ResolveArgs::default(), &Config::default(), false)
    }

    fn lookup() -> Target {
        Target::Lookup(LookupRequest {
            repo: "octo/app".to_string(),
            owner: "octo".to_string(),
            branch: "feature".to_string(),
            token: "secret".to_string(),
            state: PrState::Open,
        })
    }

    fn pull(number: u64) -> PullRequest {
        PullRequest {
            number: Some(number),
            title: Some("Add feature".to_string()),
            html_url: Some(format!("https://github.com/octo/app/pull/{number}")),
            state: Some("open".to_string()),
            head: Some(HeadRef {
                ref_name: Some("feature".to_string()),
            }),
        }
    }

    fn run(api: MockPullRequestApi, settings: &ResolveSettings) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = resolve_and_report(api, &lookup(), settings, &mut out, color::ColorMode::Never);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_merge_defaults() {
        let settings = settings();
        assert_eq!(settings.client.api_url, "https://api.github.com");
        assert_eq!(settings.client.timeout, Duration::from_secs(10));
        assert_eq!(settings.inputs.state, PrState::Open);
        assert_eq!(settings.format, OutputFormat::Plain);
        assert!(settings.output_file.is_none());
        assert!(!settings.strict);
    }

    #[test]
    fn test_merge_flags_override_config() {
        let mut config = Config::default();
        config.api.state = PrState::Closed;
        config.api.url = "https://ghe.example.com/api/v3".to_string();
        config.api.timeout_secs = 30;

        let args = ResolveArgs {
            state: Some(PrState::All),
            api_url: Some("https://other.example.com".to_string()),
            timeout: Some(2),
            format: Some(OutputFormat::Json),
            strict: true,
            ..ResolveArgs::default()
        };
        let settings = ResolveSettings::merge(&args, &config, false);
        assert_eq!(settings.inputs.state, PrState::All);
        assert_eq!(settings.client.api_url, "https://other.example.com");
        assert_eq!(settings.client.timeout, Duration::from_secs(2));
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.strict);
    }

    #[test]
    fn test_merge_blank_api_url_uses_config() {
        let args = ResolveArgs {
            api_url: Some(String::new()),
            ..ResolveArgs::default()
        };
        let settings = ResolveSettings::merge(&args, &Config::default(), false);
        assert_eq!(settings.client.api_url, "https://api.github.com");
    }

    #[test]
    fn test_merge_output_file_requires_enable() {
        let args = ResolveArgs {
            github_output: Some(PathBuf::from("/tmp/out")),
            ..ResolveArgs::default()
        };
        assert!(ResolveSettings::merge(&args, &Config::default(), false)
            .output_file
            .is_none());

        let mut config = Config::default();
        config.output.github_output = true;
        assert_eq!(
            ResolveSettings::merge(&args, &config, false).output_file,
            Some(PathBuf::from("/tmp/out"))
        );

        let enabled = ResolveArgs {
            write_output: true,
            ..args
        };
        assert!(ResolveSettings::merge(&enabled, &Config::default(), false)
            .output_file
            .is_some());
    }

    #[test]
    fn test_prints_plain_number() {
        let api = MockPullRequestApi::new().with_pulls(vec![pull(42), pull(7)]);
        let (result, out) = run(api, &settings());
        result.unwrap();
        assert_eq!(out, "42\n");
    }

    #[test]
    fn test_prints_json() {
        let api = MockPullRequestApi::new().with_pulls(vec![pull(42)]);
        let settings = ResolveSettings {
            format: OutputFormat::Json,
            ..settings()
        };
        let (result, out) = run(api, &settings);
        result.unwrap();

        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["number"], 42);
        assert_eq!(value["title"], "Add feature");
        assert_eq!(value["url"], "https://github.com/octo/app/pull/42");
        assert_eq!(value["head"], "feature");
    }

    #[test]
    fn test_empty_list_prints_nothing() {
        let api = MockPullRequestApi::new().with_pulls(vec![]);
        let (result, out) = run(api, &settings());
        result.unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_api_error_swallowed() {
        let api = MockPullRequestApi::new().with_status(500, "boom");
        let (result, out) = run(api, &settings());
        result.unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_api_error_fails_in_strict_mode() {
        let api = MockPullRequestApi::new().with_status(500, "boom");
        let settings = ResolveSettings {
            strict: true,
            ..settings()
        };
        let (result, out) = run(api, &settings);
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to list pull requests"));
        assert!(format!("{err:#}").contains("boom"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_writes_step_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        let settings = ResolveSettings {
            output_file: Some(path.clone()),
            ..settings()
        };

        let api = MockPullRequestApi::new().with_pulls(vec![pull(42)]);
        let (result, out) = run(api, &settings);
        result.unwrap();
        assert_eq!(out, "42\n");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "pr_number=42\n");
    }

    #[test]
    fn test_step_output_failure_swallowed_unless_strict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output");
        let lenient = ResolveSettings {
            output_file: Some(path),
            ..settings()
        };

        let api = MockPullRequestApi::new().with_pulls(vec![pull(42)]);
        let (result, out) = run(api, &lenient);
        result.unwrap();
        assert_eq!(out, "42\n");

        let strict = ResolveSettings {
            strict: true,
            ..lenient
        };
        let api = MockPullRequestApi::new().with_pulls(vec![pull(42)]);
        let (result, _) = run(api, &strict);
        assert!(result.is_err());
    }

    /// Writer whose reader has gone away
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stdout_failure_swallowed_unless_strict() {
        let api = MockPullRequestApi::new().with_pulls(vec![pull(42)]);
        resolve_and_report(
            api,
            &lookup(),
            &settings(),
            &mut ClosedPipe,
            color::ColorMode::Never,
        )
        .unwrap();

        let strict = ResolveSettings {
            strict: true,
            ..settings()
        };
        let api = MockPullRequestApi::new().with_pulls(vec![pull(42)]);
        let err = resolve_and_report(api, &lookup(), &strict, &mut ClosedPipe, color::ColorMode::Never)
            .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to write to stdout"));
    }

    #[test]
    fn test_stdout_failure_skips_step_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        let settings = ResolveSettings {
            output_file: Some(path.clone()),
            ..settings()
        };

        let api = MockPullRequestApi::new().with_pulls(vec![pull(42)]);
        resolve_and_report(api, &lookup(), &settings, &mut ClosedPipe, color::ColorMode::Never)
            .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_known_number_skips_api() {
        let api = MockPullRequestApi::new();
        let mut out = Vec::new();
        resolve_and_report(
            api,
            &Target::Known(99),
            &settings(),
            &mut out,
            color::ColorMode::Never,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "99\n");
    }
}
