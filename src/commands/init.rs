//! Init command - Initialize configuration files

use anyhow::{Context, Result};
use std::path::Path;

use crate::color;
use crate::config;

/// Write config file if it doesn't exist (or force overwrite)
fn write_config_if_needed(
    path: &Path,
    template: &str,
    force: bool,
    label: &str,
    color_mode: color::ColorMode,
) -> Result<()> {
    if path.exists() && !force {
        eprintln!(
            "{}",
            color::warn(
                color_mode,
                format!("{label} config already exists: {}", path.display())
            )
        );
        eprintln!("Use --force to overwrite");
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    std::fs::write(path, template)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!("Created {label} config: {}", path.display())
        )
    );
    Ok(())
}

/// Initialize configuration files
///
/// # Errors
/// Returns an error if:
/// - Global config path cannot be determined
/// - File write fails
pub fn cmd_init(
    scope_global: bool,
    scope_local: bool,
    force: bool,
    color_mode: color::ColorMode,
) -> Result<()> {
    // Default (no flags): create both configs
    let generate_global = scope_global || !scope_local;
    let generate_local = scope_local || !scope_global;

    if generate_global {
        let Some(path) = config::Config::global_config_path() else {
            anyhow::bail!(
                "Could not determine global config path (HOME directory not found). \
                 Please set the HOME environment variable or XDG_CONFIG_HOME."
            );
        };
        write_config_if_needed(
            &path,
            config::Config::template_global(),
            force,
            "Global",
            color_mode,
        )?;
    }

    if generate_local {
        write_config_if_needed(
            &config::Config::local_config_path(),
            config::Config::template_local(),
            force,
            "Local",
            color_mode,
        )?;
    }

    Ok(())
}
