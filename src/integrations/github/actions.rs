//! GitHub Actions step output file

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Append a `key=value` line to the step output file
///
/// # Errors
/// Returns an error if the file cannot be opened or written
pub fn append_output(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output file: {}", path.display()))?;

    writeln!(file, "{key}={value}")
        .with_context(|| format!("Failed to write step output file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_output_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");

        append_output(&path, "pr_number", "42").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pr_number=42\n");
    }

    #[test]
    fn test_append_output_keeps_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "other=1\n").unwrap();

        append_output(&path, "pr_number", "7").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "other=1\npr_number=7\n"
        );
    }

    #[test]
    fn test_append_output_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output");

        let err = append_output(&path, "pr_number", "1").unwrap_err();
        assert!(err.to_string().contains("Failed to open step output file"));
    }
}
