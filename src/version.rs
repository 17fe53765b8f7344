use anyhow::Result;
use std::{path::Path, process::Command};

/// Ask the surrounding version-control tooling to describe the base path.
/// The result is opaque; a tree without tags yields an empty string. Failure
/// to spawn git at all is fatal and propagates.
pub fn describe(base: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(["describe", "--tags"])
        .current_dir(base)
        .output()?;

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
