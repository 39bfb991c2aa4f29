//! Example-usage synthesis from the tool binary's `--toolhelp` output.
//!
//! Best effort: the help text is free-form and the fixup table only knows
//! the tools someone has looked at. The result is documentation, never run.

pub mod fixups;

use anyhow::{bail, Context, Result};
use fixups::FixupTable;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Ask the binary for a tool's help text.
pub fn tool_help(exe: &Path, tool: &str) -> Result<String> {
    let output = Command::new(exe)
        .arg(format!("--toolhelp={}", tool))
        .output()
        .with_context(|| format!("failed to run {}", exe.display()))?;
    if !output.status.success() {
        bail!(
            "{} --toolhelp={} exited with {}",
            exe.display(),
            tool,
            output.status
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// The command after the first `>>` following `usage:`.
pub fn extract_usage(help: &str) -> Option<&str> {
    let start = help.find("usage:")? + "usage:".len();
    help[start..].split(">>").nth(1).map(str::trim)
}

/// Build an R call to `wrapper` from help text, applying the fixups for `tool`.
pub fn synthesize(tool: &str, wrapper: &str, help: &str, table: &FixupTable) -> Result<String> {
    let usage = extract_usage(help)
        .with_context(|| format!("no example usage in help text for {}", tool))?;
    let fixed = table.apply(tool, usage);
    debug!(tool, usage, fixed = %fixed, "example usage");
    Ok(build_call(wrapper, &fixed))
}

/// `./whitebox_tools -r=Slope --dem=DEM.tif --zfactor=1.0`
/// → `wbt_slope(dem="DEM.tif", zfactor=1.0, verbose_mode=TRUE)`
pub fn build_call(wrapper: &str, command: &str) -> String {
    let mut call = format!("{}(", wrapper);
    for item in command.split("--").map(str::trim) {
        // the binary path and tool selector, and the working directory
        if item.contains("-r=") || item.contains("wd=") {
            continue;
        }
        let mut parts = item.split('=');
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let value = value.replace('\'', "\"");
        let value = if value.parse::<f64>().is_ok() {
            value
        } else {
            format!("\"{}\"", value.replace('"', ""))
        };
        call.push_str(&format!("{}={}, ", key, value));
    }
    call.push_str("verbose_mode=TRUE)");
    call
}
