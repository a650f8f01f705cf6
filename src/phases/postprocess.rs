//! Phase 4: Post-processing
//!
//! Some packages ship in mutually exclusive variants that install the same
//! module, e.g. `opencv-python` (GUI) and `opencv-python-headless`. When the
//! compiled output contains both members of a configured pair, the lines
//! declaring the `drop` variant are removed. Everything else is kept verbatim
//! and in order, including line endings.
//!
//! A pair is only acted on when *both* variants are present. If only one is
//! present the file is left byte-for-byte untouched.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::config::ExclusivePair;
use crate::error::{Error, Result};
use crate::requirements::{normalize_name, RequirementLineParser};

/// Executes Phase 4 of the pipeline.
///
/// Returns the removed requirement lines, trimmed.
pub fn execute(compiled: &Path, pairs: &[ExclusivePair]) -> Result<Vec<String>> {
    let content = fs::read_to_string(compiled).map_err(|e| Error::Filesystem {
        message: format!("Failed to read '{}': {}", compiled.display(), e),
    })?;

    let (rewritten, removed) = remove_exclusive(&content, pairs)?;
    if removed.is_empty() {
        return Ok(removed);
    }

    fs::write(compiled, rewritten).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", compiled.display(), e),
    })?;
    for line in &removed {
        info!("Removed conflicting requirement: {}", line);
    }

    Ok(removed)
}

/// Apply every pair to `content` in order.
///
/// Returns the new content and the removed lines. When nothing is removed the
/// returned content equals the input.
pub fn remove_exclusive(content: &str, pairs: &[ExclusivePair]) -> Result<(String, Vec<String>)> {
    let parser = RequirementLineParser::new()?;
    let mut lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut removed = Vec::new();

    for pair in pairs {
        let keep = normalize_name(&pair.keep);
        let drop = normalize_name(&pair.drop);

        let mut keep_found = false;
        let mut drop_found = false;
        for line in &lines {
            match parser.package_name(line) {
                Some(name) if name == keep => keep_found = true,
                Some(name) if name == drop => drop_found = true,
                _ => {}
            }
        }

        if !(keep_found && drop_found) {
            if drop_found {
                warn!(
                    "{} is pinned without {}; leaving it in place",
                    pair.drop, pair.keep
                );
            }
            continue;
        }

        lines.retain(|line| {
            if parser.package_name(line).as_deref() == Some(drop.as_str()) {
                removed.push(line.trim().to_string());
                false
            } else {
                true
            }
        });
    }

    Ok((lines.concat(), removed))
}
