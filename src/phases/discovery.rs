//! Phase 1: Discovery
//!
//! This is the first required phase of a run. It finds every
//! requirement-declaration file that feeds resolution.
//!
//! ## Process
//!
//! 1.  **Core sources**: The working directory itself is checked for each
//!     recognized file name (`requirements.txt`, `pyproject.toml`, ...). The
//!     search is not recursive.
//!
//! 2.  **Extension sources**: Every immediate child of the extensions
//!     directory that is a real directory is checked the same way. Plain
//!     files, cache artifacts such as `__pycache__` and hidden directories
//!     are skipped.
//!
//! Finding nothing is not an error. A missing extensions directory simply
//! contributes no sources. Results are sorted and de-duplicated, so the same
//! tree always yields the same list.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use super::Discovered;
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::requirements::{RequirementSource, Scope};

/// Executes Phase 1 of the pipeline.
pub fn execute(config: &SyncConfig, working_dir: &Path) -> Result<Discovered> {
    if !working_dir.is_dir() {
        return Err(Error::MissingWorkingDir {
            path: working_dir.display().to_string(),
        });
    }

    let core = scan_dir(working_dir, &config.requirement_files, Scope::Core);

    let mut extensions = Vec::new();
    for dir in extension_dirs(&working_dir.join(&config.extensions_dir))? {
        let found = scan_dir(&dir, &config.requirement_files, Scope::Extension);
        if found.is_empty() {
            debug!("No requirement files in extension {}", dir.display());
        }
        extensions.extend(found);
    }

    info!(
        "Discovered {} core and {} extension requirement file(s)",
        core.len(),
        extensions.len()
    );

    Ok(Discovered { core, extensions })
}

/// Recognized requirement files directly inside `dir`, sorted by path.
pub fn scan_dir(dir: &Path, file_names: &[String], scope: Scope) -> Vec<RequirementSource> {
    file_names
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|path| RequirementSource::new(path, scope))
        .collect()
}

/// Immediate child directories of `extensions_root`, sorted.
///
/// Returns an empty list if `extensions_root` does not exist.
pub fn extension_dirs(extensions_root: &Path) -> Result<Vec<PathBuf>> {
    if !extensions_root.is_dir() {
        debug!(
            "Extensions directory {} not found; skipping",
            extensions_root.display()
        );
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(extensions_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() || is_ignored_dir(&entry.file_name().to_string_lossy()) {
            continue;
        }
        dirs.push(path.to_path_buf());
    }

    Ok(dirs)
}

/// Cache artifacts and hidden directories are never extensions.
fn is_ignored_dir(name: &str) -> bool {
    name.starts_with("__") || name.starts_with('.')
}
