//! Aggregate requirements manifest.
//!
//! Writes a top-level requirements file that links every discovered
//! `requirements.txt` with `-r` lines, core first. It is not part of the
//! sync pipeline; `depsync discover --manifest` produces it so the resolver
//! can be run by hand against the same inputs. Sources in other formats
//! (`pyproject.toml`, `setup.py`, ...) cannot be included with `-r` and are
//! listed as comments instead.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::{Discovered, RunContext};
use crate::error::{Error, Result};
use crate::requirements::RequirementSource;
use crate::tool::REQUIREMENT_FLAG;

/// Render the manifest for `sources`, with paths relative to `base`.
pub fn render(sources: &Discovered, base: &Path) -> String {
    let mut out = String::from("# main application dependencies\n");
    push_sources(&mut out, &sources.core, base);
    out.push_str("\n# extension dependencies\n");
    push_sources(&mut out, &sources.extensions, base);
    out
}

fn push_sources(out: &mut String, sources: &[RequirementSource], base: &Path) {
    for source in sources {
        let path = source.tool_arg(base);
        if source.file_name() == Some("requirements.txt") {
            out.push_str(&format!("{} {}\n", REQUIREMENT_FLAG, path));
        } else {
            out.push_str(&format!("# {} (pass to the resolver directly)\n", path));
        }
    }
}

/// Write the manifest to the configured path, replacing any previous one.
pub fn write(ctx: &RunContext<'_>, sources: &Discovered) -> Result<PathBuf> {
    let path = ctx.manifest_path();
    fs::write(&path, render(sources, ctx.working_dir)).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })?;
    info!("Wrote manifest to {}", path.display());
    Ok(path)
}
