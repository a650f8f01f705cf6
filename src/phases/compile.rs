//! Phase 3: Full Compilation
//!
//! Resolves the union of core and extension sources into one fully pinned
//! requirements file, with the override table from Phase 2 taking precedence.
//! Any compiled output from an earlier run is deleted first, so a failed
//! resolution never leaves a stale lock file for the installer to consume.

use std::path::{Path, PathBuf};

use log::info;

use super::overrides::remove_if_exists;
use super::{Discovered, RunContext};
use crate::error::{Error, Result};
use crate::requirements::relative_to;
use crate::tool::{OUTPUT_FLAG, OVERRIDE_FLAG, RESOLVER};

/// Executes Phase 3 of the pipeline.
///
/// Returns the path of the compiled output.
pub fn execute(
    ctx: &RunContext<'_>,
    sources: &Discovered,
    override_file: &Path,
) -> Result<PathBuf> {
    let compiled = ctx.compiled_path();
    remove_if_exists(&compiled)?;

    let mut args: Vec<String> = sources
        .all()
        .map(|s| s.tool_arg(ctx.working_dir))
        .collect();
    args.push(OVERRIDE_FLAG.to_string());
    args.push(tool_path(ctx, override_file));
    args.push(OUTPUT_FLAG.to_string());
    args.push(tool_path(ctx, &compiled));
    args.extend(ctx.extra_index_args());

    info!(
        "Compiling {} requirement file(s) into {}",
        sources.len(),
        ctx.config.compiled_file
    );
    ctx.runner
        .run(RESOLVER, &ctx.config.tools.compile, &args, ctx.working_dir)?;

    if !compiled.is_file() {
        return Err(Error::Filesystem {
            message: format!(
                "Resolver reported success but did not write '{}'",
                compiled.display()
            ),
        });
    }

    Ok(compiled)
}

fn tool_path(ctx: &RunContext<'_>, path: &Path) -> String {
    relative_to(path, ctx.working_dir)
        .to_string_lossy()
        .into_owned()
}
