//! Orchestrator for a complete synchronization run
//!
//! This module chains the phases into the run the CLI and library expose.
//! Each phase's output is the next phase's input, so they run strictly in
//! sequence and the first error aborts everything after it.

use log::{info, warn};

use super::{bootstrap, compile, discovery, install, overrides, postprocess};
use super::{RunContext, SyncReport};
use crate::error::Result;

/// How far a run should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Stop after post-processing; leave the environment untouched.
    Compile,
    /// Run every phase, including installation.
    Install,
}

/// Execute the pipeline up to and including `stage`.
///
/// 1. Discover requirement sources
/// 2. Install vendor bootstrap requirements (phase 0, only when installing)
/// 3. Build the override table from the core sources
/// 4. Compile all sources under the override table
/// 5. Remove mutually exclusive package variants
/// 6. Install the compiled output
///
/// Bootstrap runs after discovery so that a tree with nothing to resolve
/// leaves the environment untouched. If discovery finds nothing at all, the
/// run stops there: syncing an empty lock would uninstall everything.
pub fn execute(ctx: &RunContext<'_>, stage: Stage) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    // Phase 1: Discovery
    report.sources = discovery::execute(ctx.config, ctx.working_dir)?;
    if report.sources.is_empty() {
        warn!(
            "No requirement files found in {}; nothing to do",
            ctx.working_dir.display()
        );
        return Ok(report);
    }

    // Phase 0: Vendor Bootstrap
    if stage == Stage::Install {
        report.bootstrapped = bootstrap::execute(ctx)?;
    }

    // Phase 2: Override Computation
    let override_file = overrides::execute(ctx, &report.sources.core)?;
    report.override_file = Some(override_file.clone());

    // Phase 3: Full Compilation
    let compiled = compile::execute(ctx, &report.sources, &override_file)?;
    report.compiled_file = Some(compiled.clone());

    // Phase 4: Post-processing
    report.removed = postprocess::execute(&compiled, &ctx.config.exclusive)?;

    // Phase 5: Installation
    if stage == Stage::Install {
        install::execute(ctx, &compiled)?;
        report.installed = Some(ctx.config.install_mode);
        info!("Environment synchronized");
    }

    Ok(report)
}
