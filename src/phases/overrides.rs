//! Phase 2: Override Computation
//!
//! This phase builds the override table that makes core-declared versions win
//! during full resolution.
//!
//! ## Process
//!
//! 1.  **Reset**: Any override file left by a previous run is deleted.
//!
//! 2.  **Vendor block**: If a GPU vendor is selected, a header is written that
//!     points the accelerator packages at the vendor's index.
//!
//! 3.  **Core compile**: The resolver runs over the core sources alone. Its
//!     stdout (the pinned core set) is captured; no output file is written.
//!     A failing resolver aborts the run here.
//!
//! 4.  **Append**: The precedence marker and the pinned core set are appended.
//!
//! Extensions are free to add packages the core does not mention, but any
//! package the core pins is forced to the core's version.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::RunContext;
use crate::config::VendorSettings;
use crate::defaults::CORE_PRECEDENCE_MARKER;
use crate::error::{Error, Result};
use crate::requirements::RequirementSource;
use crate::tool::{EXTRA_INDEX_FLAG, RESOLVER};
use crate::vendor::GpuVendor;

/// Executes Phase 2 of the pipeline.
///
/// Returns the path of the written override file.
pub fn execute(ctx: &RunContext<'_>, core: &[RequirementSource]) -> Result<PathBuf> {
    let path = ctx.override_path();
    remove_if_exists(&path)?;

    if let Some(settings) = ctx.vendor_settings() {
        write_file(&path, &vendor_block(ctx.vendor, settings))?;
    }

    let pinned = if core.is_empty() {
        warn!("No core requirement files found; override table has no core pins");
        String::new()
    } else {
        let mut args: Vec<String> = core.iter().map(|s| s.tool_arg(ctx.working_dir)).collect();
        args.extend(ctx.extra_index_args());
        ctx.runner
            .run(RESOLVER, &ctx.config.tools.compile, &args, ctx.working_dir)?
            .stdout
    };

    append_file(&path, &core_block(&pinned))?;
    info!("Wrote override table to {}", path.display());

    Ok(path)
}

/// Header forcing the vendor's accelerator packages onto its index.
pub fn vendor_block(vendor: GpuVendor, settings: &VendorSettings) -> String {
    let mut block = format!(
        "# {} accelerator packages resolve from the vendor index\n{} {}\n",
        vendor, EXTRA_INDEX_FLAG, settings.index_url
    );
    for package in &settings.packages {
        block.push_str(package);
        block.push('\n');
    }
    block.push('\n');
    block
}

/// Precedence marker followed by the pinned core set, newline-terminated.
pub fn core_block(pinned: &str) -> String {
    let mut block = format!("{}\n", CORE_PRECEDENCE_MARKER);
    block.push_str(pinned);
    if !block.ends_with('\n') {
        block.push('\n');
    }
    block
}

pub(crate) fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Filesystem {
            message: format!("Failed to remove '{}': {}", path.display(), e),
        }),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })
}

fn append_file(path: &Path, content: &str) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|e| Error::Filesystem {
            message: format!("Failed to append to '{}': {}", path.display(), e),
        })
}
