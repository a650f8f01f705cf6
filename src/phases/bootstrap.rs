//! Phase 0: Vendor Bootstrap
//!
//! Vendor accelerator builds are published as pre-releases and local
//! versions that the resolver does not pick up reliably, so they are
//! installed first with plain `pip` from a dedicated requirements file
//! (`requirements_torch_<vendor>.txt`). The phase is skipped when no vendor is
//! selected, when the vendor has no bootstrap file configured, or when the
//! file is not present in the working directory.

use std::path::PathBuf;

use log::{debug, info};

use super::RunContext;
use crate::error::Result;
use crate::tool::{BOOTSTRAP, DRY_RUN_FLAG, REQUIREMENT_FLAG};

/// Executes Phase 0 of the pipeline.
///
/// Returns the bootstrap file that was installed, if any.
pub fn execute(ctx: &RunContext<'_>) -> Result<Option<PathBuf>> {
    let Some(file) = ctx
        .vendor_settings()
        .and_then(|settings| settings.bootstrap_file.as_deref())
    else {
        return Ok(None);
    };

    let path = ctx.working_dir.join(file);
    if !path.is_file() {
        debug!("No bootstrap file {} for {}", path.display(), ctx.vendor);
        return Ok(None);
    }

    info!("Installing {} accelerator builds from {}", ctx.vendor, file);
    let mut args = vec![REQUIREMENT_FLAG.to_string(), file.to_string()];
    if ctx.config.dry_run {
        args.push(DRY_RUN_FLAG.to_string());
    }
    ctx.runner
        .run(BOOTSTRAP, &ctx.config.tools.bootstrap, &args, ctx.working_dir)?;

    Ok(Some(path))
}
