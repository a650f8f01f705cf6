//! Implementation of the phases of a depsync run.
//!
//! ## Overview
//!
//! A run executes these phases strictly in order, each consuming the previous
//! phase's output:
//! - Phase 1: Discovery - Find core and extension requirement files
//! - Phase 0: Vendor Bootstrap - Install vendor accelerator builds with plain
//!   pip (optional; runs once discovery has found something to resolve)
//! - Phase 2: Override Computation - Pin the core requirements into the override table
//! - Phase 3: Full Compilation - Resolve everything, overrides first, into one lock file
//! - Phase 4: Post-processing - Drop the losing variant of mutually exclusive packages
//! - Phase 5: Installation - Apply the lock file with install or sync semantics
//!
//! Generated files are deleted before they are rebuilt, so every run starts
//! from the same state and re-running after a failure is safe.

use std::path::{Path, PathBuf};

use crate::config::{InstallMode, SyncConfig, VendorSettings};
use crate::requirements::RequirementSource;
use crate::runner::ToolRunner;
use crate::tool::EXTRA_INDEX_FLAG;
use crate::vendor::GpuVendor;

// Phase modules
pub mod bootstrap;
pub mod compile;
pub mod discovery;
pub mod install;
pub mod manifest;
pub mod orchestrator;
pub mod overrides;
pub mod postprocess;

pub use bootstrap as phase0;
pub use compile as phase3;
pub use discovery as phase1;
pub use install as phase5;
pub use overrides as phase2;
pub use postprocess as phase4;

/// Everything a phase needs to know about the current run.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    pub config: &'a SyncConfig,
    pub runner: &'a dyn ToolRunner,
    pub working_dir: &'a Path,
    pub vendor: GpuVendor,
}

impl<'a> RunContext<'a> {
    /// Settings for the selected vendor, if any.
    pub fn vendor_settings(&self) -> Option<&'a VendorSettings> {
        self.config.vendors.get(self.vendor)
    }

    /// `--extra-index-url <url>` for the selected vendor, or nothing.
    pub fn extra_index_args(&self) -> Vec<String> {
        self.vendor_settings()
            .map(|settings| vec![EXTRA_INDEX_FLAG.to_string(), settings.index_url.clone()])
            .unwrap_or_default()
    }

    pub fn override_path(&self) -> PathBuf {
        self.working_dir.join(&self.config.override_file)
    }

    pub fn compiled_path(&self) -> PathBuf {
        self.working_dir.join(&self.config.compiled_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.working_dir.join(&self.config.manifest_file)
    }
}

/// Requirement sources found by discovery, split by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    pub core: Vec<RequirementSource>,
    pub extensions: Vec<RequirementSource>,
}

impl Discovered {
    /// Core sources followed by extension sources.
    pub fn all(&self) -> impl Iterator<Item = &RequirementSource> {
        self.core.iter().chain(self.extensions.iter())
    }

    pub fn len(&self) -> usize {
        self.core.len() + self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.extensions.is_empty()
    }
}

/// What a run did, for reporting.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub sources: Discovered,
    /// Bootstrap requirements file installed before resolution.
    pub bootstrapped: Option<PathBuf>,
    pub override_file: Option<PathBuf>,
    pub compiled_file: Option<PathBuf>,
    /// Requirement lines removed by post-processing, trimmed.
    pub removed: Vec<String>,
    /// Install mode used, or `None` when installation did not run.
    pub installed: Option<InstallMode>,
}
