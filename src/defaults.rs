//! Default values for depsync configuration.
//!
//! This module provides centralized default values used across commands and
//! by [`crate::config::SyncConfig::default`], so the tool command templates,
//! file names and vendor indexes live in one place instead of being scattered
//! as constants through the pipeline.

use std::path::PathBuf;

use crate::tool::ToolCommand;

/// Name of the per-project configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".depsync.yaml";

/// Requirement-declaration file names recognized during discovery.
pub const REQUIREMENT_FILES: [&str; 4] = [
    "requirements.txt",
    "pyproject.toml",
    "setup.cfg",
    "setup.py",
];

/// Directory whose immediate children are extensions.
pub const EXTENSIONS_DIR: &str = "custom_nodes";

/// Generated override table.
pub const OVERRIDE_FILE: &str = "overrides.txt";

/// Generated fully pinned requirements.
pub const COMPILED_FILE: &str = "requirements_top.lock";

/// Generated aggregate manifest (`discover --manifest`).
pub const MANIFEST_FILE: &str = "requirements_top.txt";

/// Marker line separating the vendor block from the pinned core set.
pub const CORE_PRECEDENCE_MARKER: &str = "# core deps take precedence";

/// Accelerator packages forced onto the vendor index.
pub const ACCELERATOR_PACKAGES: [&str; 3] = ["torch", "torchvision", "torchaudio"];

pub const NVIDIA_INDEX_URL: &str = "https://download.pytorch.org/whl/cu121";
pub const AMD_INDEX_URL: &str = "https://download.pytorch.org/whl/rocm6.0";

/// Mutually exclusive package pairs as `(keep, drop)`.
pub const EXCLUSIVE_PAIRS: [(&str, &str); 1] = [("opencv-python-headless", "opencv-python")];

/// Resolver command used for both core-only and full compilation.
pub fn compile_command() -> ToolCommand {
    ToolCommand::new("uv", ["pip", "compile", "-q"])
}

/// Additive installer command.
pub fn install_command() -> ToolCommand {
    ToolCommand::new("uv", ["pip", "install"])
}

/// Exact installer command.
pub fn sync_command() -> ToolCommand {
    ToolCommand::new("uv", ["pip", "sync"])
}

/// Plain `pip` used to bootstrap vendor accelerator builds.
pub fn bootstrap_command() -> ToolCommand {
    ToolCommand::new("python", ["-m", "pip", "install"])
}

/// Bootstrap requirements file for a vendor, e.g. `requirements_torch_amd.txt`.
pub fn bootstrap_file(vendor_name: &str) -> String {
    format!("requirements_torch_{}.txt", vendor_name)
}

/// Returns the user-level configuration file path.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/depsync/config.yaml`
/// - macOS: `~/Library/Application Support/depsync/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\depsync\config.yaml`
///
/// Returns `None` if the platform config directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("depsync").join("config.yaml"))
}
