//! # Configuration
//!
//! This module defines the schema for the optional `.depsync.yaml` file and
//! the [`SyncConfig`] value every pipeline phase reads from. All tool command
//! templates, generated file names, vendor index URLs and exclusive package
//! pairs are carried here explicitly; nothing in the pipeline reads
//! process-wide constants directly.
//!
//! ## Example
//!
//! ```yaml
//! extensions-dir: custom_nodes
//! install-mode: sync
//! tools:
//!   compile:
//!     program: uv
//!     args: [pip, compile, -q]
//! vendors:
//!   amd:
//!     index-url: https://download.pytorch.org/whl/rocm6.2
//! exclusive:
//!   - keep: opencv-python-headless
//!     drop: opencv-python
//! ```
//!
//! Every key is optional; omitted keys take the values in [`crate::defaults`].
//!
//! ## Lookup order
//!
//! [`load`] uses the first of: an explicit path (`--config` /
//! `DEPSYNC_CONFIG`), `.depsync.yaml` in the working directory, the user-level
//! file from [`crate::defaults::user_config_path`], and finally the built-in
//! defaults.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::defaults;
use crate::error::{Error, Result};
use crate::tool::ToolCommand;
use crate::vendor::GpuVendor;

/// How the compiled output is applied to the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Add or upgrade listed packages; leave everything else alone.
    #[default]
    Install,
    /// Make the environment match the compiled output exactly.
    Sync,
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMode::Install => f.write_str("install"),
            InstallMode::Sync => f.write_str("sync"),
        }
    }
}

impl FromStr for InstallMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "install" => Ok(InstallMode::Install),
            "sync" => Ok(InstallMode::Sync),
            other => Err(Error::ConfigParse {
                message: format!("Unknown install mode '{}'", other),
                hint: Some("Use 'install' or 'sync'".to_string()),
            }),
        }
    }
}

/// Command templates for every external tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub compile: ToolCommand,
    pub install: ToolCommand,
    pub sync: ToolCommand,
    pub bootstrap: ToolCommand,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            compile: defaults::compile_command(),
            install: defaults::install_command(),
            sync: defaults::sync_command(),
            bootstrap: defaults::bootstrap_command(),
        }
    }
}

/// Per-vendor index and forced packages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VendorSettings {
    pub index_url: String,
    #[serde(default = "default_accelerator_packages")]
    pub packages: Vec<String>,
    /// Requirements installed with the bootstrap command before resolution.
    /// Relative to the working directory.
    #[serde(default)]
    pub bootstrap_file: Option<String>,
}

fn default_accelerator_packages() -> Vec<String> {
    defaults::ACCELERATOR_PACKAGES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl VendorSettings {
    fn with_defaults(vendor: GpuVendor, index_url: &str) -> Self {
        Self {
            index_url: index_url.to_string(),
            packages: default_accelerator_packages(),
            bootstrap_file: Some(defaults::bootstrap_file(vendor.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VendorTable {
    pub nvidia: VendorSettings,
    pub amd: VendorSettings,
}

impl Default for VendorTable {
    fn default() -> Self {
        Self {
            nvidia: VendorSettings::with_defaults(GpuVendor::Nvidia, defaults::NVIDIA_INDEX_URL),
            amd: VendorSettings::with_defaults(GpuVendor::Amd, defaults::AMD_INDEX_URL),
        }
    }
}

impl VendorTable {
    /// Settings for `vendor`, or `None` when no vendor is selected.
    pub fn get(&self, vendor: GpuVendor) -> Option<&VendorSettings> {
        match vendor {
            GpuVendor::None => None,
            GpuVendor::Nvidia => Some(&self.nvidia),
            GpuVendor::Amd => Some(&self.amd),
        }
    }
}

/// Two package variants that cannot be installed together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusivePair {
    /// Variant retained when both are present.
    pub keep: String,
    /// Variant removed when both are present.
    pub drop: String,
}

/// Complete configuration for one synchronization run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SyncConfig {
    /// File names recognized as requirement declarations.
    pub requirement_files: Vec<String>,
    /// Directory (relative to the working directory) holding extensions.
    pub extensions_dir: String,
    pub override_file: String,
    pub compiled_file: String,
    pub manifest_file: String,
    pub install_mode: InstallMode,
    pub dry_run: bool,
    pub tools: ToolsConfig,
    pub vendors: VendorTable,
    pub exclusive: Vec<ExclusivePair>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            requirement_files: defaults::REQUIREMENT_FILES
                .iter()
                .map(|f| f.to_string())
                .collect(),
            extensions_dir: defaults::EXTENSIONS_DIR.to_string(),
            override_file: defaults::OVERRIDE_FILE.to_string(),
            compiled_file: defaults::COMPILED_FILE.to_string(),
            manifest_file: defaults::MANIFEST_FILE.to_string(),
            install_mode: InstallMode::default(),
            dry_run: false,
            tools: ToolsConfig::default(),
            vendors: VendorTable::default(),
            exclusive: defaults::EXCLUSIVE_PAIRS
                .iter()
                .map(|(keep, drop)| ExclusivePair {
                    keep: keep.to_string(),
                    drop: drop.to_string(),
                })
                .collect(),
        }
    }
}

impl SyncConfig {
    /// Check values serde cannot: non-empty names, distinct generated files,
    /// parseable index URLs.
    pub fn validate(&self) -> Result<()> {
        if self.requirement_files.is_empty() {
            return Err(Error::ConfigParse {
                message: "requirement-files must not be empty".to_string(),
                hint: Some("Remove the key to use the default list".to_string()),
            });
        }

        for (key, value) in [
            ("extensions-dir", &self.extensions_dir),
            ("override-file", &self.override_file),
            ("compiled-file", &self.compiled_file),
            ("manifest-file", &self.manifest_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: format!("{} must not be empty", key),
                    hint: None,
                });
            }
        }

        let generated = [
            ("override-file", &self.override_file),
            ("compiled-file", &self.compiled_file),
            ("manifest-file", &self.manifest_file),
        ];
        for (i, (key, value)) in generated.iter().enumerate() {
            for (other_key, other) in &generated[i + 1..] {
                if same_path(value, other) {
                    return Err(Error::ConfigParse {
                        message: format!("{} and {} both name '{}'", key, other_key, value),
                        hint: Some("Each generated file needs its own name".to_string()),
                    });
                }
            }
            if let Some(source) = self.requirement_files.iter().find(|f| same_path(value, f)) {
                return Err(Error::ConfigParse {
                    message: format!("{} '{}' is also listed in requirement-files", key, source),
                    hint: Some("Generated files are replaced on every run; rename it".to_string()),
                });
            }
        }

        for (name, tool) in [
            ("compile", &self.tools.compile),
            ("install", &self.tools.install),
            ("sync", &self.tools.sync),
            ("bootstrap", &self.tools.bootstrap),
        ] {
            if tool.program.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: format!("tools.{}.program must not be empty", name),
                    hint: None,
                });
            }
        }

        for vendor in [GpuVendor::Nvidia, GpuVendor::Amd] {
            if let Some(settings) = self.vendors.get(vendor) {
                url::Url::parse(&settings.index_url).map_err(|e| Error::ConfigParse {
                    message: format!(
                        "vendors.{}.index-url '{}' is not a valid URL: {}",
                        vendor, settings.index_url, e
                    ),
                    hint: None,
                })?;
                if settings.packages.is_empty() {
                    return Err(Error::ConfigParse {
                        message: format!("vendors.{}.packages must not be empty", vendor),
                        hint: None,
                    });
                }
            }
        }

        for pair in &self.exclusive {
            if pair.keep.trim().is_empty() || pair.drop.trim().is_empty() {
                return Err(Error::ConfigParse {
                    message: "exclusive pairs need both 'keep' and 'drop'".to_string(),
                    hint: None,
                });
            }
        }

        Ok(())
    }
}

/// Whether two configured relative paths name the same file, ignoring `./`
/// segments and surrounding whitespace.
fn same_path(a: &str, b: &str) -> bool {
    let normalize = |p: &str| -> PathBuf {
        Path::new(p.trim())
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };
    normalize(a) == normalize(b)
}

/// Parse and validate a YAML configuration string.
///
/// An empty or comment-only document yields the default configuration.
pub fn parse(yaml_content: &str) -> Result<SyncConfig> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;
    let config = if value.is_null() {
        SyncConfig::default()
    } else {
        serde_yaml::from_value(value).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some("Check key names; they use kebab-case (e.g. 'install-mode')".to_string()),
        })?
    };
    config.validate()?;
    Ok(config)
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SyncConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Resolve the configuration for a run in `working_dir`.
///
/// An explicit path must exist; implicit locations are optional.
pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<SyncConfig> {
    if let Some(path) = explicit {
        debug!("Loading configuration from {}", path.display());
        return from_file(path);
    }

    let local = working_dir.join(defaults::CONFIG_FILE_NAME);
    if local.is_file() {
        debug!("Loading configuration from {}", local.display());
        return from_file(local);
    }

    if let Some(user) = defaults::user_config_path().filter(|p| p.is_file()) {
        debug!("Loading configuration from {}", user.display());
        return from_file(user);
    }

    debug!("No configuration file found; using defaults");
    Ok(SyncConfig::default())
}
