//! GPU vendor selection.
//!
//! The accelerator library family (`torch` and friends) ships vendor-specific
//! builds from separate package indexes. A [`GpuVendor`] picks which index is
//! injected into resolution and installation, which override block is emitted,
//! and which bootstrap requirements file is installed first.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Target GPU vendor for accelerator packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuVendor {
    /// No vendor index; accelerator packages resolve from the default index.
    #[default]
    None,
    /// NVIDIA (CUDA) builds.
    Nvidia,
    /// AMD (ROCm) builds.
    Amd,
}

impl GpuVendor {
    /// All selectable values, in CLI order.
    pub const ALL: [GpuVendor; 3] = [GpuVendor::None, GpuVendor::Nvidia, GpuVendor::Amd];

    /// Lowercase name used on the command line and in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            GpuVendor::None => "none",
            GpuVendor::Nvidia => "nvidia",
            GpuVendor::Amd => "amd",
        }
    }

    /// Whether a vendor index is in play at all.
    pub fn is_selected(&self) -> bool {
        !matches!(self, GpuVendor::None)
    }
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GpuVendor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "cpu" => Ok(GpuVendor::None),
            "nvidia" | "cuda" => Ok(GpuVendor::Nvidia),
            "amd" | "rocm" => Ok(GpuVendor::Amd),
            other => Err(Error::ConfigParse {
                message: format!("Unknown GPU vendor '{}'", other),
                hint: Some("Use one of: none, nvidia, amd".to_string()),
            }),
        }
    }
}
