//! Requirement sources and requirement-line parsing.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Result;

/// Who contributed a requirement file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// The host application itself.
    Core,
    /// An installed extension.
    Extension,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Core => f.pad("core"),
            Scope::Extension => f.pad("extension"),
        }
    }
}

/// A requirement-declaration file found during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequirementSource {
    pub path: PathBuf,
    pub scope: Scope,
}

impl RequirementSource {
    pub fn new(path: impl Into<PathBuf>, scope: Scope) -> Self {
        Self {
            path: path.into(),
            scope,
        }
    }

    /// Path as handed to external tools: relative to `base` when possible.
    pub fn tool_arg(&self, base: &Path) -> String {
        relative_to(&self.path, base).to_string_lossy().into_owned()
    }

    /// File name of the source (`requirements.txt`, `pyproject.toml`, ...).
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// `path` relative to `base`, or `path` unchanged if it is not under `base`.
pub fn relative_to<'a>(path: &'a Path, base: &Path) -> &'a Path {
    path.strip_prefix(base).unwrap_or(path)
}

/// Normalize a distribution name per PEP 503: lowercase, with runs of
/// `-`, `_` and `.` collapsed to a single `-`.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            pending_sep = true;
            continue;
        }
        if pending_sep && !normalized.is_empty() {
            normalized.push('-');
        }
        pending_sep = false;
        normalized.extend(c.to_lowercase());
    }
    normalized
}

/// Extracts the distribution name from pinned requirement lines.
///
/// Comment lines, blank lines and option lines (`--index-url ...`, `-r x`)
/// have no package name.
pub struct RequirementLineParser {
    name: Regex,
}

impl RequirementLineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name: Regex::new(r"^\s*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)")?,
        })
    }

    /// Normalized package name declared on `line`, if any.
    pub fn package_name(&self, line: &str) -> Option<String> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
            return None;
        }
        self.name
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| normalize_name(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("opencv-python"), "opencv-python");
        assert_eq!(normalize_name("OpenCV_Python"), "opencv-python");
        assert_eq!(normalize_name("opencv.python--headless"), "opencv-python-headless");
        assert_eq!(normalize_name("  Torch "), "torch");
    }

    #[test]
    fn test_package_name_from_pinned_lines() {
        let parser = RequirementLineParser::new().unwrap();
        assert_eq!(
            parser.package_name("opencv-python==4.9.0.80").as_deref(),
            Some("opencv-python")
        );
        assert_eq!(
            parser.package_name("opencv-python-headless==4.9.0.80").as_deref(),
            Some("opencv-python-headless")
        );
        assert_eq!(
            parser.package_name("Pillow>=10 ; python_version >= '3.9'").as_deref(),
            Some("pillow")
        );
        assert_eq!(parser.package_name("torch[cuda]==2.3.0").as_deref(), Some("torch"));
        assert_eq!(parser.package_name("a").as_deref(), Some("a"));
    }

    #[test]
    fn test_package_name_ignores_non_requirement_lines() {
        let parser = RequirementLineParser::new().unwrap();
        assert_eq!(parser.package_name(""), None);
        assert_eq!(parser.package_name("   "), None);
        assert_eq!(parser.package_name("# opencv-python==4.9.0.80"), None);
        assert_eq!(parser.package_name("    # via opencv-python"), None);
        assert_eq!(parser.package_name("--extra-index-url https://x"), None);
        assert_eq!(parser.package_name("-r requirements.txt"), None);
    }

    #[test]
    fn test_tool_arg_is_relative_under_base() {
        let source = RequirementSource::new(
            "/app/custom_nodes/ext/requirements.txt",
            Scope::Extension,
        );
        assert_eq!(
            source.tool_arg(Path::new("/app")),
            "custom_nodes/ext/requirements.txt"
        );
        assert_eq!(
            source.tool_arg(Path::new("/elsewhere")),
            "/app/custom_nodes/ext/requirements.txt"
        );
        assert_eq!(source.file_name(), Some("requirements.txt"));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Core.to_string(), "core");
        assert_eq!(Scope::Extension.to_string(), "extension");
        assert_eq!(format!("{:<9}|", Scope::Core), "core     |");
    }
}
