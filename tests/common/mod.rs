//! Shared test utilities for integration and E2E tests.
//!
//! The fixture builds an application tree in a temporary directory and, on
//! Unix, a fake `uv` shell script under `.tools/` that stands in for both the
//! resolver and the installer. The script appends every invocation to
//! `.tools/calls.log`, answers core compiles with `.tools/core.fixture` and
//! writes `.tools/compiled.fixture` wherever `-o` points. Creating
//! `.tools/fail-<subcommand>` makes that subcommand exit 1.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new()
//!     .with_file("requirements.txt", "numpy\n")
//!     .with_fake_tools();
//! fixture.command().arg("compile").assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::fixtures;
    pub use super::TestFixture;
}

/// Canned tool output used by the fake resolver.
#[allow(dead_code)]
pub mod fixtures {
    /// What the resolver prints for the core requirements.
    pub const CORE_PINS: &str = "numpy==1.26.4\nopencv-python==4.9.0.80\n";

    /// What the resolver writes to the compiled file: both opencv variants.
    pub const COMPILED_WITH_BOTH_OPENCV: &str = "\
numpy==1.26.4
opencv-python==4.9.0.80
    # via -r requirements.txt
opencv-python-headless==4.9.0.80
    # via -r custom_nodes/ext_a/requirements.txt
pillow==10.3.0
";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "install-mode: [unclosed";
}

const FAKE_UV: &str = r#"#!/bin/sh
tools="$(dirname "$0")"
echo "$*" >> "$tools/calls.log"
sub="$2"
if [ -e "$tools/fail-$sub" ]; then
    echo "simulated $sub failure" >&2
    exit 1
fi
if [ "$sub" = "compile" ]; then
    out=""
    prev=""
    for arg in "$@"; do
        if [ "$prev" = "-o" ]; then
            out="$arg"
        fi
        prev="$arg"
    done
    if [ -n "$out" ]; then
        cp "$tools/compiled.fixture" "$out"
    else
        cat "$tools/core.fixture"
    fi
fi
exit 0
"#;

/// A temporary application tree with optional config and fake tools.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.depsync.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".depsync.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an extension directory with a `requirements.txt`.
    pub fn with_extension(self, name: &str, requirements: &str) -> Self {
        self.with_file(&format!("custom_nodes/{name}/requirements.txt"), requirements)
    }

    /// Install the fake `uv` script and a `.depsync.yaml` that routes every
    /// tool through it.
    #[cfg(unix)]
    pub fn with_fake_tools(self) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let script = self.temp_dir.child(".tools/uv");
        script.write_str(FAKE_UV).expect("Failed to write fake uv");
        std::fs::set_permissions(script.path(), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake uv executable");
        self.temp_dir
            .child(".tools/core.fixture")
            .write_str(fixtures::CORE_PINS)
            .expect("Failed to write core fixture");
        self.temp_dir
            .child(".tools/compiled.fixture")
            .write_str(fixtures::COMPILED_WITH_BOTH_OPENCV)
            .expect("Failed to write compiled fixture");

        let program = script.path().display().to_string();
        let config = format!(
            r#"tools:
  compile:
    program: "{program}"
    args: [pip, compile, -q]
  install:
    program: "{program}"
    args: [pip, install]
  sync:
    program: "{program}"
    args: [pip, sync]
  bootstrap:
    program: "{program}"
    args: [pip, bootstrap]
"#
        );
        self.with_config(&config)
    }

    /// Make the fake tool fail for `subcommand` (`compile`, `install`, ...).
    pub fn failing(self, subcommand: &str) -> Self {
        self.with_file(&format!(".tools/fail-{subcommand}"), "")
    }

    /// Invocations recorded by the fake tool, one argument string per line.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join(".tools/calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Read a file from the tree, panicking if it is missing.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path))
            .unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".depsync.yaml")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("depsync");
        cmd.current_dir(self.path())
            .env_remove("DEPSYNC_CONFIG")
            .env_remove("DEPSYNC_LOG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .env("XDG_CONFIG_HOME", self.path().join(".xdg"));
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_extension() {
        let fixture = TestFixture::new().with_extension("ext_a", "pillow\n");
        assert!(fixture
            .path()
            .join("custom_nodes/ext_a/requirements.txt")
            .exists());
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(fixtures::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
