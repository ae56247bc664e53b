//! Scripted stand-ins for the 7-Zip executables.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use sevenzip_engine::{EngineConfig, Platform, SevenZip};
use tempfile::TempDir;

/// Builder for a binaries tree laid out as `<root>/linux[/other32]/<name>`
pub struct FakeTool {
    dir: TempDir,
}

impl FakeTool {
    /// Create an empty binaries tree
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Root of the binaries tree
    pub fn binaries_dir(&self) -> &Path {
        self.dir.path()
    }

    fn script_path(&self, name: &str, alternate: bool) -> PathBuf {
        let mut path = self.dir.path().join("linux");
        if alternate {
            path.push("other32");
        }
        path.join(name)
    }

    fn write_script(&self, path: &Path, body: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        // Every script records its argv next to itself, one argument per line.
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$0.args\"\n{}\n",
            body
        );
        fs::write(path, script).expect("Failed to write script");
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
    }

    /// Install a script as binary `name`
    pub fn install(&self, name: &str, body: &str) -> &Self {
        self.write_script(&self.script_path(name, false), body);
        self
    }

    /// Install a script in the alternate `other32` directory
    pub fn install_alternate(&self, name: &str, body: &str) -> &Self {
        self.write_script(&self.script_path(name, true), body);
        self
    }

    /// Arguments the binary was last invoked with, if it ran
    pub fn recorded_args(&self, name: &str) -> Option<Vec<String>> {
        Self::read_record(&self.script_path(name, false))
    }

    pub fn recorded_alternate_args(&self, name: &str) -> Option<Vec<String>> {
        Self::read_record(&self.script_path(name, true))
    }

    fn read_record(script: &Path) -> Option<Vec<String>> {
        let mut record = script.as_os_str().to_owned();
        record.push(".args");
        let content = fs::read_to_string(PathBuf::from(record)).ok()?;
        Some(content.lines().map(String::from).collect())
    }

    /// Engine configuration pointing at this tree
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            binaries_dir: Some(self.dir.path().to_path_buf()),
            platform: Some(Platform::Linux),
            ..Default::default()
        }
    }

    pub fn engine(&self) -> SevenZip {
        SevenZip::new(self.config())
    }
}
