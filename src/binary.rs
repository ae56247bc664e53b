//! Location of the 7-Zip executables.
//!
//! Bundled binaries live under `<binaries_dir>/<platform>`; the override flag
//! selects the alternate `<binaries_dir>/<platform>/other32` install. The
//! resolution is a pure function of its inputs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SevenZipError};

/// Host platform as far as binary layout is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "win32")]
    Windows,
    Linux,
    #[serde(alias = "darwin")]
    MacOS,
}

impl Platform {
    /// Detect the current platform
    pub fn detect() -> Self {
        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }
        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            // Default to Linux for other unixes
            Platform::Linux
        }
    }

    /// Directory name of this platform in the binaries tree
    pub fn dir_name(&self) -> &'static str {
        match self {
            Platform::Windows => "win32",
            Platform::Linux => "linux",
            Platform::MacOS => "darwin",
        }
    }

    /// Get the binary extension for this platform
    pub fn binary_extension(&self) -> &'static str {
        match self {
            Platform::Windows => ".exe",
            _ => "",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Resolved executable location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryLocation {
    /// Directory holding the executable
    pub path: PathBuf,
    /// Executable file name, with platform extension
    pub filename: String,
    /// `path` joined with `filename`
    pub filepath: PathBuf,
}

/// Validate a short binary name such as `7z` or `7za`.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SevenZipError::invalid_input("binary name must not be empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(SevenZipError::invalid_input(format!(
            "binary name must be a bare file name: {}",
            name
        )));
    }
    Ok(())
}

/// Resolve a bundled binary.
pub fn bundled(
    platform: Platform,
    binaries_dir: &Path,
    alternate: bool,
    name: &str,
) -> Result<BinaryLocation> {
    validate_name(name)?;

    let mut path = binaries_dir.join(platform.dir_name());
    if alternate {
        path.push("other32");
    }
    let filename = format!("{}{}", name, platform.binary_extension());
    let filepath = path.join(&filename);

    Ok(BinaryLocation {
        path,
        filename,
        filepath,
    })
}

/// Resolve a binary through the system `PATH`.
pub fn from_system_path(platform: Platform, name: &str) -> Result<BinaryLocation> {
    validate_name(name)?;

    let filename = format!("{}{}", name, platform.binary_extension());
    let filepath = which::which(&filename).map_err(|e| SevenZipError::Spawn {
        binary: filename.clone(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
    })?;
    let path = filepath
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    Ok(BinaryLocation {
        path,
        filename,
        filepath,
    })
}
