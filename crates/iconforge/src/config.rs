//! Directory layout conventions.
//!
//! The converter takes no arguments; where it reads sources and writes
//! containers is a convention of the repository tree. The conventions live
//! in [`Layout`], whose `Default` matches the checked-in tree, and can be
//! overridden either programmatically (tests do this) or by dropping an
//! `iconforge.toml` next to the invocation:
//!
//! ```toml
//! source_dir = "assets/icons"
//! windows_out_dir = "assets/icons/windows"
//! macos_out_dir = "assets/icons/macos"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, ForgeResult};
use crate::identity::IconIdentity;

/// Name of the optional layout override file, looked up in the working
/// directory.
pub const CONFIG_FILE: &str = "iconforge.toml";

/// Source and output directory conventions for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Directory holding the source PNG rasters for both identities.
    source_dir: PathBuf,
    /// Directory receiving the generated ICO containers.
    windows_out_dir: PathBuf,
    /// Directory receiving the staged iconsets and generated ICNS containers.
    macos_out_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("resources/icons"),
            windows_out_dir: PathBuf::from("resources/icons/windows"),
            macos_out_dir: PathBuf::from("resources/icons/macos"),
        }
    }
}

impl Layout {
    /// Create a layout with the repository's default conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the source directory (builder pattern).
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Override the ICO output directory (builder pattern).
    pub fn with_windows_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.windows_out_dir = dir.into();
        self
    }

    /// Override the iconset/ICNS output directory (builder pattern).
    pub fn with_macos_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.macos_out_dir = dir.into();
        self
    }

    /// Load a layout from a TOML override file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// layout table.
    pub fn load(path: impl AsRef<Path>) -> ForgeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ForgeError::io(path, e))?;
        toml::from_str(&content).map_err(|e| ForgeError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Load `iconforge.toml` from the working directory if present,
    /// otherwise use the defaults.
    pub fn load_or_default() -> ForgeResult<Self> {
        if Path::new(CONFIG_FILE).exists() {
            Self::load(CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }

    /// The source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// The ICO output directory.
    pub fn windows_out_dir(&self) -> &Path {
        &self.windows_out_dir
    }

    /// The iconset/ICNS output directory.
    pub fn macos_out_dir(&self) -> &Path {
        &self.macos_out_dir
    }

    /// Output path of an identity's ICO container.
    pub fn ico_path(&self, identity: IconIdentity) -> PathBuf {
        self.windows_out_dir.join(format!("{}.ico", identity.stem()))
    }

    /// Staging directory of an identity's iconset.
    pub fn iconset_dir(&self, identity: IconIdentity) -> PathBuf {
        self.macos_out_dir
            .join(format!("{}.iconset", identity.stem()))
    }

    /// Output path of an identity's ICNS container.
    pub fn icns_path(&self, identity: IconIdentity) -> PathBuf {
        self.macos_out_dir.join(format!("{}.icns", identity.stem()))
    }
}
