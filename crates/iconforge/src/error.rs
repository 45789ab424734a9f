//! Error types for icon conversion.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::identity::IconIdentity;

/// Errors that can occur while scanning, packing, or staging icons.
///
/// A deferred ICNS packing step is deliberately *not* represented here; a
/// host without the external packer is an expected outcome, reported through
/// [`TargetOutcome::AwaitingExternalTool`](crate::convert::TargetOutcome),
/// not an error.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// An identity has no source rasters at all.
    #[error("no icon sources found for the {identity} in '{dir}'")]
    MissingSource { identity: IconIdentity, dir: PathBuf },

    /// A source raster's pixel dimensions disagree with its filename.
    #[error("'{path}' declares {declared}x{declared} but decodes to {width}x{height}")]
    DimensionMismatch {
        path: PathBuf,
        declared: u32,
        width: u32,
        height: u32,
    },

    /// A source file is not a PNG.
    #[error("'{path}' is not a PNG image")]
    UnsupportedFormat { path: PathBuf },

    /// The ICO packer was handed a resolution its directory cannot express.
    #[error("{px}x{px} cannot be represented in an ICO directory")]
    ResolutionUnrepresentable { px: u32 },

    /// ICO data failed structural validation.
    #[error("malformed ICO data: {0}")]
    MalformedIco(String),

    /// The external packer ran and failed.
    #[error("iconutil failed ({status}): {stderr}")]
    ExternalTool { status: ExitStatus, stderr: String },

    /// The layout override file could not be parsed.
    #[error("invalid configuration in '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// File I/O error.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Image header decoding error.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl ForgeError {
    /// Create an I/O error tagged with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for icon conversion operations.
pub type ForgeResult<T> = Result<T, ForgeError>;
