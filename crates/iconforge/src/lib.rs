//! iconforge - icon packaging for the toolchain binaries.
//!
//! The compiler and its language-server companion each ship a set of PNG
//! rasters at a fixed ladder of resolutions. This crate repackages those
//! rasters, losslessly, into the platform icon containers the build embeds:
//! ICO directly, ICNS by staging an iconset for Apple's `iconutil` and
//! invoking it where available.
//!
//! # Example
//!
//! ```no_run
//! use iconforge::{convert, Layout};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let layout = Layout::load_or_default()?;
//!     let report = convert::run(&layout)?;
//!     print!("{report}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod icns;
pub mod ico;
pub mod identity;
pub mod resolution;
pub mod scanner;
pub mod set;

pub use config::Layout;
pub use convert::{ConversionTarget, ReportEntry, RunReport, TargetOutcome};
pub use error::{ForgeError, ForgeResult};
pub use identity::IconIdentity;
pub use resolution::IconResolution;
pub use set::{IconImage, IconSet};
