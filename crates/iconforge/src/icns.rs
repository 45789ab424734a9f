//! Iconset staging for ICNS packing.
//!
//! ICNS containers are produced by Apple's `iconutil`, which consumes a
//! `<name>.iconset/` directory holding one PNG per slot with fixed names:
//! `icon_16x16.png`, `icon_16x16@2x.png`, `icon_32x32.png`, and so on. The
//! `@2x` slot for a base size is the raster at *double* that size, so one
//! source raster can legitimately appear under two names (32px is both
//! `icon_32x32.png` and `icon_16x16@2x.png`). Bytes are copied verbatim in
//! every case.
//!
//! `iconutil` only exists on macOS. On any other host the staging step still
//! runs to completion; the final packing is deferred to a host that has the
//! tool, which the pipeline reports as an outcome, not an error.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{ForgeError, ForgeResult};
use crate::resolution::IconResolution;
use crate::set::IconSet;

/// Name of the external packing tool.
pub const ICONUTIL: &str = "iconutil";

/// Base resolutions of the iconset slots. Each also has an `@2x` companion
/// slot holding the raster at double the base size.
const BASE_SLOTS: [IconResolution; 5] = [
    IconResolution::Px16,
    IconResolution::Px32,
    IconResolution::Px128,
    IconResolution::Px256,
    IconResolution::Px512,
];

/// Stage an icon set into an iconset directory, returning the slot names
/// written.
///
/// Any previous staging tree at `staging_dir` is removed first so entries
/// from an earlier, larger ladder cannot leak into a freshly packed
/// container.
///
/// # Errors
///
/// Returns an error if the staging tree cannot be created or written.
pub fn stage(set: &IconSet, staging_dir: impl AsRef<Path>) -> ForgeResult<Vec<String>> {
    let staging_dir = staging_dir.as_ref();

    if staging_dir.exists() {
        fs::remove_dir_all(staging_dir).map_err(|e| ForgeError::io(staging_dir, e))?;
    }
    fs::create_dir_all(staging_dir).map_err(|e| ForgeError::io(staging_dir, e))?;

    let mut written = Vec::new();
    for base in BASE_SLOTS {
        let px = base.as_pixels();
        if let Some(image) = set.get(base) {
            let name = format!("icon_{px}x{px}.png");
            let path = staging_dir.join(&name);
            fs::write(&path, image.data()).map_err(|e| ForgeError::io(&path, e))?;
            written.push(name);
        }
        if let Some(image) = base.doubled().and_then(|r| set.get(r)) {
            let name = format!("icon_{px}x{px}@2x.png");
            let path = staging_dir.join(&name);
            fs::write(&path, image.data()).map_err(|e| ForgeError::io(&path, e))?;
            written.push(name);
        }
    }

    tracing::info!(
        identity = %set.identity(),
        dir = %staging_dir.display(),
        slots = written.len(),
        "staged iconset"
    );
    Ok(written)
}

/// Whether the external packing tool is available on this host.
///
/// Always false off macOS; on macOS, probes for `iconutil` on the PATH.
pub fn iconutil_available() -> bool {
    if !cfg!(target_os = "macos") {
        return false;
    }
    match Command::new(ICONUTIL)
        .arg("--help")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        // The tool exists; its exit status for --help is irrelevant
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(_) => false,
    }
}

/// Invoke `iconutil` to pack a staged iconset into an ICNS container.
///
/// # Errors
///
/// Returns [`ForgeError::ExternalTool`] if the tool exits non-zero, or an
/// I/O error if it cannot be spawned at all.
pub fn pack_with_iconutil(staging_dir: &Path, dest: &Path) -> ForgeResult<()> {
    let output = Command::new(ICONUTIL)
        .arg("-c")
        .arg("icns")
        .arg(staging_dir)
        .arg("-o")
        .arg(dest)
        .output()
        .map_err(|e| ForgeError::io(staging_dir, e))?;

    if !output.status.success() {
        return Err(ForgeError::ExternalTool {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    tracing::info!(path = %dest.display(), "packed ICNS container");
    Ok(())
}
