//! Source raster discovery and validation.
//!
//! The scanner walks the fixed resolution ladder for each identity, loading
//! every `<stem>_<px>.png` it finds in the source directory. Missing rungs
//! are skipped (a partial ladder just produces a sparser container); an
//! identity with *no* rungs at all aborts the run.
//!
//! Every accepted raster is validated twice: its magic bytes must identify a
//! PNG, and its decoded header dimensions must match the resolution its
//! filename declares. A raster lying about its size would poison every
//! container built from it, so a mismatch is a hard failure rather than
//! silent trust of the filename.

use std::fs;
use std::io::Cursor;

use image::ImageReader;

use crate::config::Layout;
use crate::error::{ForgeError, ForgeResult};
use crate::format::RasterFormat;
use crate::identity::IconIdentity;
use crate::resolution::IconResolution;
use crate::set::{IconImage, IconSet};

/// Scan the source directory for one identity's rasters.
///
/// # Errors
///
/// Returns [`ForgeError::MissingSource`] if no rung of the ladder exists for
/// the identity, and validation or I/O errors for rasters that exist but
/// cannot be used.
pub fn scan(layout: &Layout, identity: IconIdentity) -> ForgeResult<IconSet> {
    let dir = layout.source_dir();
    let mut set = IconSet::new(identity);

    for &resolution in IconResolution::ladder() {
        let path = dir.join(identity.source_file_name(resolution));
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no source at this rung, skipping");
            continue;
        }

        let data = fs::read(&path).map_err(|e| ForgeError::io(&path, e))?;

        if RasterFormat::from_magic_bytes(&data) != RasterFormat::Png {
            return Err(ForgeError::UnsupportedFormat { path });
        }

        let (width, height) = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|e| ForgeError::io(&path, e))?
            .into_dimensions()?;

        let declared = resolution.as_pixels();
        if width != declared || height != declared {
            return Err(ForgeError::DimensionMismatch {
                path,
                declared,
                width,
                height,
            });
        }

        set.insert(IconImage::new(resolution, path, data));
    }

    if set.is_empty() {
        return Err(ForgeError::MissingSource {
            identity,
            dir: dir.to_path_buf(),
        });
    }

    tracing::info!(
        identity = %identity,
        resolutions = set.len(),
        "scanned icon sources"
    );
    Ok(set)
}

/// Scan both identities.
///
/// All scanning happens before any output path is touched, so a
/// [`ForgeError::MissingSource`] for either identity aborts the whole run
/// with the output tree untouched.
pub fn scan_all(layout: &Layout) -> ForgeResult<Vec<IconSet>> {
    IconIdentity::all()
        .iter()
        .map(|&identity| scan(layout, identity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_png(dir: &Path, name: &str, px: u32) {
        let img = image::RgbaImage::from_pixel(px, px, image::Rgba([40, 80, 120, 255]));
        img.save(dir.join(name)).unwrap();
    }

    fn layout_in(dir: &Path) -> Layout {
        Layout::new().with_source_dir(dir)
    }

    #[test]
    fn test_scan_collects_present_rungs() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "compiler_16.png", 16);
        write_png(dir.path(), "compiler_256.png", 256);

        let set = scan(&layout_in(dir.path()), IconIdentity::Compiler).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get(IconResolution::Px16).is_some());
        assert!(set.get(IconResolution::Px256).is_some());
        assert!(set.get(IconResolution::Px32).is_none());
    }

    #[test]
    fn test_scan_keeps_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "lsp_32.png", 32);
        let on_disk = fs::read(dir.path().join("lsp_32.png")).unwrap();

        let set = scan(&layout_in(dir.path()), IconIdentity::LanguageServer).unwrap();
        assert_eq!(set.get(IconResolution::Px32).unwrap().data(), &on_disk[..]);
    }

    #[test]
    fn test_scan_ignores_other_identity() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "compiler_16.png", 16);
        write_png(dir.path(), "lsp_16.png", 16);

        let set = scan(&layout_in(dir.path()), IconIdentity::Compiler).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.identity(), IconIdentity::Compiler);
    }

    #[test]
    fn test_empty_identity_is_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "compiler_16.png", 16);

        let err = scan(&layout_in(dir.path()), IconIdentity::LanguageServer).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::MissingSource {
                identity: IconIdentity::LanguageServer,
                ..
            }
        ));
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A 16x16 raster pretending to be 32x32
        write_png(dir.path(), "compiler_32.png", 16);

        let err = scan(&layout_in(dir.path()), IconIdentity::Compiler).unwrap_err();
        match err {
            ForgeError::DimensionMismatch {
                declared,
                width,
                height,
                ..
            } => {
                assert_eq!(declared, 32);
                assert_eq!((width, height), (16, 16));
            }
            other => panic!("expected DimensionMismatch, got {other}"),
        }
    }

    #[test]
    fn test_non_png_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("compiler_16.png"), b"GIF89a not a png").unwrap();

        let err = scan(&layout_in(dir.path()), IconIdentity::Compiler).unwrap_err();
        assert!(matches!(err, ForgeError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_scan_all_requires_both_identities() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "compiler_16.png", 16);

        assert!(scan_all(&layout_in(dir.path())).is_err());

        write_png(dir.path(), "lsp_16.png", 16);
        let sets = scan_all(&layout_in(dir.path())).unwrap();
        assert_eq!(sets.len(), 2);
    }
}
