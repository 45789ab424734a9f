//! Container and raster format detection from magic bytes.

/// Format of a raster or icon container file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    /// PNG raster (the only accepted source format)
    Png,
    /// Windows ICO container
    Ico,
    /// macOS ICNS container
    Icns,
    /// Anything else
    Unknown,
}

impl RasterFormat {
    /// Detect format from file magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return RasterFormat::Unknown;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return RasterFormat::Png;
        }

        // ICO: 00 00 01 00
        if data.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
            return RasterFormat::Ico;
        }

        // ICNS: "icns"
        if data.starts_with(b"icns") {
            return RasterFormat::Icns;
        }

        RasterFormat::Unknown
    }
}
