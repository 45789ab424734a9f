//! ICO container packing.
//!
//! An ICO file is a 6-byte ICONDIR header, one 16-byte ICONDIRENTRY per
//! embedded image, then the image payloads. Modern consumers accept PNG
//! payloads for 32-bit icons, which is exactly what we want: each source
//! raster's bytes are appended verbatim, so the container is a lossless
//! repackaging of the scanned set.
//!
//! Layout written per entry:
//!
//! ```text
//! offset  size  field
//!      0     1  width in pixels (0 means 256)
//!      1     1  height in pixels (0 means 256)
//!      2     1  palette size (0: no palette)
//!      3     1  reserved
//!      4     2  color planes (1)
//!      6     2  bits per pixel (32)
//!      8     4  payload length in bytes
//!     12     4  payload offset from start of file
//! ```
//!
//! The directory's single-byte dimensions cap entries at 256x256; the
//! pipeline restricts the set before calling [`pack`], and the encoder
//! rejects anything larger as a caller bug.

use std::fs;
use std::path::Path;

use crate::error::{ForgeError, ForgeResult};
use crate::set::IconSet;

/// Largest resolution an ICO directory can express.
pub const MAX_PIXELS: u32 = 256;

/// ICONDIR header length in bytes.
const HEADER_LEN: usize = 6;

/// ICONDIRENTRY length in bytes.
const ENTRY_LEN: usize = 16;

/// Encode an icon set as ICO container bytes.
///
/// Output is deterministic for an unchanged set: entries are emitted
/// smallest resolution first and nothing time- or host-dependent is written.
///
/// # Errors
///
/// Returns [`ForgeError::ResolutionUnrepresentable`] if the set contains a
/// resolution above [`MAX_PIXELS`].
pub fn encode(set: &IconSet) -> ForgeResult<Vec<u8>> {
    let count = set.len();
    let mut out = Vec::with_capacity(
        HEADER_LEN + ENTRY_LEN * count + set.images().map(|i| i.data().len()).sum::<usize>(),
    );

    // ICONDIR: reserved, type (1 = icon), image count
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&(count as u16).to_le_bytes());

    let mut offset = (HEADER_LEN + ENTRY_LEN * count) as u32;
    for image in set.images() {
        let px = image.resolution().as_pixels();
        if px > MAX_PIXELS {
            return Err(ForgeError::ResolutionUnrepresentable { px });
        }
        let dim = if px == MAX_PIXELS { 0u8 } else { px as u8 };
        let len = image.data().len() as u32;

        out.push(dim); // width
        out.push(dim); // height
        out.push(0); // no palette
        out.push(0); // reserved
        out.extend_from_slice(&1u16.to_le_bytes()); // color planes
        out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());

        offset += len;
    }

    for image in set.images() {
        out.extend_from_slice(image.data());
    }

    Ok(out)
}

/// Pack an icon set into an ICO file, overwriting any existing file.
///
/// # Errors
///
/// Returns an error if the set cannot be encoded or the file cannot be
/// written.
pub fn pack(set: &IconSet, dest: impl AsRef<Path>) -> ForgeResult<()> {
    let dest = dest.as_ref();
    let bytes = encode(set)?;
    fs::write(dest, &bytes).map_err(|e| ForgeError::io(dest, e))?;
    tracing::info!(
        identity = %set.identity(),
        path = %dest.display(),
        entries = set.len(),
        "packed ICO container"
    );
    Ok(())
}

// ============================================================================
// Directory parsing
// ============================================================================

/// One parsed ICONDIRENTRY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoEntry {
    /// Width in pixels (the directory's `0 == 256` encoding already undone).
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Payload offset from the start of the file.
    pub offset: u32,
    /// Payload length in bytes.
    pub length: u32,
}

impl IcoEntry {
    /// Borrow this entry's payload out of the full container bytes.
    pub fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.offset as usize..(self.offset + self.length) as usize]
    }
}

/// The parsed directory of an ICO container.
///
/// This is a verification aid for the packer's own output, not a general
/// ICO reader: it decodes the header and directory, bounds-checks every
/// entry, and lets callers extract payloads byte-for-byte.
#[derive(Debug, Clone)]
pub struct IcoDirectory {
    entries: Vec<IcoEntry>,
}

impl IcoDirectory {
    /// Parse the header and directory of ICO container bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::MalformedIco`] if the header, directory, or any
    /// entry's payload bounds are structurally invalid.
    pub fn parse(data: &[u8]) -> ForgeResult<Self> {
        if data.len() < HEADER_LEN {
            return Err(ForgeError::MalformedIco("shorter than ICONDIR".into()));
        }
        if data[0..4] != [0x00, 0x00, 0x01, 0x00] {
            return Err(ForgeError::MalformedIco("bad ICONDIR signature".into()));
        }

        let count = u16::from_le_bytes([data[4], data[5]]) as usize;
        let dir_end = HEADER_LEN + ENTRY_LEN * count;
        if data.len() < dir_end {
            return Err(ForgeError::MalformedIco(format!(
                "directory declares {count} entries but the file is truncated"
            )));
        }

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let e = &data[HEADER_LEN + ENTRY_LEN * i..HEADER_LEN + ENTRY_LEN * (i + 1)];
            let width = if e[0] == 0 { 256 } else { e[0] as u32 };
            let height = if e[1] == 0 { 256 } else { e[1] as u32 };
            let length = u32::from_le_bytes([e[8], e[9], e[10], e[11]]);
            let offset = u32::from_le_bytes([e[12], e[13], e[14], e[15]]);

            let end = offset as u64 + length as u64;
            if (offset as usize) < dir_end || end > data.len() as u64 {
                return Err(ForgeError::MalformedIco(format!(
                    "entry {i} payload [{offset}, {end}) is out of bounds"
                )));
            }

            entries.push(IcoEntry {
                width,
                height,
                offset,
                length,
            });
        }

        Ok(Self { entries })
    }

    /// The parsed entries, in directory order.
    pub fn entries(&self) -> &[IcoEntry] {
        &self.entries
    }

    /// The widths listed in the directory, in directory order.
    ///
    /// Entries are square, so this is also the list of resolutions.
    pub fn resolutions(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::RasterFormat;
    use crate::identity::IconIdentity;
    use crate::resolution::IconResolution;
    use crate::set::IconImage;

    fn png_bytes(px: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        let img = image::RgbaImage::from_pixel(px, px, image::Rgba([200, 100, 50, 255]));
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn set_with(resolutions: &[IconResolution]) -> IconSet {
        let mut set = IconSet::new(IconIdentity::Compiler);
        for &r in resolutions {
            set.insert(IconImage::new(r, "mem.png", png_bytes(r.as_pixels())));
        }
        set
    }

    #[test]
    fn test_directory_lists_exactly_the_input_resolutions() {
        let set = set_with(&[IconResolution::Px16, IconResolution::Px48, IconResolution::Px256]);
        let bytes = encode(&set).unwrap();

        let dir = IcoDirectory::parse(&bytes).unwrap();
        assert_eq!(dir.resolutions(), vec![16, 48, 256]);
    }

    #[test]
    fn test_output_is_an_ico() {
        let set = set_with(&[IconResolution::Px16]);
        let bytes = encode(&set).unwrap();
        assert_eq!(RasterFormat::from_magic_bytes(&bytes), RasterFormat::Ico);
    }

    #[test]
    fn test_256_uses_zero_dimension_encoding() {
        let set = set_with(&[IconResolution::Px256]);
        let bytes = encode(&set).unwrap();
        // First entry's width/height bytes
        assert_eq!(bytes[HEADER_LEN], 0);
        assert_eq!(bytes[HEADER_LEN + 1], 0);
        // And the parser undoes the encoding
        let dir = IcoDirectory::parse(&bytes).unwrap();
        assert_eq!(dir.resolutions(), vec![256]);
    }

    #[test]
    fn test_payloads_round_trip_byte_identical() {
        let set = set_with(&[IconResolution::Px16, IconResolution::Px32]);
        let bytes = encode(&set).unwrap();
        let dir = IcoDirectory::parse(&bytes).unwrap();

        for entry in dir.entries() {
            let source = set.get_pixels(entry.width).unwrap();
            assert_eq!(entry.payload(&bytes), source.data());
            // Payloads stay PNG inside the container
            assert_eq!(
                RasterFormat::from_magic_bytes(entry.payload(&bytes)),
                RasterFormat::Png
            );
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let set = set_with(&[IconResolution::Px16, IconResolution::Px64, IconResolution::Px128]);
        assert_eq!(encode(&set).unwrap(), encode(&set).unwrap());
    }

    #[test]
    fn test_oversized_resolution_is_rejected() {
        let set = set_with(&[IconResolution::Px512]);
        let err = encode(&set).unwrap_err();
        assert!(matches!(err, ForgeError::ResolutionUnrepresentable { px: 512 }));
    }

    #[test]
    fn test_pack_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("compiler.ico");
        std::fs::write(&dest, b"stale").unwrap();

        let set = set_with(&[IconResolution::Px16]);
        pack(&set, &dest).unwrap();

        let written = std::fs::read(&dest).unwrap();
        assert_eq!(written, encode(&set).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_signature() {
        assert!(matches!(
            IcoDirectory::parse(b"\x89PNG\r\n\x1a\n").unwrap_err(),
            ForgeError::MalformedIco(_)
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_directory() {
        // Header claims 2 entries but no directory follows
        let bytes = [0x00, 0x00, 0x01, 0x00, 0x02, 0x00];
        assert!(matches!(
            IcoDirectory::parse(&bytes).unwrap_err(),
            ForgeError::MalformedIco(_)
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_bounds_payload() {
        let set = set_with(&[IconResolution::Px16]);
        let mut bytes = encode(&set).unwrap();
        // Corrupt the entry's length field
        let len_at = HEADER_LEN + 8;
        bytes[len_at..len_at + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            IcoDirectory::parse(&bytes).unwrap_err(),
            ForgeError::MalformedIco(_)
        ));
    }
}
