//! Icon sets: the in-memory form of one identity's source rasters.
//!
//! An [`IconSet`] maps ladder resolutions to their source rasters. The map is
//! a `BTreeMap`, which gives the two invariants the packers rely on for free:
//! resolutions are unique within a set, and iteration order is deterministic
//! (smallest resolution first), so packing an unchanged set always produces
//! byte-identical output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::identity::IconIdentity;
use crate::resolution::IconResolution;

/// One source raster: a PNG at a single ladder resolution.
///
/// The raw bytes are carried verbatim from disk to container; no re-encoding
/// ever happens downstream of the scanner.
#[derive(Debug, Clone)]
pub struct IconImage {
    /// The declared (and validated) resolution.
    resolution: IconResolution,
    /// Where the raster was read from (for error messages).
    path: PathBuf,
    /// The raw PNG bytes.
    data: Vec<u8>,
}

impl IconImage {
    /// Create an icon image from its scanned parts.
    pub fn new(resolution: IconResolution, path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            resolution,
            path: path.into(),
            data,
        }
    }

    /// The resolution this raster was validated against.
    pub fn resolution(&self) -> IconResolution {
        self.resolution
    }

    /// The source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw PNG bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// An identity's ordered collection of source rasters.
#[derive(Debug, Clone)]
pub struct IconSet {
    identity: IconIdentity,
    images: BTreeMap<IconResolution, IconImage>,
}

impl IconSet {
    /// Create an empty set for an identity.
    pub fn new(identity: IconIdentity) -> Self {
        Self {
            identity,
            images: BTreeMap::new(),
        }
    }

    /// The identity this set belongs to.
    pub fn identity(&self) -> IconIdentity {
        self.identity
    }

    /// Insert a raster, returning any previous raster at the same resolution.
    pub fn insert(&mut self, image: IconImage) -> Option<IconImage> {
        self.images.insert(image.resolution(), image)
    }

    /// Insert a raster (builder pattern).
    pub fn with(mut self, image: IconImage) -> Self {
        self.insert(image);
        self
    }

    /// Get the raster at a ladder resolution.
    pub fn get(&self, resolution: IconResolution) -> Option<&IconImage> {
        self.images.get(&resolution)
    }

    /// Get the raster at a raw pixel size, if that size is on the ladder.
    pub fn get_pixels(&self, pixels: u32) -> Option<&IconImage> {
        IconResolution::from_pixels(pixels).and_then(|r| self.get(r))
    }

    /// Resolutions present in this set, smallest first.
    pub fn resolutions(&self) -> impl Iterator<Item = IconResolution> + '_ {
        self.images.keys().copied()
    }

    /// Rasters in this set, smallest resolution first.
    pub fn images(&self) -> impl Iterator<Item = &IconImage> + '_ {
        self.images.values()
    }

    /// Number of resolutions present.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True if no resolutions are present.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// A copy of this set containing only resolutions up to `max_pixels`.
    ///
    /// Container formats differ in the largest entry they can express; the
    /// pipeline uses this to hand each packer only what its format can hold.
    pub fn restricted_to_max(&self, max_pixels: u32) -> IconSet {
        IconSet {
            identity: self.identity,
            images: self
                .images
                .iter()
                .filter(|(r, _)| r.as_pixels() <= max_pixels)
                .map(|(r, img)| (*r, img.clone()))
                .collect(),
        }
    }
}
