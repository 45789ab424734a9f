//! The fixed ladder of icon resolutions.
//!
//! Source rasters are expected at a fixed set of square pixel sizes covering
//! desktop conventions on both target platforms, from 16x16 list entries up
//! to 512x512 high-resolution application icons.

use std::fmt;

/// A square icon resolution from the fixed ladder.
///
/// Resolutions are ordered by pixel size, so collections keyed by
/// `IconResolution` iterate smallest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum IconResolution {
    /// 16x16 - list views and small taskbar entries
    Px16 = 16,
    /// 24x24 - small toolbar contexts
    Px24 = 24,
    /// 32x32 - standard desktop icons
    Px32 = 32,
    /// 48x48 - large desktop icons
    Px48 = 48,
    /// 64x64 - retina variant of 32x32
    Px64 = 64,
    /// 128x128 - dock and folder previews
    Px128 = 128,
    /// 256x256 - the largest size an ICO directory can express
    Px256 = 256,
    /// 512x512 - high-resolution application icons
    Px512 = 512,
}

impl IconResolution {
    /// Get the resolution in pixels.
    pub fn as_pixels(self) -> u32 {
        self as u32
    }

    /// Convert a pixel count to a ladder resolution.
    ///
    /// Returns `None` if the value is not on the ladder.
    pub fn from_pixels(pixels: u32) -> Option<Self> {
        match pixels {
            16 => Some(IconResolution::Px16),
            24 => Some(IconResolution::Px24),
            32 => Some(IconResolution::Px32),
            48 => Some(IconResolution::Px48),
            64 => Some(IconResolution::Px64),
            128 => Some(IconResolution::Px128),
            256 => Some(IconResolution::Px256),
            512 => Some(IconResolution::Px512),
            _ => None,
        }
    }

    /// The resolution at double this pixel size, if it is on the ladder.
    ///
    /// Used to pair a base size with its `@2x` companion when staging an
    /// iconset directory.
    pub fn doubled(self) -> Option<Self> {
        Self::from_pixels(self.as_pixels() * 2)
    }

    /// The full ladder, smallest first.
    pub fn ladder() -> &'static [IconResolution] {
        &[
            IconResolution::Px16,
            IconResolution::Px24,
            IconResolution::Px32,
            IconResolution::Px48,
            IconResolution::Px64,
            IconResolution::Px128,
            IconResolution::Px256,
            IconResolution::Px512,
        ]
    }
}

impl fmt::Display for IconResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let px = self.as_pixels();
        write!(f, "{}x{}", px, px)
    }
}
