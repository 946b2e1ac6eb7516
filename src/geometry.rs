//! Shared geometry for a pair of compared images.
//!
//! A [`LayoutContext`] captures both image sizes, their element-wise maximum,
//! and the offsets that center each image inside that shared bounding box.
//! Everything is in CSS pixels as `f64`. No allocation, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use zendiff::{LayoutContext, Size};
//!
//! let ctx = LayoutContext::new(Some(Size::new(200.0, 100.0)), Some(Size::new(100.0, 60.0)));
//!
//! assert_eq!(ctx.max, Size::new(200.0, 100.0));
//! // The smaller image sits 50px in from the left and 20px down.
//! assert_eq!(ctx.offsets.x2, 50.0);
//! assert_eq!(ctx.offsets.y2, 20.0);
//! ```

use num_traits::Float;

/// Width × height in CSS pixels.
///
/// Constructors never produce negative or non-finite dimensions: such values
/// collapse to `0.0`, the same as a missing dimension.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size, sanitizing each dimension.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Size of an optional image; a missing image measures `0×0`.
    pub fn of(image: Option<Size>) -> Self {
        image.map_or(Self::ZERO, |s| Self::new(s.width, s.height))
    }

    /// Element-wise maximum.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Both dimensions multiplied by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Both dimensions grown by `amount` (used for borders).
    pub fn grow(self, amount: f64) -> Self {
        Self::new(self.width + amount, self.height + amount)
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

impl From<(u32, u32)> for Size {
    fn from((w, h): (u32, u32)) -> Self {
        Self::new(f64::from(w), f64::from(h))
    }
}

/// Offsets that center each image inside the shared maximum box.
///
/// For each axis the offset is `floor(max - own) / 2`, so it is always
/// non-negative and never more than half the difference.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterOffsets {
    /// Horizontal offset of the first image.
    pub x1: f64,
    /// Vertical offset of the first image.
    pub y1: f64,
    /// Horizontal offset of the second image.
    pub x2: f64,
    /// Vertical offset of the second image.
    pub y2: f64,
}

impl CenterOffsets {
    /// Offsets as `[x1, y1, x2, y2]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Everything needed to lay out one pair of images.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutContext {
    /// First ("after") image size.
    pub size1: Size,
    /// Second ("before") image size.
    pub size2: Size,
    /// Element-wise maximum of both sizes.
    pub max: Size,
    /// Centering offsets of both images within `max`.
    pub offsets: CenterOffsets,
    /// Whether the first image exists at all.
    pub present1: bool,
    /// Whether the second image exists at all.
    pub present2: bool,
}

impl LayoutContext {
    /// Build the context from two optional image sizes.
    ///
    /// A missing image is treated as `0×0`.
    pub fn new(image1: Option<Size>, image2: Option<Size>) -> Self {
        let size1 = Size::of(image1);
        let size2 = Size::of(image2);
        let max = size2.max(size1);
        let offsets = CenterOffsets {
            x1: half_floor(max.width - size1.width),
            y1: half_floor(max.height - size1.height),
            x2: half_floor(max.width - size2.width),
            y2: half_floor(max.height - size2.height),
        };
        Self {
            size1,
            size2,
            max,
            offsets,
            present1: image1.is_some(),
            present2: image2.is_some(),
        }
    }
}

fn half_floor(diff: f64) -> f64 {
    Float::floor(diff) / 2.0
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
