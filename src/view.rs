//! Per-mode layout of the three comparison views.
//!
//! Each view scales both images by one uniform factor so the larger image
//! fits the available width, then wraps each image in a bordered frame.
//! Side-by-side places the frames next to each other; swipe and overlay
//! stack them, so those two also shift the smaller image to the center of
//! the shared bounding box.
//!
//! # Example
//!
//! ```
//! use zendiff::{DiffConfig, LayoutContext, Size, view::{OverlayLayout, SideBySideLayout}};
//!
//! let config = DiffConfig::default();
//! let ctx = LayoutContext::new(Some(Size::new(1000.0, 500.0)), Some(Size::new(600.0, 600.0)));
//!
//! // Each column gets (524 - 24) / 2 = 250px.
//! let sbs = SideBySideLayout::compute(&ctx, 524.0, &config);
//! assert_eq!(sbs.factor, 0.25);
//! let after = sbs.after.unwrap();
//! assert_eq!(after.image, Size::new(250.0, 125.0));
//! assert_eq!(after.frame, Size::new(252.0, 127.0));
//!
//! // Stacked views only lose 12px, so they scale less.
//! let overlay = OverlayLayout::compute(&ctx, 524.0, &config);
//! assert_eq!(overlay.factor, 512.0 / 1000.0);
//! ```

use core::fmt;

use crate::config::DiffConfig;
use crate::geometry::{LayoutContext, Size};

/// Presentation mode for comparing two images.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewMode {
    /// Two columns next to each other.
    SideBySide,
    /// Stacked, with a draggable divider revealing the second image.
    Swipe,
    /// Stacked, with the first image faded over the second.
    Overlay,
}

impl ViewMode {
    /// All modes in display order.
    pub const ALL: [ViewMode; 3] = [ViewMode::SideBySide, ViewMode::Swipe, ViewMode::Overlay];

    /// Widest a single image may be drawn in this mode.
    pub fn max_image_width(self, container_width: f64, config: &DiffConfig) -> f64 {
        let bound = match self {
            ViewMode::SideBySide => (container_width - config.side_by_side_gutter) / 2.0,
            ViewMode::Swipe | ViewMode::Overlay => container_width - config.stacked_gutter,
        };
        bound.max(0.0)
    }

    /// Uniform scale factor for a pair whose wider image is `max_width` pixels.
    ///
    /// Never upscales: the result is `min(1, bound / max_width)`, and `1.0`
    /// for a zero-width pair.
    pub fn scale_factor(self, max_width: f64, container_width: f64, config: &DiffConfig) -> f64 {
        let bound = self.max_image_width(container_width, config);
        if max_width > bound {
            bound / max_width
        } else {
            1.0
        }
    }
}

/// A CSS length that is either a pixel amount or `auto`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Length {
    /// Pixels.
    Px(f64),
    /// `auto`.
    Auto,
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Auto => f.write_str("auto"),
        }
    }
}

/// Two-value CSS margin: vertical then horizontal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    /// Top and bottom.
    pub vertical: Length,
    /// Left and right.
    pub horizontal: Length,
}

impl Margin {
    /// Pixel margin on both axes.
    pub fn px(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical: Length::Px(vertical),
            horizontal: Length::Px(horizontal),
        }
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vertical, self.horizontal)
    }
}

/// A scaled image and the bordered frame around it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameLayout {
    /// Displayed image size.
    pub image: Size,
    /// Frame size: image plus border.
    pub frame: Size,
    /// Margin around the frame.
    pub margin: Margin,
}

impl FrameLayout {
    fn new(image: Size, config: &DiffConfig, margin: Margin) -> Self {
        Self {
            image,
            frame: image.grow(config.frame_border),
            margin,
        }
    }
}

// ============================================================================
// Side-by-side
// ============================================================================

/// Two frames next to each other, horizontally centered in their columns.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideBySideLayout {
    /// Uniform scale factor, `<= 1`.
    pub factor: f64,
    /// First ("after") image; `None` when there is no such image.
    pub after: Option<FrameLayout>,
    /// Second ("before") image; `None` when there is no such image.
    pub before: Option<FrameLayout>,
}

impl SideBySideLayout {
    /// Compute the side-by-side layout.
    pub fn compute(ctx: &LayoutContext, container_width: f64, config: &DiffConfig) -> Self {
        let factor = ViewMode::SideBySide.scale_factor(ctx.max.width, container_width, config);
        let margin = Margin {
            vertical: Length::Px(config.side_by_side_margin),
            horizontal: Length::Auto,
        };
        Self {
            factor,
            after: ctx
                .present1
                .then(|| FrameLayout::new(ctx.size1.scale(factor), config, margin)),
            before: ctx
                .present2
                .then(|| FrameLayout::new(ctx.size2.scale(factor), config, margin)),
        }
    }
}

// ============================================================================
// Swipe
// ============================================================================

/// Wrapper around the first swipe frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeAfterContainer {
    /// Top padding that centers the first image vertically.
    pub padding_top: f64,
    /// Container width.
    pub width: f64,
}

/// Both images stacked; the divider reveals the second one.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeLayout {
    /// Uniform scale factor, `<= 1`.
    pub factor: f64,
    /// First ("after") image; centered horizontally by margin.
    pub after: FrameLayout,
    /// Container of the first frame; centers it vertically by padding.
    pub after_container: SwipeAfterContainer,
    /// Second ("before") image; centered on both axes by margin.
    pub before: FrameLayout,
    /// Container of the second frame.
    pub before_container: Size,
    /// Outer swipe frame.
    pub frame: Size,
}

impl SwipeLayout {
    /// Compute the swipe layout.
    pub fn compute(ctx: &LayoutContext, container_width: f64, config: &DiffConfig) -> Self {
        let factor = ViewMode::Swipe.scale_factor(ctx.max.width, container_width, config);
        let o = ctx.offsets;
        let max = ctx.max.scale(factor);
        Self {
            factor,
            after: FrameLayout::new(ctx.size1.scale(factor), config, Margin::px(0.0, o.x1 * factor)),
            after_container: SwipeAfterContainer {
                padding_top: o.y1 * factor,
                width: max.width + config.frame_border,
            },
            before: FrameLayout::new(
                ctx.size2.scale(factor),
                config,
                Margin::px(o.y2 * factor, o.x2 * factor),
            ),
            before_container: max.grow(config.frame_border),
            frame: Size::new(
                max.width + config.frame_border,
                max.height + config.swipe_extra_height,
            ),
        }
    }
}

/// Draggable swipe divider.
///
/// The divider moves inside the swipe frame; everything right of it shows
/// the second image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeBar {
    /// Width of the swipe frame.
    pub frame_width: f64,
    /// Width of the divider handle.
    pub bar_width: f64,
    /// Frame border, excluded from travel.
    pub border: f64,
}

/// Where the divider sits after a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipePosition {
    /// Left offset of the divider within the frame.
    pub bar_left: f64,
    /// Width of the revealed second-image container.
    pub revealed_width: f64,
}

impl SwipeBar {
    /// Divider inside a frame of `frame_width`.
    pub fn new(frame_width: f64, bar_width: f64, config: &DiffConfig) -> Self {
        Self {
            frame_width,
            bar_width,
            border: config.frame_border,
        }
    }

    /// Farthest the divider can travel from the left edge.
    pub fn travel(&self) -> f64 {
        (self.frame_width - self.bar_width - self.border).max(0.0)
    }

    /// Move the divider to follow a pointer at `pointer_x` (page coordinates)
    /// over a frame whose left edge is at `frame_left`.
    pub fn drag(&self, pointer_x: f64, frame_left: f64) -> SwipePosition {
        let bar_left = (pointer_x - frame_left).min(self.travel()).max(0.0);
        SwipePosition {
            bar_left,
            revealed_width: self.frame_width - bar_left,
        }
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// Both images stacked and centered; the first fades over the second.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayLayout {
    /// Uniform scale factor, `<= 1`.
    pub factor: f64,
    /// First ("after") image.
    pub after: FrameLayout,
    /// Second ("before") image.
    pub before: FrameLayout,
    /// Outer container, tall enough for absolutely-positioned children.
    pub container: Size,
}

impl OverlayLayout {
    /// Compute the overlay layout.
    pub fn compute(ctx: &LayoutContext, container_width: f64, config: &DiffConfig) -> Self {
        let factor = ViewMode::Overlay.scale_factor(ctx.max.width, container_width, config);
        let o = ctx.offsets;
        let max = ctx.max.scale(factor);
        Self {
            factor,
            after: FrameLayout::new(
                ctx.size1.scale(factor),
                config,
                Margin::px(o.y1 * factor, o.x1 * factor),
            ),
            before: FrameLayout::new(
                ctx.size2.scale(factor),
                config,
                Margin::px(o.y2 * factor, o.x2 * factor),
            ),
            container: Size::new(
                max.width + config.frame_border,
                max.height + config.frame_border + config.overlay_extra_height,
            ),
        }
    }
}

/// Opacity of the first overlay image for a `0..=100` range slider value.
pub fn overlay_opacity(range_value: f64) -> f64 {
    if range_value.is_nan() {
        return 1.0;
    }
    (range_value / 100.0).clamp(0.0, 1.0)
}

// ============================================================================
// Dimension labels
// ============================================================================

/// How a changed dimension is highlighted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Highlight {
    /// New value (shown on the "after" image).
    Added,
    /// Old value (shown on the "before" image).
    Removed,
}

impl Highlight {
    /// Color class used by the page stylesheet.
    pub fn css_class(self) -> &'static str {
        match self {
            Highlight::Added => "green",
            Highlight::Removed => "red",
        }
    }
}

/// A single `"<n>px"` label.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionLabel {
    /// Natural pixel count.
    pub pixels: f64,
    /// Set when the dimension differs between the two images.
    pub highlight: Option<Highlight>,
}

impl fmt::Display for DimensionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.pixels)
    }
}

/// Width and height labels for one image.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsLabels {
    /// Width label.
    pub width: DimensionLabel,
    /// Height label.
    pub height: DimensionLabel,
}

/// Labels for both images of the side-by-side view.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionLabels {
    /// Labels for the "after" image, if present.
    pub after: Option<BoundsLabels>,
    /// Labels for the "before" image, if present.
    pub before: Option<BoundsLabels>,
}

impl DimensionLabels {
    /// Build labels from natural image sizes.
    ///
    /// Highlights only apply when both images are present.
    pub fn new(after: Option<Size>, before: Option<Size>) -> Self {
        let (width_changed, height_changed) = match (after, before) {
            (Some(a), Some(b)) => (a.width != b.width, a.height != b.height),
            _ => (false, false),
        };
        let labels = |size: Size, mark: Highlight| BoundsLabels {
            width: DimensionLabel {
                pixels: size.width,
                highlight: width_changed.then_some(mark),
            },
            height: DimensionLabel {
                pixels: size.height,
                highlight: height_changed.then_some(mark),
            },
        };
        Self {
            after: after.map(|s| labels(s, Highlight::Added)),
            before: before.map(|s| labels(s, Highlight::Removed)),
        }
    }
}
