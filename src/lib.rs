//! Image diff layout computation: side-by-side, swipe, and overlay views.
//!
//! Pure geometry — no pixel operations, no DOM, `no_std` compatible core.
//! The caller measures images, feeds sizes in, and applies the resulting
//! sizes and margins as styling.
//!
//! # Modules
//!
//! - [`geometry`] — Image sizes, shared bounding box, centering offsets
//! - [`view`] — Scale factors and per-mode layouts, swipe divider, overlay opacity, labels
//! - [`config`] — Layout constants
//! - [`session`] — Two-image load coordination
//! - [`svg`] — Fallback sizing for SVGs without intrinsic dimensions (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod config;
pub mod geometry;
pub mod session;
#[cfg(feature = "svg")]
pub mod svg;
pub mod view;

pub use config::DiffConfig;
pub use geometry::{CenterOffsets, LayoutContext, Size};
pub use session::{BoundsInfo, DiffViews, IMAGE_ERROR_TEXT, Session, Side, SlotState};
pub use view::{
    DimensionLabels, FrameLayout, Highlight, Margin, OverlayLayout, SideBySideLayout, SwipeBar,
    SwipeLayout, ViewMode, overlay_opacity,
};
