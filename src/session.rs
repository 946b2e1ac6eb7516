//! Load coordination for one diff container.
//!
//! A diff shows an "after" and a "before" image; either may be absent (added
//! or deleted files). Each present image is fetched, optionally resized when
//! it is an SVG without intrinsic dimensions, and then loaded or failed.
//! Views are only laid out once both slots have settled.
//!
//! # Example
//!
//! ```
//! use zendiff::{DiffConfig, Session, Side, Size};
//!
//! let mut session = Session::new(1324.0, true, true, DiffConfig::default());
//! assert!(session.views().is_none());
//!
//! session.loaded(Side::After, Size::new(800.0, 600.0));
//! session.failed(Side::Before);
//! assert_eq!(session.bounds_info(Side::Before).text(), Some("(image error)"));
//!
//! let views = session.views().unwrap();
//! assert_eq!(views.side_by_side.after.unwrap().image, Size::new(500.0, 375.0));
//! assert!(views.swipe.is_some());
//! ```

use crate::config::DiffConfig;
use crate::geometry::{LayoutContext, Size};
use crate::view::{DimensionLabels, OverlayLayout, SideBySideLayout, SwipeLayout};

/// Inline text shown in place of the dimensions when an image fails to load.
pub const IMAGE_ERROR_TEXT: &str = "(image error)";

/// Which of the two compared images.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The new version.
    After,
    /// The old version.
    Before,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::After => 0,
            Side::Before => 1,
        }
    }
}

/// Load state of one image slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SlotState {
    /// No image element on this side.
    Absent,
    /// Waiting for the image to load.
    Pending,
    /// Loaded with its natural size.
    Loaded(Size),
    /// Load failed; the image measures `0×0` unless an SVG fallback size was
    /// already assigned.
    Failed,
}

impl SlotState {
    /// Whether this slot no longer blocks layout.
    pub fn is_settled(&self) -> bool {
        !matches!(self, SlotState::Pending)
    }
}

/// What the dimensions label next to an image shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundsInfo {
    /// The regular width/height label.
    Dimensions,
    /// Hidden, because an SVG fallback size replaced the dimensions.
    Hidden,
    /// An inline error message.
    Error,
}

impl BoundsInfo {
    /// Text replacing the label, if any.
    pub fn text(&self) -> Option<&'static str> {
        match self {
            BoundsInfo::Error => Some(IMAGE_ERROR_TEXT),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Slot {
    state: SlotState,
    /// Explicit size assigned from SVG fallback bounds.
    display_override: Option<Size>,
    bounds_info: BoundsInfo,
}

impl Slot {
    fn new(present: bool) -> Self {
        Self {
            state: if present {
                SlotState::Pending
            } else {
                SlotState::Absent
            },
            display_override: None,
            bounds_info: BoundsInfo::Dimensions,
        }
    }

    /// Size the image is laid out at, or `None` if there is no image.
    fn display_size(&self) -> Option<Size> {
        match self.state {
            SlotState::Absent => None,
            SlotState::Pending => Some(Size::ZERO),
            SlotState::Failed => Some(self.display_override.unwrap_or(Size::ZERO)),
            SlotState::Loaded(natural) => Some(self.display_override.unwrap_or(natural)),
        }
    }

    fn natural_size(&self) -> Option<Size> {
        match self.state {
            SlotState::Absent => None,
            SlotState::Pending | SlotState::Failed => Some(Size::ZERO),
            SlotState::Loaded(natural) => Some(natural),
        }
    }
}

/// Layouts for every view that applies to a settled session.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffViews {
    /// Always present.
    pub side_by_side: SideBySideLayout,
    /// Present only when both images exist.
    pub swipe: Option<SwipeLayout>,
    /// Present only when both images exist.
    pub overlay: Option<OverlayLayout>,
    /// Natural-size labels for the side-by-side view.
    pub labels: DimensionLabels,
}

/// Two-slot load coordinator for one diff container.
#[derive(Clone, Debug)]
pub struct Session {
    config: DiffConfig,
    container_width: f64,
    slots: [Slot; 2],
}

impl Session {
    /// Start a session inside a file box of `file_box_width` pixels.
    ///
    /// `after`/`before` say whether each side has an image element.
    pub fn new(file_box_width: f64, after: bool, before: bool, config: DiffConfig) -> Self {
        let container_width = config.container_width(file_box_width);
        log::debug!(
            target: "zendiff::session",
            "new session: container {container_width}px, after={after}, before={before}"
        );
        Self {
            config,
            container_width,
            slots: [Slot::new(after), Slot::new(before)],
        }
    }

    /// Width available to the views.
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Layout constants in use.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Current state of one side.
    pub fn state(&self, side: Side) -> SlotState {
        self.slots[side.index()].state
    }

    /// What the dimensions label of one side shows.
    pub fn bounds_info(&self, side: Side) -> BoundsInfo {
        self.slots[side.index()].bounds_info
    }

    /// Explicit size assigned to one side from SVG fallback bounds.
    pub fn display_override(&self, side: Side) -> Option<Size> {
        self.slots[side.index()].display_override
    }

    fn pending_slot(&mut self, side: Side, event: &str) -> Option<&mut Slot> {
        let slot = &mut self.slots[side.index()];
        if slot.state == SlotState::Pending {
            Some(slot)
        } else {
            log::warn!(
                target: "zendiff::session",
                "ignoring {event} for {side:?}: slot is {:?}",
                slot.state
            );
            None
        }
    }

    /// The image bytes for `side` arrived.
    ///
    /// SVG responses without intrinsic dimensions get a fallback display size;
    /// `rendered` is what the browser reports for the standalone image. Returns
    /// the assigned override, if any.
    #[cfg(feature = "svg")]
    pub fn fetched(
        &mut self,
        side: Side,
        content_type: Option<&str>,
        body: &[u8],
        rendered: Option<Size>,
    ) -> Option<Size> {
        let config = self.config;
        let slot = self.pending_slot(side, "fetch")?;
        if !content_type.is_some_and(crate::svg::is_svg_content_type) {
            return None;
        }
        match crate::svg::svg_default_bounds(body, rendered, &config) {
            Ok(Some(bounds)) => {
                log::trace!(target: "zendiff::session", "{side:?}: svg fallback {bounds:?}");
                slot.display_override = Some(bounds);
                slot.bounds_info = BoundsInfo::Hidden;
                Some(bounds)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!(target: "zendiff::session", "{side:?}: cannot size svg: {e}");
                None
            }
        }
    }

    /// The image for `side` finished loading at its natural size.
    pub fn loaded(&mut self, side: Side, natural: Size) {
        if let Some(slot) = self.pending_slot(side, "load") {
            slot.state = SlotState::Loaded(natural);
            log::trace!(target: "zendiff::session", "{side:?} loaded at {natural:?}");
        }
    }

    /// The image for `side` failed to load.
    ///
    /// A label already hidden by an SVG fallback size stays hidden.
    pub fn failed(&mut self, side: Side) {
        if let Some(slot) = self.pending_slot(side, "error") {
            slot.state = SlotState::Failed;
            if slot.bounds_info != BoundsInfo::Hidden {
                slot.bounds_info = BoundsInfo::Error;
            }
            log::debug!(target: "zendiff::session", "{side:?} failed to load");
        }
    }

    /// Whether both slots have settled.
    pub fn is_ready(&self) -> bool {
        self.slots.iter().all(|s| s.state.is_settled())
    }

    /// Lay out every applicable view, once the session is ready.
    pub fn views(&self) -> Option<DiffViews> {
        if !self.is_ready() {
            return None;
        }
        let [after, before] = &self.slots;
        let ctx = LayoutContext::new(after.display_size(), before.display_size());
        let width = self.container_width;
        let both = after.state != SlotState::Absent && before.state != SlotState::Absent;
        Some(DiffViews {
            side_by_side: SideBySideLayout::compute(&ctx, width, &self.config),
            swipe: both.then(|| SwipeLayout::compute(&ctx, width, &self.config)),
            overlay: both.then(|| OverlayLayout::compute(&ctx, width, &self.config)),
            labels: DimensionLabels::new(after.natural_size(), before.natural_size()),
        })
    }
}
