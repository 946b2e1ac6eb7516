//! Layout constants for the diff viewer.

/// Tunable constants used by every view computation.
///
/// The defaults reproduce the stock diff page styling. Override individual
/// values with the builder setters.
///
/// ```
/// use zendiff::DiffConfig;
///
/// let config = DiffConfig::default().frame_border(0.0);
/// assert_eq!(config.side_by_side_gutter, 24.0);
/// assert_eq!(config.frame_border, 0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffConfig {
    /// Horizontal space reserved around the two side-by-side columns.
    pub side_by_side_gutter: f64,
    /// Horizontal space reserved around the stacked swipe/overlay views.
    pub stacked_gutter: f64,
    /// Total border added to each frame, per axis (1px on each side).
    pub frame_border: f64,
    /// Vertical margin around each side-by-side frame.
    pub side_by_side_margin: f64,
    /// Extra height given to the swipe frame beyond the scaled max box.
    pub swipe_extra_height: f64,
    /// Extra height for absolutely-positioned overlay controls.
    pub overlay_extra_height: f64,
    /// Width subtracted from the enclosing file box to get the container width.
    pub container_inset: f64,
    /// Lower bound for the container width.
    pub min_container_width: f64,
    /// Fallback edge length for SVGs without intrinsic dimensions.
    pub svg_default_size: f64,
    /// Rendered SVG sizes at or above this are considered bogus.
    pub svg_max_size: f64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            side_by_side_gutter: 24.0,
            stacked_gutter: 12.0,
            frame_border: 2.0,
            side_by_side_margin: 10.0,
            swipe_extra_height: 4.0,
            overlay_extra_height: 20.0,
            container_inset: 300.0,
            min_container_width: 100.0,
            svg_default_size: 300.0,
            svg_max_size: 99999.0,
        }
    }
}

impl DiffConfig {
    /// Set the side-by-side gutter.
    pub fn side_by_side_gutter(mut self, px: f64) -> Self {
        self.side_by_side_gutter = px;
        self
    }

    /// Set the swipe/overlay gutter.
    pub fn stacked_gutter(mut self, px: f64) -> Self {
        self.stacked_gutter = px;
        self
    }

    /// Set the frame border.
    pub fn frame_border(mut self, px: f64) -> Self {
        self.frame_border = px;
        self
    }

    /// Set the container inset and minimum width.
    pub fn container(mut self, inset: f64, min_width: f64) -> Self {
        self.container_inset = inset;
        self.min_container_width = min_width;
        self
    }

    /// Set the SVG fallback edge length.
    pub fn svg_default_size(mut self, px: f64) -> Self {
        self.svg_default_size = px;
        self
    }

    /// Width available to the diff views inside a file box of `file_box_width`.
    ///
    /// The diff container itself may be hidden (collapsed "viewed" files), so
    /// the enclosing box is the reference.
    pub fn container_width(&self, file_box_width: f64) -> f64 {
        (file_box_width - self.container_inset).max(self.min_container_width)
    }
}
