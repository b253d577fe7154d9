//! Derived sizes and scales.
//!
//! Everything here is a pure function of the options, the tree and the
//! container width, so recomputing with unchanged inputs gives identical
//! output.

use crate::options::{AxisPosition, Options, Width};
use crate::scale::{BandScale, LinearScale};
use crate::tree::Tree;

/// The label column needs at least this much room for bars next to it.
const MIN_BARS_WIDTH: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub min_width: f64,
    /// Resolved total width.
    pub width: f64,
    /// `width` minus the label column.
    pub content_width: f64,
    /// `content_width` minus the horizontal margins.
    pub bars_width: f64,
    pub row_count: usize,
    pub bars_height: f64,
    /// `bars_height` plus the vertical margins.
    pub content_height: f64,
    /// Total height including the axis.
    pub height: f64,
    /// Vertical offset of the rows, labels and content layers.
    pub content_top: f64,
    /// Vertical offset of the axis.
    pub axis_top: f64,
    /// Time to x within the bars area. `None` until there is something to show.
    pub time: Option<LinearScale>,
    /// Row index to a padded band, used for bars and labels.
    pub row: BandScale,
    /// Row index to an unpadded band, used for row backgrounds and hit tests.
    pub full_row: BandScale,
}

impl Geometry {
    pub fn compute(options: &Options, tree: &Tree, container_width: f64) -> Self {
        let min_width = options.labels_width + MIN_BARS_WIDTH;
        let requested = match options.width {
            Width::Fixed(w) => w,
            Width::Auto => container_width,
        };
        let width = requested.max(min_width);
        let content_width = width - options.labels_width;
        let bars_width = content_width - options.content_margin.horizontal_total();

        let row_count = if options.resize_on_collapse {
            tree.visible_count()
        } else {
            tree.len()
        };
        let pitch = options.row_height + options.row_spacing;
        let bars_height = pitch * row_count as f64;
        let content_height = bars_height + options.content_margin.vertical_total();
        let height = options.axis_height + content_height;

        let (content_top, axis_top) = match options.axis_position {
            AxisPosition::Top => (options.axis_height, options.axis_height),
            AxisPosition::Bottom => (0.0, content_height),
        };

        let domain = match options.range {
            Some(range) => Some(range),
            None => tree.extent(),
        };
        let time = domain.map(|d| LinearScale::new(d, [0.0, bars_width]).clamped(true));

        let padding = if pitch > 0.0 {
            options.row_spacing / pitch
        } else {
            0.0
        };
        let row = BandScale::round_bands(row_count, [0.0, bars_height], padding, padding / 2.0);
        let full_row = BandScale::round_bands(row_count, [0.0, bars_height], 0.0, 0.0);

        Self {
            min_width,
            width,
            content_width,
            bars_width,
            row_count,
            bars_height,
            content_height,
            height,
            content_top,
            axis_top,
            time,
            row,
            full_row,
        }
    }

    /// Time scale, or an identity-like placeholder over the bars width.
    pub fn time_or_default(&self) -> LinearScale {
        self.time
            .unwrap_or_else(|| LinearScale::new([0.0, 1.0], [0.0, self.bars_width]).clamped(true))
    }
}
