//! Widget configuration.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::format::{DurationFormatter, Monospace, TextMeasure, TimeFormatter};

/// Total widget width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Width {
    Fixed(f64),
    /// Fill the container the widget is attached to.
    Auto,
}

impl Default for Width {
    fn default() -> Self {
        Self::Fixed(750.0)
    }
}

impl<'de> Deserialize<'de> for Width {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::Fixed(n)),
            Raw::Text(s) if s == "auto" => Ok(Self::Auto),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"auto\", got \"{s}\""
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Top,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    #[default]
    Left,
    Right,
}

/// Inset applied to the bars area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal_total(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical_total(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Every settable property of the widget.
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub width: Width,
    pub row_height: f64,
    pub row_spacing: f64,
    /// Width of the label column. Zero removes labels, links and circles.
    pub labels_width: f64,
    pub axis_height: f64,
    pub axis_position: AxisPosition,
    /// Per-depth label offset. Zero disables link lines.
    pub indent_size: f64,
    pub label_align: LabelAlign,

    pub collapsable: bool,
    pub scrubbable: bool,
    pub selectable: bool,
    pub brushable: bool,
    pub show_labels: bool,
    pub show_links: bool,
    /// Size rows to the visible nodes rather than the whole input.
    pub resize_on_collapse: bool,

    /// Explicit `[min, max]` time domain.
    pub range: Option<[f64; 2]>,
    pub content_margin: Margin,

    #[serde(skip)]
    pub duration_formatter: DurationFormatter,
    #[serde(skip)]
    pub time_formatter: TimeFormatter,
    #[serde(skip, default = "default_measure")]
    pub text_measure: Arc<dyn TextMeasure>,
}

fn default_measure() -> Arc<dyn TextMeasure> {
    Arc::new(Monospace::default())
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: Width::default(),
            row_height: 15.0,
            row_spacing: 10.0,
            labels_width: 200.0,
            axis_height: 20.0,
            axis_position: AxisPosition::Bottom,
            indent_size: 20.0,
            label_align: LabelAlign::Left,
            collapsable: true,
            scrubbable: true,
            selectable: true,
            brushable: false,
            show_labels: true,
            show_links: true,
            resize_on_collapse: false,
            range: None,
            content_margin: Margin::default(),
            duration_formatter: DurationFormatter::default(),
            time_formatter: TimeFormatter::default(),
            text_measure: default_measure(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("width", &self.width)
            .field("row_height", &self.row_height)
            .field("row_spacing", &self.row_spacing)
            .field("labels_width", &self.labels_width)
            .field("axis_height", &self.axis_height)
            .field("axis_position", &self.axis_position)
            .field("indent_size", &self.indent_size)
            .field("label_align", &self.label_align)
            .field("collapsable", &self.collapsable)
            .field("scrubbable", &self.scrubbable)
            .field("selectable", &self.selectable)
            .field("brushable", &self.brushable)
            .field("show_labels", &self.show_labels)
            .field("show_links", &self.show_links)
            .field("resize_on_collapse", &self.resize_on_collapse)
            .field("range", &self.range)
            .field("content_margin", &self.content_margin)
            .finish_non_exhaustive()
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact overview strip: thin rows, no label column, brushing only.
    pub fn brush_preset() -> Self {
        Self {
            row_height: 4.0,
            row_spacing: 2.0,
            labels_width: 0.0,
            collapsable: false,
            scrubbable: false,
            selectable: false,
            show_labels: false,
            brushable: true,
            ..Default::default()
        }
    }

    pub fn width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn row_spacing(mut self, row_spacing: f64) -> Self {
        self.row_spacing = row_spacing;
        self
    }

    pub fn labels_width(mut self, labels_width: f64) -> Self {
        self.labels_width = labels_width;
        self
    }

    pub fn axis_height(mut self, axis_height: f64) -> Self {
        self.axis_height = axis_height;
        self
    }

    pub fn axis_position(mut self, axis_position: AxisPosition) -> Self {
        self.axis_position = axis_position;
        self
    }

    pub fn indent_size(mut self, indent_size: f64) -> Self {
        self.indent_size = indent_size;
        self
    }

    pub fn label_align(mut self, label_align: LabelAlign) -> Self {
        self.label_align = label_align;
        self
    }

    pub fn collapsable(mut self, collapsable: bool) -> Self {
        self.collapsable = collapsable;
        self
    }

    pub fn scrubbable(mut self, scrubbable: bool) -> Self {
        self.scrubbable = scrubbable;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn brushable(mut self, brushable: bool) -> Self {
        self.brushable = brushable;
        self
    }

    pub fn show_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    pub fn show_links(mut self, show_links: bool) -> Self {
        self.show_links = show_links;
        self
    }

    pub fn resize_on_collapse(mut self, resize_on_collapse: bool) -> Self {
        self.resize_on_collapse = resize_on_collapse;
        self
    }

    pub fn range(mut self, range: [f64; 2]) -> Self {
        self.range = Some(range);
        self
    }

    pub fn content_margin(mut self, margin: Margin) -> Self {
        self.content_margin = margin;
        self
    }

    pub fn duration_formatter(mut self, formatter: DurationFormatter) -> Self {
        self.duration_formatter = formatter;
        self
    }

    pub fn time_formatter(mut self, formatter: TimeFormatter) -> Self {
        self.time_formatter = formatter;
        self
    }

    pub fn text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.text_measure = Arc::new(measure);
        self
    }

    /// Whether link lines are drawn: needs a label column and an indent.
    pub fn draws_links(&self) -> bool {
        self.show_links && self.indent_size > 0.0 && self.labels_width > 0.0
    }
}
