pub mod component;
pub mod error;
pub mod event;
pub mod format;
pub mod geometry;
pub mod interaction;
pub mod options;
pub mod render;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod tree;

pub use component::TimeTree;
pub use error::{TransformError, TreeError, MAX_DEPTH};
pub use event::{Notification, PointerEvent, Selected};
pub use format::{DurationFormatter, Monospace, TextMeasure, TimeFormatter};
pub use geometry::Geometry;
pub use options::{AxisPosition, LabelAlign, Margin, Options, Width};
pub use render::{render, RenderReport};
pub use scale::{BandScale, LinearScale};
pub use scene::{Element, Layer, Length, Scene, Shape, TextAnchor, Translate};
pub use svg::to_svg;
pub use tree::{ChildState, EventRecord, FlatNode, Link, RecordId, Section, Tree, TreeNode};
