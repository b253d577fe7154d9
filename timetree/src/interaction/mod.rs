//! Pointer handling: hover, scrub, click-select, collapse and brush.

pub mod brush;
pub mod hit;
pub mod hover;
pub mod scrub;

pub use brush::Brush;

use crate::event::{Notification, PointerEvent, Selected};
use crate::geometry::Geometry;
use crate::options::Options;
use crate::scene::Scene;
use crate::tree::Tree;

/// What the owner of the tree has to do after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Tree index of the node whose collapse circle was clicked.
    pub toggle: Option<usize>,
    pub notifications: Vec<Notification>,
}

/// Pointer state that lives across events.
#[derive(Debug, Default)]
pub struct Controller {
    brush: Brush,
    selection: Vec<Selected>,
    brush_range: Option<[f64; 2]>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &[Selected] {
        &self.selection
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn brush_range(&self) -> Option<[f64; 2]> {
        self.brush_range
    }

    /// Drop the brush, including a drag in progress. Returns whether a
    /// range was published before.
    pub fn clear_brush(&mut self) -> bool {
        self.brush.clear();
        self.brush_range.take().is_some()
    }

    /// Route one pointer event. `event` is in widget coordinates.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        scene: &mut Scene,
        options: &Options,
        geometry: &Geometry,
        tree: &Tree,
    ) -> Response {
        let (x, y) = event.position();
        let cx = x - options.labels_width;
        let cy = y - geometry.content_top;
        let in_rows = (0.0..=geometry.content_height).contains(&cy);
        log::trace!("pointer: {event:?} content=({cx}, {cy})");

        let mut response = Response::default();
        match event {
            PointerEvent::Move { .. } => {
                if options.brushable && self.brush.drag(cx, geometry.bars_width) {
                    self.publish_brush(scene, options, geometry, &mut response);
                }
                if in_rows {
                    if options.selectable {
                        hover::highlight(scene, cy);
                    }
                    if options.scrubbable && (0.0..=geometry.content_width).contains(&cx) {
                        scrub::scrub(scene, options, geometry, cx);
                    }
                }
            }
            PointerEvent::Down { .. } => {
                if options.brushable && in_rows && (0.0..=geometry.bars_width).contains(&cx) {
                    self.brush.begin(cx, geometry.bars_width);
                    self.publish_brush(scene, options, geometry, &mut response);
                }
            }
            PointerEvent::Up { .. } => {
                self.brush.end();
            }
            PointerEvent::Click { .. } => {
                if options.collapsable {
                    response.toggle = hit::circle_at(scene, x, cy)
                        .and_then(|pos| tree.flatten().get(pos).map(|n| n.index));
                }
                if options.selectable {
                    self.selection = hover::select(scene, tree, cy);
                    response
                        .notifications
                        .push(Notification::SelectionChanged(self.selection.clone()));
                }
            }
        }
        response
    }

    /// Redraw the overlay and publish the brushed time range.
    fn publish_brush(&mut self, scene: &mut Scene, options: &Options, geometry: &Geometry, response: &mut Response) {
        brush::sync(scene, options, geometry, &self.brush);
        self.brush_range = geometry.time.and_then(|time| self.brush.range(&time));
        log::debug!("brush: {:?}", self.brush_range);
        response
            .notifications
            .push(Notification::BrushChanged(self.brush_range));
    }
}
