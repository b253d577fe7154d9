//! The widget: owns the content, derived tree and geometry, and the scene.

use std::collections::VecDeque;

use tokio::sync::watch;

use crate::error::TreeError;
use crate::event::{Notification, PointerEvent, Selected};
use crate::format::{DurationFormatter, TimeFormatter};
use crate::geometry::Geometry;
use crate::interaction::{brush, scrub, Controller};
use crate::options::{AxisPosition, LabelAlign, Margin, Options, Width};
use crate::render::{self, RenderReport};
use crate::scene::Scene;
use crate::svg;
use crate::tree::{EventRecord, RecordId, Tree};

/// Pending work, consumed by [`TimeTree::update`].
#[derive(Debug, Clone, Copy, Default)]
struct Dirty {
    /// Content replaced: rebuild the tree.
    content: bool,
    /// Options or container width changed: recompute geometry.
    layout: bool,
}

impl Dirty {
    fn any(&self) -> bool {
        self.content || self.layout
    }
}

/// A time-tree widget.
///
/// Setters only record what changed. Call [`update`](Self::update) once per
/// host frame to rebuild and render everything that is pending in one pass.
#[derive(Debug)]
pub struct TimeTree {
    options: Options,
    content: Vec<EventRecord>,
    tree: Tree,
    geometry: Geometry,
    scene: Scene,
    controller: Controller,
    container: Option<watch::Receiver<f64>>,
    container_width: f64,
    dirty: Dirty,
    render_count: usize,
    last_report: RenderReport,
    notifications: VecDeque<Notification>,
}

impl Default for TimeTree {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl TimeTree {
    pub fn new(options: Options) -> Self {
        let tree = Tree::default();
        let geometry = Geometry::compute(&options, &tree, 0.0);
        Self {
            options,
            content: Vec::new(),
            tree,
            geometry,
            scene: Scene::new(),
            controller: Controller::new(),
            container: None,
            container_width: 0.0,
            dirty: Dirty {
                content: false,
                layout: true,
            },
            render_count: 0,
            last_report: RenderReport::default(),
            notifications: VecDeque::new(),
        }
    }

    // Getters

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn content(&self) -> &[EventRecord] {
        &self.content
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &[Selected] {
        self.controller.selection()
    }

    pub fn brush_range(&self) -> Option<[f64; 2]> {
        self.controller.brush_range()
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn last_report(&self) -> RenderReport {
        self.last_report
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.any()
    }

    /// The current scene as an SVG document.
    pub fn to_svg(&self) -> String {
        svg::to_svg(&self.scene)
    }

    // Setters

    /// Replace the input records. The next update rebuilds the tree, which
    /// expands every node again.
    pub fn set_content(&mut self, content: Vec<EventRecord>) {
        self.content = content;
        self.dirty.content = true;
    }

    /// Replace every option at once.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
        self.dirty.layout = true;
        if !self.options.brushable {
            self.clear_brush();
        }
    }

    pub fn set_width(&mut self, width: Width) {
        self.options.width = width;
        self.dirty.layout = true;
    }

    pub fn set_row_height(&mut self, row_height: f64) {
        self.options.row_height = row_height;
        self.dirty.layout = true;
    }

    pub fn set_row_spacing(&mut self, row_spacing: f64) {
        self.options.row_spacing = row_spacing;
        self.dirty.layout = true;
    }

    pub fn set_labels_width(&mut self, labels_width: f64) {
        self.options.labels_width = labels_width;
        self.dirty.layout = true;
    }

    pub fn set_axis_height(&mut self, axis_height: f64) {
        self.options.axis_height = axis_height;
        self.dirty.layout = true;
    }

    pub fn set_axis_position(&mut self, axis_position: AxisPosition) {
        self.options.axis_position = axis_position;
        self.dirty.layout = true;
    }

    pub fn set_indent_size(&mut self, indent_size: f64) {
        self.options.indent_size = indent_size;
        self.dirty.layout = true;
    }

    pub fn set_label_align(&mut self, label_align: LabelAlign) {
        self.options.label_align = label_align;
        self.dirty.layout = true;
    }

    pub fn set_collapsable(&mut self, collapsable: bool) {
        self.options.collapsable = collapsable;
        self.dirty.layout = true;
    }

    pub fn set_scrubbable(&mut self, scrubbable: bool) {
        self.options.scrubbable = scrubbable;
        self.dirty.layout = true;
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.options.selectable = selectable;
        self.dirty.layout = true;
    }

    /// Turning brushing off also drops the current brush and any drag.
    pub fn set_brushable(&mut self, brushable: bool) {
        self.options.brushable = brushable;
        self.dirty.layout = true;
        if !brushable {
            self.clear_brush();
        }
    }

    fn clear_brush(&mut self) {
        if self.controller.clear_brush() {
            self.notifications.push_back(Notification::BrushChanged(None));
        }
    }

    pub fn set_show_labels(&mut self, show_labels: bool) {
        self.options.show_labels = show_labels;
        self.dirty.layout = true;
    }

    pub fn set_show_links(&mut self, show_links: bool) {
        self.options.show_links = show_links;
        self.dirty.layout = true;
    }

    pub fn set_resize_on_collapse(&mut self, resize_on_collapse: bool) {
        self.options.resize_on_collapse = resize_on_collapse;
        self.dirty.layout = true;
    }

    /// Pin the time domain, or `None` to follow the content.
    pub fn set_range(&mut self, range: Option<[f64; 2]>) {
        self.options.range = range;
        self.dirty.layout = true;
    }

    pub fn set_content_margin(&mut self, margin: Margin) {
        self.options.content_margin = margin;
        self.dirty.layout = true;
    }

    pub fn set_duration_formatter(&mut self, formatter: DurationFormatter) {
        self.options.duration_formatter = formatter;
        self.dirty.layout = true;
    }

    pub fn set_time_formatter(&mut self, formatter: TimeFormatter) {
        self.options.time_formatter = formatter;
        self.dirty.layout = true;
    }

    // Container width

    /// Follow a container width for [`Width::Auto`]. Replaces any previous
    /// subscription.
    pub fn attach(&mut self, mut width: watch::Receiver<f64>) {
        self.container_width = *width.borrow_and_update();
        self.container = Some(width);
        self.dirty.layout = true;
        log::debug!("attached to container, width {}", self.container_width);
    }

    /// Stop following the container. The last width stays in effect.
    pub fn detach(&mut self) {
        if self.container.take().is_some() {
            log::debug!("detached from container");
        }
    }

    fn poll_container(&mut self) {
        let Some(rx) = self.container.as_mut() else {
            return;
        };
        match rx.has_changed() {
            Ok(true) => {
                let width = *rx.borrow_and_update();
                if width != self.container_width {
                    self.container_width = width;
                    if matches!(self.options.width, Width::Auto) {
                        self.dirty.layout = true;
                    }
                }
            }
            Ok(false) => {}
            Err(_) => {
                log::debug!("container width sender dropped");
                self.container = None;
            }
        }
    }

    // Update

    /// Apply every pending change with at most one render.
    ///
    /// Returns whether a render happened. On a [`TreeError`] the previous
    /// tree and scene stay in place and the content stays pending.
    pub fn update(&mut self) -> Result<bool, TreeError> {
        self.poll_container();
        if !self.dirty.any() {
            return Ok(false);
        }
        if self.dirty.content {
            self.tree = Tree::build(&self.content)?;
        }
        self.dirty = Dirty::default();
        self.redraw();
        Ok(true)
    }

    fn redraw(&mut self) {
        self.geometry = Geometry::compute(&self.options, &self.tree, self.container_width);
        let report = render::render(&mut self.scene, &self.options, &self.geometry, &self.tree);

        scrub::sync(&mut self.scene, &self.options, &self.geometry);
        let x = scrub::current_x(&self.scene);
        scrub::scrub(&mut self.scene, &self.options, &self.geometry, x);
        brush::sync(&mut self.scene, &self.options, &self.geometry, self.controller.brush());

        self.render_count += 1;
        self.last_report = report;
        self.notifications
            .push_back(Notification::Rendered { nodes: report.nodes });
    }

    // Interaction

    /// Route a pointer event. Returns whether it caused a render.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let response = self.controller.handle(
            event,
            &mut self.scene,
            &self.options,
            &self.geometry,
            &self.tree,
        );
        self.notifications.extend(response.notifications);
        match response.toggle {
            Some(index) => self.toggle_index(index),
            None => false,
        }
    }

    /// Collapse or expand the node with `id` and re-render. Returns false for
    /// unknown ids and leaves.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        match self.tree.index_of(id) {
            Some(index) => self.toggle_index(index),
            None => false,
        }
    }

    fn toggle_index(&mut self, index: usize) -> bool {
        if !self.tree.toggle(index) {
            return false;
        }
        let node = &self.tree.nodes()[index];
        self.notifications.push_back(Notification::Toggled {
            id: node.id.clone(),
            collapsed: node.children.is_collapsed(),
        });
        // This render also covers pending layout changes. A content change
        // still needs the rebuild in `update`.
        self.poll_container();
        self.dirty.layout = false;
        self.redraw();
        true
    }

    /// Take every notification queued since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }
}
