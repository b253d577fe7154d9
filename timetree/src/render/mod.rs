//! Reconciles the visible tree against the scene.

mod axis;
mod bars;
mod labels;
mod reconcile;
mod rows;

pub use reconcile::{reconcile, reset_classes, ReconcileStats};

use std::time::Instant;

use crate::geometry::Geometry;
use crate::options::Options;
use crate::scale::LinearScale;
use crate::scene::{Layer, Scene};
use crate::tree::{FlatNode, RecordId, Tree};

/// Classes toggled by interaction, preserved across re-renders.
pub(crate) const STATE_CLASSES: &[&str] = &["hover", "selected"];

/// Everything a layer needs to lay itself out.
pub(crate) struct Frame<'a> {
    pub options: &'a Options,
    pub geometry: &'a Geometry,
    pub tree: &'a Tree,
    pub flat: &'a [FlatNode],
    pub time: LinearScale,
}

/// Counts from one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    pub nodes: usize,
    pub rows: ReconcileStats,
    pub labels: ReconcileStats,
    pub links: ReconcileStats,
    pub bars: ReconcileStats,
    pub ticks: ReconcileStats,
}

/// Scene key for a record id. Integer and string ids never collide.
pub fn node_key(id: &RecordId) -> String {
    match id {
        RecordId::Int(n) => format!("#{n}"),
        RecordId::Str(s) => format!("${s}"),
    }
}

/// Lay out the visible nodes of `tree` into `scene`.
///
/// An empty tree clears the rows, labels, bars and axis.
pub fn render(scene: &mut Scene, options: &Options, geometry: &Geometry, tree: &Tree) -> RenderReport {
    let started = Instant::now();

    scene.width = geometry.width;
    scene.height = geometry.height;
    for layer in [Layer::Rows, Layer::Labels, Layer::Content] {
        scene
            .layer_mut(layer)
            .set_translate(content_x(layer, options), geometry.content_top);
    }

    let Some(time) = geometry.time.filter(|_| !tree.is_empty()) else {
        clear(scene);
        log::debug!("render: nothing to draw");
        return RenderReport::default();
    };

    let flat = tree.flatten();
    let frame = Frame {
        options,
        geometry,
        tree,
        flat: &flat,
        time,
    };

    let rows = rows::render(scene.layer_mut(Layer::Rows), &frame);
    let (links, labels) = labels::render(scene.layer_mut(Layer::Labels), &frame);
    let ticks = axis::render(scene.layer_mut(Layer::Axis), &frame);
    let bars = bars::render(scene.bars_mut(), &frame);

    let report = RenderReport {
        nodes: flat.len(),
        rows,
        labels,
        links,
        bars,
        ticks,
    };

    log::debug!(
        "render: {} nodes in {:.2}µs rows={:?} labels={:?} links={:?} bars={:?} ticks={:?}",
        report.nodes,
        started.elapsed().as_secs_f64() * 1_000_000.0,
        report.rows,
        report.labels,
        report.links,
        report.bars,
        report.ticks,
    );

    report
}

fn content_x(layer: Layer, options: &Options) -> f64 {
    match layer {
        Layer::Content => options.labels_width,
        _ => 0.0,
    }
}

fn clear(scene: &mut Scene) {
    scene.layer_mut(Layer::Rows).children.clear();
    scene.layer_mut(Layer::Labels).children.clear();
    let axis = scene.layer_mut(Layer::Axis);
    axis.children.clear();
    axis.transform = None;
    scene.bars_mut().children.clear();
}
