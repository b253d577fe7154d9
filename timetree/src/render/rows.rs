use super::{node_key, reconcile, reset_classes, Frame, ReconcileStats, STATE_CLASSES};
use crate::scene::{Element, Shape};
use crate::tree::FlatNode;

/// One full-width background rect per visible node.
pub(super) fn render(layer: &mut Element, frame: &Frame) -> ReconcileStats {
    let band = frame.geometry.full_row;
    let width = frame.geometry.width;
    let nodes = frame.tree.nodes();

    reconcile(
        layer,
        "row",
        frame.flat,
        |n: &FlatNode| node_key(&nodes[n.index].id),
        |_| Element::rect(0.0, 0.0, 0.0, 0.0),
        |el, n, i| {
            let node = &nodes[n.index];
            reset_classes(el, &format!("row {}", node.class_name), STATE_CLASSES);
            el.shape = Shape::Rect {
                x: 0.0,
                y: band.position(i),
                width,
                height: band.bandwidth(),
            };
        },
    )
}
