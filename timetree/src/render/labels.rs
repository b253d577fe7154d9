use super::{node_key, reconcile, reset_classes, Frame, ReconcileStats, STATE_CLASSES};
use crate::options::LabelAlign;
use crate::scene::{Element, Length, Shape, TextAnchor};
use crate::tree::{FlatNode, Link};

/// Radius of the expand/collapse circle.
pub const CIRCLE_RADIUS: f64 = 6.0;

/// Label text starts this far right of the circle when links are drawn.
const LINK_PADDING: f64 = 10.0;

/// Draw link paths and one label group per visible node.
///
/// Returns `(links, labels)` stats. Without a label column the layer is empty.
pub(super) fn render(layer: &mut Element, frame: &Frame) -> (ReconcileStats, ReconcileStats) {
    let options = frame.options;
    if options.labels_width <= 0.0 {
        layer.children.clear();
        return Default::default();
    }

    let draws_links = options.draws_links();
    let links = if draws_links {
        render_links(links_group(layer), frame)
    } else {
        layer.children.retain(|c| !c.has_class("links"));
        ReconcileStats::default()
    };

    let show_circles = options.collapsable || draws_links;
    let indent = options.indent_size;
    let row = frame.geometry.row;
    let time = frame.time;
    let nodes = frame.tree.nodes();

    let labels = reconcile(
        layer,
        "label",
        frame.flat,
        |n: &FlatNode| node_key(&nodes[n.index].id),
        |_| Element::group(),
        |el, n, i| {
            let node = &nodes[n.index];
            reset_classes(el, &format!("label {}", node.class_name), STATE_CLASSES);
            el.set_class("has-children", node.children.has_children());
            el.set_class("closed", node.children.is_collapsed());
            el.set_translate(n.depth as f64 * indent, row.center(i));

            let (x, anchor) = match options.label_align {
                LabelAlign::Left => (0.0, TextAnchor::Start),
                LabelAlign::Right => (
                    options.labels_width + time.scale(node.start()) - LINK_PADDING,
                    TextAnchor::End,
                ),
            };
            let text = Element::text(node.label()).with_text_layout(
                x,
                0.0,
                if draws_links { LINK_PADDING } else { 0.0 },
                Length::Em(0.35),
                anchor,
            );

            // Keep the circle's identity; it is what the pointer hits.
            let circle = el
                .children
                .drain(..)
                .find(|c| matches!(c.shape, Shape::Circle { .. }))
                .filter(|_| show_circles)
                .or_else(|| show_circles.then(|| Element::circle(CIRCLE_RADIUS)));

            if let Some(mut circle) = circle {
                circle.classes.clear();
                circle.set_class("collapsable", options.collapsable);
                circle.shape = Shape::Circle {
                    cx: 0.0,
                    cy: 0.0,
                    r: CIRCLE_RADIUS,
                };
                el.children.push(circle);
            }
            el.children.push(text);
        },
    );

    (links, labels)
}

fn links_group(layer: &mut Element) -> &mut Element {
    let pos = match layer.children.iter().position(|c| c.has_class("links")) {
        Some(pos) => pos,
        None => {
            layer.children.insert(0, Element::group().class("links"));
            0
        }
    };
    &mut layer.children[pos]
}

fn render_links(group: &mut Element, frame: &Frame) -> ReconcileStats {
    let links = frame.tree.links(frame.flat);
    let nodes = frame.tree.nodes();
    let flat = frame.flat;
    let indent = frame.options.indent_size;
    let row = frame.geometry.row;

    reconcile(
        group,
        "link",
        &links,
        |l: &Link| {
            format!(
                "{}>{}",
                node_key(&nodes[flat[l.source].index].id),
                node_key(&nodes[flat[l.target].index].id)
            )
        },
        |_| Element::path("").class("link"),
        |el, l, _| {
            let source = flat[l.source];
            let target = flat[l.target];
            el.shape = Shape::Path {
                d: format!(
                    "M{},{}V{}H{}",
                    source.depth as f64 * indent,
                    row.center(l.source),
                    row.center(l.target),
                    target.depth as f64 * indent
                ),
            };
        },
    )
}
