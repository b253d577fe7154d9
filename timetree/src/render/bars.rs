use super::{node_key, reconcile, reset_classes, Frame, ReconcileStats};
use crate::scene::{Element, Length, TextAnchor};
use crate::tree::{FlatNode, TreeNode};

/// Duration labels start this far into their rect.
const LABEL_PADDING: f64 = 3.0;

/// One bar group per visible node: a whole-duration rect plus one rect per
/// section, each with an optional duration label.
pub(super) fn render(group: &mut Element, frame: &Frame) -> ReconcileStats {
    let nodes = frame.tree.nodes();
    let row = frame.geometry.row;
    let time = frame.time;
    let left = frame.options.content_margin.left;

    reconcile(
        group,
        "bar",
        frame.flat,
        |n: &FlatNode| node_key(&nodes[n.index].id),
        |_| Element::group(),
        |el, n, i| {
            let node = &nodes[n.index];
            let sectional = if node.sections().is_some() { " sectional" } else { "" };
            reset_classes(el, &format!("bar {}{sectional}", node.class_name), &[]);
            el.set_class("collapsed", node.children.is_collapsed());
            el.set_translate(time.scale(node.start()) + left, row.position(i));
            el.children = durations(node, frame);
        },
    )
}

fn durations(node: &TreeNode, frame: &Frame) -> Vec<Element> {
    let time = frame.time;
    let origin = time.scale(node.start());

    let mut out = vec![duration(
        Element::group().class("whole duration"),
        0.0,
        time.scale(node.end()) - origin,
        node.start(),
        node.end(),
        frame,
    )];

    for section in node.sections().unwrap_or_default() {
        let class = format!(
            "section duration {}",
            section.class_name.as_deref().unwrap_or_default()
        );
        let x = time.scale(section.start) - origin;
        out.push(duration(
            Element::group().class(&class),
            x,
            time.scale(section.end) - time.scale(section.start),
            section.start,
            section.end,
            frame,
        ));
    }
    out
}

fn duration(group: Element, x: f64, width: f64, start: f64, end: f64, frame: &Frame) -> Element {
    let band = frame.geometry.row.bandwidth();
    let group = group.child(Element::rect(x, 0.0, width, band));
    if !frame.options.show_labels {
        return group;
    }
    let label = frame.options.duration_formatter.format(start, end);
    group.child(Element::text(label).with_text_layout(
        x,
        band / 2.0,
        LABEL_PADDING,
        Length::Em(0.35),
        TextAnchor::Start,
    ))
}
