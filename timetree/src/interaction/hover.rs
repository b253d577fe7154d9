use super::hit::row_contains;
use crate::event::Selected;
use crate::scene::{Layer, Scene};
use crate::tree::Tree;

/// Mark the row under `y` and its label as `hover`, clearing every other row.
pub fn highlight(scene: &mut Scene, y: f64) {
    mark_rows(scene, y, "hover");
}

/// Mark the row under `y` and its label as `selected` and return the
/// selection payloads, one per marked row.
pub fn select(scene: &mut Scene, tree: &Tree, y: f64) -> Vec<Selected> {
    let hits = mark_rows(scene, y, "selected");
    let flat = tree.flatten();
    hits.iter()
        .filter_map(|&pos| flat.get(pos))
        .map(|n| Selected::from_record(&tree.nodes()[n.index].record))
        .collect()
}

/// Toggle `class` on every row by whether it spans `y`, mirroring the result
/// onto the label at the same position. Returns the positions that matched.
fn mark_rows(scene: &mut Scene, y: f64, class: &str) -> Vec<usize> {
    let mut hits = Vec::new();
    let rows = scene.layer_mut(Layer::Rows);
    for (pos, row) in rows.children.iter_mut().filter(|c| c.has_class("row")).enumerate() {
        let on = row_contains(row, y);
        row.set_class(class, on);
        if on {
            hits.push(pos);
        }
    }

    let labels = scene.layer_mut(Layer::Labels);
    for (pos, label) in labels.children.iter_mut().filter(|c| c.has_class("label")).enumerate() {
        label.set_class(class, hits.contains(&pos));
    }
    hits
}
