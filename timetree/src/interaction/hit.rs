use crate::scene::{Element, Layer, Scene, Shape};

/// Position of the first row whose rect contains `y`.
///
/// `y` is relative to the rows layer. Positions follow the rendered (visible)
/// order.
pub fn row_at(scene: &Scene, y: f64) -> Option<usize> {
    scene
        .layer(Layer::Rows)
        .children_matching("row")
        .position(|row| row_contains(row, y))
}

/// True if `row` is a rect spanning `y` (top inclusive, bottom exclusive).
pub fn row_contains(row: &Element, y: f64) -> bool {
    match row.shape {
        Shape::Rect { y: top, height, .. } => top <= y && y < top + height,
        _ => false,
    }
}

/// Position of the label whose collapse circle contains `(x, y)`.
///
/// Coordinates are relative to the labels layer. Circles without the
/// `collapsable` class are decoration and never hit.
pub fn circle_at(scene: &Scene, x: f64, y: f64) -> Option<usize> {
    scene
        .layer(Layer::Labels)
        .children_matching("label")
        .position(|label| {
            let Ok(Some(origin)) = label.translation() else {
                return false;
            };
            label
                .children_matching("collapsable")
                .any(|circle| match circle.shape {
                    Shape::Circle { cx, cy, r } => {
                        let dx = x - origin.x - cx;
                        let dy = y - origin.y - cy;
                        dx * dx + dy * dy <= r * r
                    }
                    _ => false,
                })
        })
}
