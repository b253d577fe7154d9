use crate::geometry::Geometry;
use crate::options::Options;
use crate::scale::LinearScale;
use crate::scene::{Element, Layer, Scene};

/// Horizontal range selection over the bars area, kept in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Brush {
    extent: Option<[f64; 2]>,
    /// Where the current drag started. `None` when not dragging.
    anchor: Option<f64>,
}

impl Brush {
    /// Start a drag at `x`, collapsing the extent to that point.
    pub fn begin(&mut self, x: f64, width: f64) {
        let x = clamp(x, width);
        self.anchor = Some(x);
        self.extent = Some([x, x]);
    }

    /// Extend the current drag to `x`. Returns false when not dragging.
    pub fn drag(&mut self, x: f64, width: f64) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let x = clamp(x, width);
        self.extent = Some([anchor.min(x), anchor.max(x)]);
        true
    }

    /// Finish the current drag. Returns false when not dragging.
    pub fn end(&mut self) -> bool {
        self.anchor.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pixel extent, `None` when nothing has been brushed.
    pub fn extent(&self) -> Option<[f64; 2]> {
        self.extent
    }

    pub fn is_empty(&self) -> bool {
        self.extent.is_none_or(|[a, b]| a >= b)
    }

    /// The brushed time range, `None` when the extent is empty.
    pub fn range(&self, time: &LinearScale) -> Option<[f64; 2]> {
        if self.is_empty() {
            return None;
        }
        let [a, b] = self.extent?;
        Some([time.invert(a), time.invert(b)])
    }
}

fn clamp(x: f64, width: f64) -> f64 {
    x.clamp(0.0, width.max(0.0))
}

/// Create, resize or remove the brush overlay to match the options.
pub fn sync(scene: &mut Scene, options: &Options, geometry: &Geometry, brush: &Brush) {
    let content = scene.layer_mut(Layer::Content);
    if !options.brushable {
        content.children.retain(|c| !c.has_class("brush"));
        return;
    }

    let height = geometry.content_height;
    let [a, b] = brush.extent().unwrap_or([0.0, 0.0]);
    let background = Element::rect(0.0, 0.0, geometry.bars_width, height).class("background");
    let extent = Element::rect(a, 0.0, b - a, height).class("extent");

    match content.children.iter_mut().find(|c| c.has_class("brush")) {
        Some(group) => {
            for child in &mut group.children {
                if child.has_class("background") {
                    child.shape = background.shape.clone();
                } else if child.has_class("extent") {
                    child.shape = extent.shape.clone();
                }
            }
        }
        None => {
            let group = Element::group().class("x brush").child(background).child(extent);
            content.children.push(group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_orders_and_clamps_the_extent() {
        let mut brush = Brush::default();
        brush.begin(80.0, 100.0);
        assert!(brush.drag(-20.0, 100.0));
        assert_eq!(brush.extent(), Some([0.0, 80.0]));
        assert!(brush.end());
        assert!(!brush.drag(50.0, 100.0));
        assert!(!brush.end());
    }

    #[test]
    fn test_point_extent_is_empty() {
        let mut brush = Brush::default();
        assert!(brush.is_empty());
        brush.begin(30.0, 100.0);
        assert!(brush.is_empty());
        assert_eq!(brush.range(&LinearScale::new([0.0, 1.0], [0.0, 100.0])), None);
    }
}
