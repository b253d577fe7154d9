use crate::geometry::Geometry;
use crate::options::Options;
use crate::scene::{Element, Layer, Length, Scene, Shape, TextAnchor};

/// Readout distance from the guide line.
const TEXT_OFFSET: f64 = 4.0;
/// The readout flips left once `x + SWITCH_FACTOR * width` passes the edge.
const SWITCH_FACTOR: f64 = 1.5;

/// Create, resize or remove the scrubber group to match the options.
pub fn sync(scene: &mut Scene, options: &Options, geometry: &Geometry) {
    let height = geometry.content_height;
    if !options.scrubbable {
        scene
            .layer_mut(Layer::Content)
            .children
            .retain(|c| !c.has_class("scrubber"));
        return;
    }

    match scene.scrubber_mut() {
        Some(scrubber) => {
            for child in &mut scrubber.children {
                match &mut child.shape {
                    Shape::Line { y2, .. } => *y2 = height,
                    Shape::Text { y, .. } => *y = height,
                    _ => {}
                }
            }
        }
        None => {
            let scrubber = Element::group()
                .class("scrubber")
                .child(Element::line(0.0, 0.0, 0.0, height))
                .child(Element::text("").with_text_layout(
                    0.0,
                    height,
                    0.0,
                    Length::Px(-1.0),
                    TextAnchor::Start,
                ));
            // Directly after `bars`, under the brush.
            scene.layer_mut(Layer::Content).children.insert(1, scrubber);
        }
    }
}

/// Move the scrubber to `x` (content coordinates) and mark the durations it
/// crosses as `hover`.
pub fn scrub(scene: &mut Scene, options: &Options, geometry: &Geometry, x: f64) {
    if !options.scrubbable {
        return;
    }

    let label = match geometry.time {
        Some(time) if x > 0.0 => options
            .time_formatter
            .format(time.invert(x - options.content_margin.left)),
        _ => String::new(),
    };
    let switched = x + options.text_measure.width(&label) * SWITCH_FACTOR > geometry.content_width;
    let (text_x, text_anchor) = if switched {
        (-TEXT_OFFSET, TextAnchor::End)
    } else {
        (TEXT_OFFSET, TextAnchor::Start)
    };

    if let Some(scrubber) = scene.scrubber_mut() {
        scrubber.set_translate(x, 0.0);
        scrubber.set_class("switched", switched);
        for child in &mut scrubber.children {
            if let Shape::Text {
                x,
                dy,
                anchor,
                content,
                ..
            } = &mut child.shape
            {
                *x = text_x;
                *dy = Length::Px(-1.0);
                *anchor = text_anchor;
                content.clone_from(&label);
            }
        }
    }

    mark_crossed(scene.bars_mut(), x);
}

/// Current scrubber offset, or 0 when there is no scrubber yet.
pub fn current_x(scene: &Scene) -> f64 {
    scene
        .scrubber()
        .and_then(|s| s.translation().ok().flatten())
        .map_or(0.0, |t| t.x)
}

fn mark_crossed(bars: &mut Element, x: f64) {
    for bar in bars.children.iter_mut().filter(|c| c.has_class("bar")) {
        let origin = match bar.translation() {
            Ok(origin) => origin.map(|t| t.x),
            Err(err) => {
                log::error!("scrub: bar {:?}: {err}", bar.key);
                None
            }
        };
        for duration in bar.children.iter_mut().filter(|c| c.has_class("duration")) {
            let crossed = origin
                .zip(rect_span(duration))
                .is_some_and(|(origin, (rx, width))| {
                    let start = origin + rx;
                    start <= x && x <= start + width
                });
            duration.set_class("hover", crossed);
        }
    }
}

fn rect_span(duration: &Element) -> Option<(f64, f64)> {
    duration.children.iter().find_map(|c| match c.shape {
        Shape::Rect { x, width, .. } => Some((x, width)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(transform: &str, rect_x: f64, width: f64) -> Element {
        let mut bar = Element::group()
            .class("bar")
            .child(Element::group().class("whole duration").child(Element::rect(rect_x, 0.0, width, 5.0)));
        bar.transform = Some(transform.to_string());
        bar
    }

    #[test]
    fn test_both_transform_syntaxes_hit_the_same_span() {
        for transform in ["translate(30.12, 42.999)", "translate(30.12 42.999)"] {
            let mut bars = Element::group().class("bars").child(bar(transform, 10.0, 20.0));
            mark_crossed(&mut bars, 45.0);
            assert!(bars.children[0].children[0].has_class("hover"), "{transform}");
            mark_crossed(&mut bars, 61.0);
            assert!(!bars.children[0].children[0].has_class("hover"), "{transform}");
        }
    }

    #[test]
    fn test_malformed_transform_is_not_hovered() {
        let mut bars = Element::group().class("bars").child(bar("rotate(45)", 0.0, 1000.0));
        mark_crossed(&mut bars, 10.0);
        assert!(!bars.children[0].children[0].has_class("hover"));
    }
}
