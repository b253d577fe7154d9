use super::{reconcile, Frame, ReconcileStats};
use crate::scene::{Element, Length, TextAnchor};

/// Ticks requested from the time scale.
const TICK_COUNT: usize = 5;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Time axis below (or above) the bars, offset by the label column.
pub(super) fn render(layer: &mut Element, frame: &Frame) -> ReconcileStats {
    let options = frame.options;
    if options.axis_height <= 0.0 {
        layer.children.clear();
        layer.transform = None;
        return ReconcileStats::default();
    }
    layer.set_translate(options.labels_width, frame.geometry.axis_top);

    let time = frame.time;
    let [r0, r1] = time.range();
    let domain = Element::path(format!("M{r0},{TICK_SIZE}V0H{r1}V{TICK_SIZE}")).class("domain");
    match layer.children.iter_mut().find(|c| c.has_class("domain")) {
        Some(existing) => existing.shape = domain.shape,
        None => layer.children.insert(0, domain),
    }

    let ticks = time.ticks(TICK_COUNT);
    reconcile(
        layer,
        "tick",
        &ticks,
        |t: &f64| t.to_string(),
        |_| Element::group().class("tick"),
        |el, &t, _| {
            el.set_translate(time.scale(t), 0.0);
            let label = options.time_formatter.format(t);
            el.children = vec![
                Element::line(0.0, 0.0, 0.0, TICK_SIZE),
                Element::text(label).with_text_layout(
                    0.0,
                    TICK_SIZE + TICK_PADDING,
                    0.0,
                    Length::Em(0.71),
                    TextAnchor::Middle,
                ),
            ];
        },
    )
}
