//! Retained scene of SVG-like primitives.

mod element;
mod transform;

pub use element::Element;
pub use transform::Translate;

/// A length that is either in pixels or relative to the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Em(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Group,
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Text {
        x: f64,
        y: f64,
        dx: f64,
        dy: Length,
        anchor: TextAnchor,
        content: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    /// SVG path data using absolute `M`, `V` and `H` commands.
    Path {
        d: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

/// Top-level groups, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Rows,
    Axis,
    Labels,
    Content,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Rows, Layer::Axis, Layer::Labels, Layer::Content];

    pub fn class(&self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Axis => "x axis",
            Self::Labels => "labels",
            Self::Content => "content",
        }
    }
}

/// The widget's drawing: a root group sized to the widget, holding one group
/// per [`Layer`]. The content layer holds the `bars`, `scrubber` and `brush`
/// groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub root: Element,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let content = Element::group()
            .class(Layer::Content.class())
            .child(Element::group().class("bars"));
        let root = Element::group()
            .class("time-tree")
            .child(Element::group().class(Layer::Rows.class()))
            .child(Element::group().class(Layer::Axis.class()))
            .child(Element::group().class(Layer::Labels.class()))
            .child(content);
        Self {
            width: 0.0,
            height: 0.0,
            root,
        }
    }

    pub fn layer(&self, layer: Layer) -> &Element {
        &self.root.children[layer as usize]
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut Element {
        &mut self.root.children[layer as usize]
    }

    /// The `bars` group inside the content layer.
    pub fn bars(&self) -> &Element {
        &self.layer(Layer::Content).children[0]
    }

    pub fn bars_mut(&mut self) -> &mut Element {
        &mut self.layer_mut(Layer::Content).children[0]
    }

    pub fn scrubber(&self) -> Option<&Element> {
        self.layer(Layer::Content).children_matching("scrubber").next()
    }

    pub fn scrubber_mut(&mut self) -> Option<&mut Element> {
        self.layer_mut(Layer::Content)
            .children
            .iter_mut()
            .find(|c| c.has_class("scrubber"))
    }

    pub fn brush(&self) -> Option<&Element> {
        self.layer(Layer::Content).children_matching("brush").next()
    }

    pub fn brush_mut(&mut self) -> Option<&mut Element> {
        self.layer_mut(Layer::Content)
            .children
            .iter_mut()
            .find(|c| c.has_class("brush"))
    }

    pub fn select_all(&self, classes: &str) -> Vec<&Element> {
        self.root.select_all(classes)
    }

    pub fn find(&self, classes: &str) -> Option<&Element> {
        self.root.find(classes)
    }
}
