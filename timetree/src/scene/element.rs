use std::sync::atomic::{AtomicU64, Ordering};

use super::{Shape, TextAnchor, Translate};
use crate::error::TransformError;

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

fn next_uid() -> u64 {
    NEXT_UID.fetch_add(1, Ordering::Relaxed)
}

/// A node in the retained scene.
///
/// Every constructed element gets a fresh `uid`; reconciliation keeps the
/// element (and so its `uid`) alive for as long as its `key` stays in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub uid: u64,
    /// Data key this element is bound to.
    pub key: Option<String>,
    pub classes: Vec<String>,
    pub transform: Option<String>,
    pub shape: Shape,
    pub children: Vec<Element>,
}

impl Element {
    fn with_shape(shape: Shape) -> Self {
        Self {
            uid: next_uid(),
            key: None,
            classes: Vec::new(),
            transform: None,
            shape,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::with_shape(Shape::Group)
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_shape(Shape::Rect {
            x,
            y,
            width,
            height,
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::with_shape(Shape::Text {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: super::Length::Px(0.0),
            anchor: TextAnchor::Start,
            content: content.into(),
        })
    }

    pub fn circle(r: f64) -> Self {
        Self::with_shape(Shape::Circle {
            cx: 0.0,
            cy: 0.0,
            r,
        })
    }

    pub fn path(d: impl Into<String>) -> Self {
        Self::with_shape(Shape::Path { d: d.into() })
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::with_shape(Shape::Line { x1, y1, x2, y2 })
    }

    /// Position a text element. No-op for other shapes.
    pub fn with_text_layout(mut self, x: f64, y: f64, dx: f64, dy: super::Length, anchor: TextAnchor) -> Self {
        if let Shape::Text {
            x: tx,
            y: ty,
            dx: tdx,
            dy: tdy,
            anchor: tanchor,
            ..
        } = &mut self.shape
        {
            *tx = x;
            *ty = y;
            *tdx = dx;
            *tdy = dy;
            *tanchor = anchor;
        }
        self
    }

    // Identity
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    // Classes

    /// Add one or more whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.add_classes(classes);
        self
    }

    pub fn add_classes(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// True if every whitespace-separated class in `classes` is present.
    pub fn matches(&self, classes: &str) -> bool {
        let mut any = false;
        for class in classes.split_whitespace() {
            if !self.has_class(class) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Add or remove a single class.
    pub fn set_class(&mut self, class: &str, on: bool) {
        let present = self.has_class(class);
        if on && !present {
            self.classes.push(class.to_string());
        } else if !on && present {
            self.classes.retain(|c| c != class);
        }
    }

    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    // Transform
    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.set_translate(x, y);
        self
    }

    pub fn set_translate(&mut self, x: f64, y: f64) {
        self.transform = Some(Translate::new(x, y).to_string());
    }

    /// Parse the transform attribute. `None` when there is none.
    pub fn translation(&self) -> Result<Option<Translate>, TransformError> {
        self.transform.as_deref().map(str::parse).transpose()
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // Queries

    /// First element (self included, depth-first) carrying all of `classes`.
    pub fn find(&self, classes: &str) -> Option<&Element> {
        if self.matches(classes) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(classes))
    }

    pub fn find_mut(&mut self, classes: &str) -> Option<&mut Element> {
        if self.matches(classes) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(classes))
    }

    /// Every descendant (self included) carrying all of `classes`, in
    /// document order.
    pub fn select_all(&self, classes: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect(classes, &mut out);
        out
    }

    fn collect<'a>(&'a self, classes: &str, out: &mut Vec<&'a Element>) {
        if self.matches(classes) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(classes, out);
        }
    }

    /// Visit every element carrying all of `classes`, mutably.
    pub fn for_each_mut(&mut self, classes: &str, f: &mut impl FnMut(&mut Element)) {
        if self.matches(classes) {
            f(self);
        }
        for child in &mut self.children {
            child.for_each_mut(classes, f);
        }
    }

    /// Direct children carrying all of `classes`.
    pub fn children_matching<'a>(&'a self, classes: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.matches(classes))
    }

    pub fn find_by_key(&self, key: &str) -> Option<&Element> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_key(key))
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out
    }

    fn append_text(&self, out: &mut String) {
        if let Shape::Text { content, .. } = &self.shape {
            out.push_str(content);
        }
        for child in &self.children {
            child.append_text(out);
        }
    }
}
