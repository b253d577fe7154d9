use std::collections::HashMap;

use crate::scene::Element;

/// What a keyed reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

impl ReconcileStats {
    pub fn total(&self) -> usize {
        self.entered + self.updated
    }
}

/// Bind `data` to the children of `parent` that carry `classes`, by key.
///
/// Children whose key is still present are kept (same `uid`) and passed to
/// `update`. Missing keys get a new element from `enter`, which is then
/// updated like the rest. Children whose key is gone are dropped. Children
/// that do not carry `classes` are left alone and stay in front of the bound
/// ones, which end up in data order.
pub fn reconcile<D>(
    parent: &mut Element,
    classes: &str,
    data: &[D],
    key: impl Fn(&D) -> String,
    mut enter: impl FnMut(&D) -> Element,
    mut update: impl FnMut(&mut Element, &D, usize),
) -> ReconcileStats {
    let mut stats = ReconcileStats::default();

    let (bound, others): (Vec<Element>, Vec<Element>) = std::mem::take(&mut parent.children)
        .into_iter()
        .partition(|c| c.matches(classes));

    let mut existing: HashMap<String, Element> = HashMap::with_capacity(bound.len());
    for element in bound {
        match element.key.clone() {
            Some(k) if !existing.contains_key(&k) => {
                existing.insert(k, element);
            }
            // Unkeyed or shadowed duplicates cannot be matched to data.
            _ => stats.exited += 1,
        }
    }

    let mut children = others;
    children.reserve(data.len());
    for (i, datum) in data.iter().enumerate() {
        let k = key(datum);
        let mut element = match existing.remove(&k) {
            Some(element) => {
                stats.updated += 1;
                element
            }
            None => {
                stats.entered += 1;
                enter(datum).key(k)
            }
        };
        update(&mut element, datum, i);
        children.push(element);
    }

    stats.exited += existing.len();
    parent.children = children;
    stats
}

/// Replace an element's classes with `base`, keeping any of `sticky` it had.
pub fn reset_classes(element: &mut Element, base: &str, sticky: &[&str]) {
    let kept: Vec<&str> = sticky
        .iter()
        .copied()
        .filter(|c| element.has_class(c))
        .collect();
    element.classes.clear();
    element.add_classes(base);
    for class in kept {
        element.set_class(class, true);
    }
}
