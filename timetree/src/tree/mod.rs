//! Builds the event hierarchy from a flat, parent-indexed record array.

mod record;

pub use record::{EventRecord, RecordId, Section};

use std::collections::HashMap;

use crate::error::{TreeError, MAX_DEPTH};

/// Expanded/collapsed state of a node's children.
///
/// Collapsing moves the child list into the hidden slot; nothing is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildState {
    Expanded(Vec<usize>),
    Collapsed(Vec<usize>),
}

impl Default for ChildState {
    fn default() -> Self {
        Self::Expanded(Vec::new())
    }
}

impl ChildState {
    /// All children, hidden or not.
    pub fn all(&self) -> &[usize] {
        match self {
            Self::Expanded(children) | Self::Collapsed(children) => children,
        }
    }

    /// Children that take part in layout.
    pub fn visible(&self) -> &[usize] {
        match self {
            Self::Expanded(children) => children,
            Self::Collapsed(_) => &[],
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Collapsed(_))
    }

    pub fn has_children(&self) -> bool {
        !self.all().is_empty()
    }

    fn push(&mut self, child: usize) {
        match self {
            Self::Expanded(children) | Self::Collapsed(children) => children.push(child),
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Expanded(children) => Self::Collapsed(children),
            Self::Collapsed(children) => Self::Expanded(children),
        }
    }
}

/// A record placed in the tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// The record as supplied, before defaults were applied.
    pub record: EventRecord,
    pub id: RecordId,
    pub class_name: String,
    pub children: ChildState,
    /// Latest `end` over this node and all of its descendants.
    pub last_end: f64,
}

impl TreeNode {
    pub fn label(&self) -> &str {
        &self.record.label
    }

    pub fn start(&self) -> f64 {
        self.record.start
    }

    pub fn end(&self) -> f64 {
        self.record.end
    }

    pub fn sections(&self) -> Option<&[Section]> {
        self.record.sections.as_deref()
    }
}

/// A visible node in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatNode {
    /// Index into the tree's arena (same as the input array index).
    pub index: usize,
    /// The synthetic root sits at depth 0, so top-level nodes are depth 1.
    pub depth: usize,
    pub parent: Option<usize>,
}

/// Parent→child edge between two visible rows, as positions in the flat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

/// The event hierarchy under a synthetic, never-rendered root.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
    by_id: HashMap<RecordId, usize>,
}

impl Tree {
    /// Build a tree from a flat record array.
    ///
    /// Records are validated once up front. Parent chains that loop, or nest
    /// deeper than [`MAX_DEPTH`], fail with [`TreeError::CycleDetected`].
    pub fn build(records: &[EventRecord]) -> Result<Self, TreeError> {
        let by_id = validate(records)?;

        let mut nodes: Vec<TreeNode> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| TreeNode {
                record: record.clone(),
                id: record.id.clone().unwrap_or(RecordId::Int(idx as i64)),
                class_name: record.class_name.clone().unwrap_or_default(),
                children: ChildState::default(),
                last_end: record.end,
            })
            .collect();

        let mut roots = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            match record.parent {
                Some(parent) => nodes[parent].children.push(idx),
                None => roots.push(idx),
            }
        }

        for idx in 0..nodes.len() {
            nodes[idx].last_end = last_end(&nodes, idx, idx, 0)?;
        }

        log::debug!(
            "built tree: {} nodes, {} top-level",
            nodes.len(),
            roots.len()
        );

        Ok(Self {
            nodes,
            roots,
            by_id,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    /// Children of the synthetic root.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn index_of(&self, id: &RecordId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Swap a node between expanded and collapsed.
    ///
    /// Returns false (and changes nothing) for leaves and unknown indices.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(node) = self.nodes.get_mut(index) else {
            return false;
        };
        if !node.children.has_children() {
            return false;
        }
        let state = std::mem::take(&mut node.children);
        node.children = state.flipped();
        log::debug!(
            "toggled node {} ({}): collapsed={}",
            index,
            node.record.label,
            node.children.is_collapsed()
        );
        true
    }

    /// Collapse or expand a node. Returns true if its state changed.
    pub fn set_collapsed(&mut self, index: usize, collapsed: bool) -> bool {
        match self.nodes.get(index) {
            Some(node) if node.children.is_collapsed() != collapsed => self.toggle(index),
            _ => false,
        }
    }

    /// Visible nodes in depth-first pre-order, children in input order.
    pub fn flatten(&self) -> Vec<FlatNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.flatten_into(root, 1, None, &mut out);
        }
        out
    }

    fn flatten_into(&self, index: usize, depth: usize, parent: Option<usize>, out: &mut Vec<FlatNode>) {
        out.push(FlatNode {
            index,
            depth,
            parent,
        });
        for &child in self.nodes[index].children.visible() {
            self.flatten_into(child, depth + 1, Some(index), out);
        }
    }

    /// Edges between visible rows, ordered by source row then child order.
    pub fn links(&self, flat: &[FlatNode]) -> Vec<Link> {
        let position: HashMap<usize, usize> = flat
            .iter()
            .enumerate()
            .map(|(pos, n)| (n.index, pos))
            .collect();

        let mut links = Vec::new();
        for (source, n) in flat.iter().enumerate() {
            for child in self.nodes[n.index].children.visible() {
                if let Some(&target) = position.get(child) {
                    links.push(Link { source, target });
                }
            }
        }
        links
    }

    /// Number of visible nodes, counting the synthetic root.
    ///
    /// Walks expanded children only.
    pub fn visible_count(&self) -> usize {
        fn count(tree: &Tree, index: usize) -> usize {
            1 + tree.nodes[index]
                .children
                .visible()
                .iter()
                .map(|&c| count(tree, c))
                .sum::<usize>()
        }
        1 + self.roots.iter().map(|&r| count(self, r)).sum::<usize>()
    }

    /// `[earliest start, latest end]` over every node, or `None` when empty.
    pub fn extent(&self) -> Option<[f64; 2]> {
        if self.is_empty() {
            return None;
        }
        let min = self
            .nodes
            .iter()
            .map(|n| n.start())
            .fold(f64::INFINITY, f64::min);
        let max = self
            .nodes
            .iter()
            .map(|n| n.last_end)
            .fold(f64::NEG_INFINITY, f64::max);
        Some([min, max])
    }
}

fn validate(records: &[EventRecord]) -> Result<HashMap<RecordId, usize>, TreeError> {
    let mut by_id = HashMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if !record.start.is_finite() {
            return Err(TreeError::NonFiniteTime {
                index,
                field: "start",
            });
        }
        if !record.end.is_finite() {
            return Err(TreeError::NonFiniteTime { index, field: "end" });
        }
        if record.end < record.start {
            return Err(TreeError::EndBeforeStart {
                index,
                start: record.start,
                end: record.end,
            });
        }

        if let Some(parent) = record.parent {
            if parent == index {
                return Err(TreeError::SelfParent { index });
            }
            if parent >= records.len() {
                return Err(TreeError::ParentOutOfRange {
                    index,
                    parent,
                    len: records.len(),
                });
            }
        }

        let id = record.id.clone().unwrap_or(RecordId::Int(index as i64));
        if let Some(first) = by_id.insert(id.clone(), index) {
            return Err(TreeError::DuplicateId {
                id,
                first,
                second: index,
            });
        }
    }

    Ok(by_id)
}

fn last_end(nodes: &[TreeNode], origin: usize, index: usize, depth: usize) -> Result<f64, TreeError> {
    if depth > MAX_DEPTH {
        return Err(TreeError::CycleDetected { index: origin });
    }
    let node = &nodes[index];
    let mut latest = node.end();
    for &child in node.children.all() {
        latest = latest.max(last_end(nodes, origin, child, depth + 1)?);
    }
    Ok(latest)
}
