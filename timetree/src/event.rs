//! Pointer input and the notifications the widget publishes.

use serde_json::Value;

use crate::tree::{EventRecord, RecordId};

/// Pointer input in widget coordinates (origin at the widget's top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved, with or without a button held.
    Move { x: f64, y: f64 },
    /// Button pressed.
    Down { x: f64, y: f64 },
    /// Button released.
    Up { x: f64, y: f64 },
    /// Press and release without leaving the spot.
    Click { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn position(&self) -> (f64, f64) {
        match *self {
            Self::Move { x, y } | Self::Down { x, y } | Self::Up { x, y } | Self::Click { x, y } => {
                (x, y)
            }
        }
    }
}

/// A selected row: its record's `content` payload, or the record itself when
/// it has none.
#[derive(Debug, Clone, PartialEq)]
pub enum Selected {
    Content(Value),
    Record(EventRecord),
}

impl Selected {
    pub fn from_record(record: &EventRecord) -> Self {
        match &record.content {
            Some(content) => Self::Content(content.clone()),
            None => Self::Record(record.clone()),
        }
    }
}

/// Observable output, queued until the host drains it.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    SelectionChanged(Vec<Selected>),
    /// `None` when the brush is empty, else the brushed `[start, end]` times.
    BrushChanged(Option<[f64; 2]>),
    Toggled { id: RecordId, collapsed: bool },
    Rendered { nodes: usize },
}
