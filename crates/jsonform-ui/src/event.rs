//! UI events forwarded by the host

use crate::tree::NodeId;

/// The kinds of event the engine listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A control's value changed
    Change,
    /// A button was activated
    Click,
    /// A form element was submitted
    Submit,
}

/// A user event on a node of the UI tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiEvent {
    pub target: NodeId,
    pub kind: EventKind,
}

impl UiEvent {
    pub fn change(target: NodeId) -> Self {
        Self {
            target,
            kind: EventKind::Change,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self {
            target,
            kind: EventKind::Click,
        }
    }

    pub fn submit(target: NodeId) -> Self {
        Self {
            target,
            kind: EventKind::Submit,
        }
    }
}
