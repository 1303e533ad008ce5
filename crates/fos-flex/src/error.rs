//! Error types

use crate::node::NodeId;

/// Usage errors reported by tree operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlexError {
    #[error("Node {0} is not part of this tree")]
    InvalidNode(NodeId),

    #[error("Node {child} already has parent {parent}")]
    AlreadyHasParent { child: NodeId, parent: NodeId },

    #[error("Child index {index} out of range (child count {count})")]
    ChildIndexOutOfRange { index: usize, count: usize },

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("Inserting {child} under {parent} would create a cycle")]
    WouldCreateCycle { parent: NodeId, child: NodeId },

    #[error("Node {0} has a measure function and cannot have children")]
    MeasuredNodeCannotHaveChildren(NodeId),

    #[error("Node {0} has children and cannot have a measure function")]
    ChildrenPreventMeasureFunc(NodeId),
}

pub type FlexResult<T> = Result<T, FlexError>;

/// Failure reported by a measure callback
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Measure failed: {0}")]
pub struct MeasureError(pub String);

impl MeasureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
