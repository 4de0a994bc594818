//! Reduced API over [`IndentedNode`] for callers that do not need
//! per-write byte counts or errors.

use std::io::Write;

use crate::domain::error::NestResult;
use crate::domain::node::IndentedNode;

/// Thin wrapper around an [`IndentedNode`].
///
/// Shares every concurrency guarantee of the wrapped node; it holds no
/// state of its own.
#[derive(Debug, Clone, Default)]
pub struct SimpleNode {
    node: IndentedNode,
}

impl SimpleNode {
    /// Creates a root wrapper: depth 0, nothing buffered.
    pub fn new() -> Self {
        Self {
            node: IndentedNode::new(),
        }
    }

    /// Creates a child; an empty `title` leaves the child untitled.
    pub fn child(&self, title: &str) -> SimpleNode {
        SimpleNode {
            node: self.node.create_titled_child(title),
        }
    }

    /// Appends `text`, discarding the byte count and any error.
    pub fn write(&self, text: &str) {
        let _ = self.node.write_str(text);
    }

    /// See [`IndentedNode::flush_to`].
    pub fn flush_to<W: Write + ?Sized>(&self, sink: &mut W) -> NestResult<u64> {
        self.node.flush_to(sink)
    }

    pub fn node(&self) -> &IndentedNode {
        &self.node
    }
}

impl From<IndentedNode> for SimpleNode {
    fn from(node: IndentedNode) -> Self {
        Self { node }
    }
}
