//! Nestable writer tree: one guarded, indented buffer per node.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument, trace};

use crate::domain::error::{NestError, NestResult};
use crate::domain::format::indent_block;

/// Buffer and child list of a node, mutated only under the node's guard.
#[derive(Default)]
struct NodeState {
    buf: Vec<u8>,
    children: Vec<IndentedNode>,
}

struct NodeInner {
    depth: usize,
    state: Mutex<NodeState>,
}

impl fmt::Debug for NodeInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("NodeInner")
            .field("depth", &self.depth)
            .field("buffered", &state.buf.len())
            .field("children", &state.children.len())
            .finish()
    }
}

/// Tears down descendants through a worklist so deep chains do not
/// recurse once per level.
impl Drop for NodeInner {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.state.get_mut().children);
        while let Some(mut node) = pending.pop() {
            // Only the last handle owns the grandchildren; shared nodes are
            // released by whoever still holds them.
            if let Some(inner) = Arc::get_mut(&mut node.inner) {
                pending.append(&mut inner.state.get_mut().children);
            }
        }
    }
}

/// Handle to a node of the indentation tree.
///
/// Every write is indented according to the node's depth. Handles are
/// cheap to clone and can be used from any number of threads; appends to
/// the same node are serialized by a lock owned by that node alone, so
/// writers on sibling subtrees never contend.
///
/// A node keeps no reference to its parent. The parent's child list holds
/// the only structural link, which makes `flush_to` a plain pre-order walk.
#[derive(Debug, Clone)]
pub struct IndentedNode {
    inner: Arc<NodeInner>,
}

impl Default for IndentedNode {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentedNode {
    /// Creates a root node: depth 0, empty buffer, no children.
    pub fn new() -> Self {
        Self::with_buffer(0, Vec::new())
    }

    fn with_buffer(depth: usize, buf: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                depth,
                state: Mutex::new(NodeState {
                    buf,
                    children: Vec::new(),
                }),
            }),
        }
    }

    /// Creates an untitled child one level deeper than `self`.
    pub fn create_child(&self) -> IndentedNode {
        self.create_titled_child(b"")
    }

    /// Creates a child one level deeper than `self`, its buffer pre-seeded
    /// with `title` indented at *this* node's depth.
    ///
    /// The title therefore renders as a heading one level shallower than
    /// the child's own writes. An empty title seeds nothing.
    #[instrument(level = "trace", skip_all, fields(parent_depth = self.inner.depth))]
    pub fn create_titled_child(&self, title: impl AsRef<[u8]>) -> IndentedNode {
        let child = Self::with_buffer(
            self.inner.depth + 1,
            indent_block(title.as_ref(), self.inner.depth),
        );

        let mut state = self.inner.state.lock();
        state.children.push(child.clone());
        trace!(children = state.children.len(), "child registered");

        child
    }

    /// Indents `text` at this node's depth and appends it to the buffer.
    ///
    /// Returns the number of bytes appended, i.e. the formatted length
    /// including indentation and the trailing newline.
    pub fn write(&self, text: impl AsRef<[u8]>) -> NestResult<usize> {
        let formatted = indent_block(text.as_ref(), self.inner.depth);
        let mut state = self.inner.state.lock();
        state.buf.write_all(&formatted).map_err(NestError::Buffer)?;
        Ok(formatted.len())
    }

    /// [`write`](Self::write) for string input.
    pub fn write_str(&self, text: &str) -> NestResult<usize> {
        self.write(text.as_bytes())
    }

    /// Renders this node and its subtree into `sink`.
    ///
    /// The node's own buffer goes first, copied while holding its guard;
    /// then each child, in creation order, is flushed depth-first outside
    /// that guard. Children registered after the walk reached this node are
    /// not visited.
    ///
    /// Flushed bytes are drained from the buffers, so flushing an untouched
    /// tree a second time writes nothing. The first sink failure aborts the
    /// walk; the returned error carries the byte count that made it out.
    #[instrument(level = "trace", skip_all, fields(depth = self.inner.depth))]
    pub fn flush_to<W: Write + ?Sized>(&self, sink: &mut W) -> NestResult<u64> {
        let mut written = 0;
        match self.flush_subtree(sink, &mut written) {
            Ok(()) => {
                trace!(written, "flushed");
                Ok(written)
            }
            Err(source) => {
                debug!(written, error = %source, "flush aborted");
                Err(NestError::SinkWrite { written, source })
            }
        }
    }

    fn flush_subtree<W: Write + ?Sized>(&self, sink: &mut W, written: &mut u64) -> io::Result<()> {
        // Pre-order walk: each frame is a children snapshot and the next
        // index to visit.
        let mut stack = vec![(self.drain_node(sink, written)?, 0)];

        while let Some((children, next)) = stack.last_mut() {
            let Some(child) = children.get(*next).cloned() else {
                stack.pop();
                continue;
            };
            *next += 1;
            let grandchildren = child.drain_node(sink, written)?;
            stack.push((grandchildren, 0));
        }
        Ok(())
    }

    /// Hands this node's buffer to `sink` under its guard and returns the
    /// child list as it stood at that moment.
    fn drain_node<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        written: &mut u64,
    ) -> io::Result<Vec<IndentedNode>> {
        let mut state = self.inner.state.lock();
        drain_into(&mut state.buf, sink, written)?;
        Ok(state.children.clone())
    }

    /// Number of ancestors; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.inner.depth
    }

    pub fn child_count(&self) -> usize {
        self.inner.state.lock().children.len()
    }

    /// Snapshot of the child handles in creation order.
    pub fn children(&self) -> Vec<IndentedNode> {
        self.inner.state.lock().children.clone()
    }

    /// Copy of the bytes currently buffered in this node (children excluded).
    pub fn contents(&self) -> Vec<u8> {
        self.inner.state.lock().buf.clone()
    }
}

/// Writes `buf` to `sink`, removing whatever the sink accepted.
fn drain_into<W: Write + ?Sized>(
    buf: &mut Vec<u8>,
    sink: &mut W,
    written: &mut u64,
) -> io::Result<()> {
    let mut sent = 0;
    let result = loop {
        if sent == buf.len() {
            break Ok(());
        }
        match sink.write(&buf[sent..]) {
            Ok(0) => {
                break Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "sink accepted no bytes",
                ))
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => break Err(e),
        }
    };

    buf.drain(..sent);
    *written += sent as u64;
    result
}
