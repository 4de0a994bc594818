//! Behaviour of the indented writer tree: formatting, titles, flush order,
//! byte counts and sink failures.

use std::io::{self, Write};

use rstest::rstest;

use nest_writer::util::testing;
use nest_writer::{IndentedNode, NestError};

fn render(node: &IndentedNode) -> String {
    let mut out = Vec::new();
    node.flush_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn node_at_depth(depth: usize) -> IndentedNode {
    let mut node = IndentedNode::new();
    for _ in 0..depth {
        node = node.create_child();
    }
    node
}

/// Accepts `limit` bytes, then fails every write.
struct LimitedSink {
    data: Vec<u8>,
    limit: usize,
}

impl Write for LimitedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit - self.data.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = room.min(buf.len());
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================
// Write
// ============================================================

#[rstest]
#[case(0, "a long string!", "a long string!\n")]
#[case(1, "a long string!", "    a long string!\n")]
#[case(0, "a long string!\nwith a new line!", "a long string!\nwith a new line!\n")]
#[case(
    2,
    "a long string!\nwith a new line!",
    "        a long string!\n        with a new line!\n"
)]
fn given_node_at_depth_when_writing_then_every_line_is_indented(
    #[case] depth: usize,
    #[case] input: &str,
    #[case] expected: &str,
) {
    testing::init_test_setup();
    let node = node_at_depth(depth);

    let n = node.write_str(input).unwrap();

    assert_eq!(n, expected.len(), "count is the formatted length");
    assert_eq!(String::from_utf8(node.contents()).unwrap(), expected);
}

#[test]
fn given_byte_input_when_writing_then_matches_str_variant() {
    let node = node_at_depth(1);
    node.write(b"bytes".as_slice()).unwrap();
    node.write_str("text").unwrap();
    assert_eq!(node.contents(), b"    bytes\n    text\n");
}

#[rstest]
#[case(0)]
#[case(3)]
fn given_empty_input_when_writing_then_nothing_is_appended(#[case] depth: usize) {
    let node = node_at_depth(depth);
    assert_eq!(node.write_str("").unwrap(), 0);
    assert!(node.contents().is_empty());
}

#[test]
fn given_multiline_input_when_writing_then_line_count_is_preserved() {
    let node = node_at_depth(2);
    let input = "first\nsecond\nthird";

    node.write_str(input).unwrap();

    let contents = String::from_utf8(node.contents()).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.lines().all(|l| l.starts_with("        ")));
}

// ============================================================
// Children and titles
// ============================================================

#[test]
fn given_parent_when_creating_children_then_depth_increments() {
    let root = IndentedNode::new();
    let child = root.create_child();
    let grandchild = child.create_titled_child("title");

    assert_eq!(root.depth(), 0);
    assert_eq!(child.depth(), 1);
    assert_eq!(grandchild.depth(), 2);
    assert_eq!(root.child_count(), 1);
    assert_eq!(child.child_count(), 1);
    assert_eq!(grandchild.child_count(), 0);
}

#[test]
fn given_title_when_creating_child_then_title_uses_parent_depth() {
    let root = IndentedNode::new();
    let level1 = root.create_child();

    let child = level1.create_titled_child("Section");
    child.write_str("body").unwrap();

    assert_eq!(child.contents(), b"    Section\n        body\n");
}

#[test]
fn given_empty_title_when_creating_child_then_buffer_starts_empty() {
    let root = IndentedNode::new();
    let child = root.create_titled_child("");
    assert!(child.contents().is_empty());
    child.write_str("indented").unwrap();
    assert_eq!(render(&root), "    indented\n");
}

// ============================================================
// Flush
// ============================================================

#[test]
fn given_fresh_root_when_flushing_then_writes_nothing() {
    let root = IndentedNode::new();
    let mut out = Vec::new();
    assert_eq!(root.flush_to(&mut out).unwrap(), 0);
    assert!(out.is_empty());
}

#[test]
fn given_titled_list_when_flushing_then_title_precedes_items() {
    let root = IndentedNode::new();
    let list = root.create_titled_child("List");
    list.write_str("x").unwrap();
    list.write_str("y\nz").unwrap();

    assert_eq!(render(&root), "List\n    x\n    y\n    z\n");
}

#[test]
fn given_untitled_siblings_when_flushing_then_creation_order_wins() {
    let root = IndentedNode::new();
    let a = root.create_child();
    let b = root.create_child();
    b.write_str("b").unwrap();
    a.write_str("a").unwrap();

    assert_eq!(render(&root), "    a\n    b\n");
}

#[test]
fn given_parent_written_after_children_when_flushing_then_parent_content_comes_first() {
    let root = IndentedNode::new();
    let child = root.create_titled_child("child");
    child.write_str("inner").unwrap();
    root.write_str("late root line").unwrap();

    assert_eq!(render(&root), "late root line\nchild\n    inner\n");
}

#[test]
fn given_nested_tree_when_flushing_then_count_is_sum_of_buffers() {
    let root = IndentedNode::new();
    root.write_str("top").unwrap();
    let a = root.create_titled_child("a");
    a.write_str("a1\na2").unwrap();
    let deep = a.create_titled_child("deep");
    deep.write_str("d").unwrap();
    root.create_titled_child("b").write_str("b1").unwrap();

    let expected: usize = [
        root.contents(),
        a.contents(),
        deep.contents(),
        root.children()[1].contents(),
    ]
    .iter()
    .map(Vec::len)
    .sum();

    let mut out = Vec::new();
    let written = root.flush_to(&mut out).unwrap();

    assert_eq!(written, expected as u64);
    assert_eq!(out.len(), expected);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "top\na\n    a1\n    a2\n    deep\n        d\nb\n    b1\n"
    );
}

#[test]
fn given_subtree_when_flushing_child_then_only_subtree_is_rendered() {
    let root = IndentedNode::new();
    root.write_str("root").unwrap();
    let child = root.create_titled_child("child");
    child.write_str("body").unwrap();

    assert_eq!(render(&child), "child\n    body\n");
    assert_eq!(render(&root), "root\n");
}

#[test]
fn given_failing_sink_when_flushing_then_partial_count_is_reported() {
    testing::init_test_setup();
    let root = IndentedNode::new();
    root.write_str("root").unwrap();
    let a = root.create_child();
    a.write_str("a").unwrap();
    let b = root.create_child();
    b.write_str("b").unwrap();

    let mut sink = LimitedSink {
        data: Vec::new(),
        limit: 8,
    };
    let err = root.flush_to(&mut sink).unwrap_err();

    match &err {
        NestError::SinkWrite { written, source } => {
            assert_eq!(*written, 8);
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("expected SinkWrite, got {other}"),
    }
    assert_eq!(err.bytes_written(), 8);
    assert_eq!(sink.data, b"root\n   ");
    // the accepted prefix is gone, the rest stays buffered
    assert_eq!(a.contents(), b" a\n");
    // siblings after the failing child are not visited
    assert_eq!(b.contents(), b"    b\n");
}

/// Registers a late child on `parent` the first time it sees `trigger`.
struct RegisteringSink {
    data: Vec<u8>,
    parent: IndentedNode,
    trigger: &'static [u8],
    fired: bool,
}

impl Write for RegisteringSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.fired && buf.starts_with(self.trigger) {
            self.fired = true;
            self.parent.create_titled_child("late");
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn given_child_added_mid_flush_when_flushing_then_it_is_not_visited() {
    let root = IndentedNode::new();
    root.write_str("root").unwrap();
    root.create_child().write_str("a").unwrap();

    let mut sink = RegisteringSink {
        data: Vec::new(),
        parent: root.clone(),
        trigger: b"    a",
        fired: false,
    };
    let written = root.flush_to(&mut sink).unwrap();

    assert!(sink.fired);
    assert_eq!(sink.data, b"root\n    a\n");
    assert_eq!(written as usize, sink.data.len());

    let children = root.children();
    assert_eq!(children.len(), 2, "late child is registered");
    assert_eq!(children[1].contents(), b"late\n", "its title is still buffered");
}

// ============================================================
// Deep trees
// ============================================================

const DEEP: usize = 100_000;

#[test]
fn given_very_deep_chain_when_flushing_then_walks_without_overflow() {
    let root = IndentedNode::new();
    root.write_str("top").unwrap();
    let mut node = root.clone();
    for _ in 0..DEEP {
        node = node.create_child();
    }
    assert_eq!(node.depth(), DEEP);
    node.write_str("leaf").unwrap();
    let leaf_len = node.contents().len();
    drop(node);

    let mut out = Vec::new();
    let written = root.flush_to(&mut out).unwrap();

    assert_eq!(written as usize, "top\n".len() + leaf_len);
    assert!(out.starts_with(b"top\n"));
    assert!(out.ends_with(b" leaf\n"));
}

#[test]
fn given_very_deep_chain_when_dropping_handles_then_teardown_completes() {
    let root = IndentedNode::new();
    let mut node = root.clone();
    for _ in 0..DEEP {
        node = node.create_child();
    }

    drop(node);
    drop(root);
}

#[test]
fn given_deep_chain_with_held_leaf_when_dropping_root_then_leaf_stays_usable() {
    let root = IndentedNode::new();
    let mut node = root.clone();
    for _ in 0..DEEP {
        node = node.create_child();
    }

    drop(root);

    node.write_str("still here").unwrap();
    assert_eq!(node.depth(), DEEP);
    assert!(node.contents().ends_with(b"still here\n"));
}
