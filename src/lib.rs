//! Nestable, thread-safe writer tree.
//!
//! Build a tree of [`IndentedNode`]s, write into any node from any thread,
//! then render the whole tree, indented by depth, with a single
//! [`IndentedNode::flush_to`] call.
//!
//! ```
//! use nest_writer::IndentedNode;
//!
//! let root = IndentedNode::new();
//! let list = root.create_titled_child("List");
//! list.write_str("x").unwrap();
//! list.write_str("y\nz").unwrap();
//!
//! let mut out = Vec::new();
//! root.flush_to(&mut out).unwrap();
//! assert_eq!(out, b"List\n    x\n    y\n    z\n");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{IndentedNode, NestError, NestResult, SimpleNode};
