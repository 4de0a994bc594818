//! Domain layer: the writer tree and its formatting rules
//!
//! This layer is independent of external concerns (no CLI, no config loading).

pub mod error;
pub mod format;
pub mod node;
pub mod simple;

pub use error::{NestError, NestResult};
pub use format::{indent_block, INDENT_WIDTH};
pub use node::IndentedNode;
pub use simple::SimpleNode;
