//! Application layer: report use cases built on the writer tree
//!
//! This layer orchestrates domain logic and owns the output sink.

pub mod error;
pub mod error_ext;
pub mod report;
pub mod sink;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use report::{build_list_report, build_list_report_concurrent, run_stress, StressReport};
pub use sink::open_sink;
