//! Report use cases: the list demo and the parallel stress run.

use std::io::Write;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{IndentedNode, SimpleNode, INDENT_WIDTH};

pub const ORDERED_TITLE: &str = "This is the start of the ordered list";
pub const UNORDERED_TITLE: &str = "This is the start of the unordered list";

/// Builds the ordered/unordered list report under `root`, one write at a time.
#[instrument(level = "debug", skip_all)]
pub fn build_list_report(root: &IndentedNode) -> ApplicationResult<()> {
    let ordered = root.create_titled_child(ORDERED_TITLE);

    let one = ordered.create_titled_child("1. Item one");
    one.write_str("1.1 Written item")?;

    let two = ordered.create_titled_child("2. Item two");
    two.write_str("2.1 Written item")?;
    two.write_str("2.1 Written item")?;

    let three = ordered.create_titled_child("3. Item three");
    three.write_str("3.1 Written item")?;

    let unordered = root.create_titled_child(UNORDERED_TITLE);
    for item in ["- Item one", "- Item two", "- Item three"] {
        unordered.write_str(item)?;
    }

    Ok(())
}

/// Same report as [`build_list_report`], with the items produced by
/// parallel tasks. Sibling order in the output follows whichever task
/// registered its child first.
#[instrument(level = "debug", skip_all)]
pub fn build_list_report_concurrent(root: &SimpleNode) {
    let ordered = root.child(ORDERED_TITLE);
    let ordered = &ordered;

    rayon::scope(|s| {
        s.spawn(move |s| {
            s.spawn(move |_| {
                let one = ordered.child("1. Item one");
                one.write("1.1 Written item");
            });
            s.spawn(move |_| {
                let two = ordered.child("2. Item two");
                two.write("2.1 Written item");
                two.write("2.1 Written item");
            });
            s.spawn(move |_| {
                let three = ordered.child("3. Item three");
                three.write("3.1 Written item");
            });
        });

        s.spawn(|_| {
            let unordered = root.child(UNORDERED_TITLE);
            unordered.write("- Item one");
            unordered.write("- Item two");
            unordered.write("- Item three");
        });
    });
}

/// Outcome of a stress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressReport {
    pub lines: usize,
    pub bytes: u64,
}

/// Runs `workers` parallel writers against one tree and renders it to `sink`.
///
/// Each worker fills its own titled child with `writes` lines and reports
/// completion on the shared root. The rendered output is checked for line
/// count and per-line well-formedness before it is written out.
#[instrument(level = "debug", skip(sink))]
pub fn run_stress<W: Write + ?Sized>(
    workers: usize,
    writes: usize,
    sink: &mut W,
) -> ApplicationResult<StressReport> {
    let root = IndentedNode::new();

    (0..workers).into_par_iter().try_for_each(|worker| {
        let child = root.create_titled_child(format!("worker {worker}"));
        for line in 0..writes {
            child.write_str(&format!("line {line}"))?;
        }
        root.write_str(&format!("worker {worker} done"))?;
        Ok::<(), ApplicationError>(())
    })?;

    let mut rendered = Vec::new();
    root.flush_to(&mut rendered)?;

    let text = String::from_utf8_lossy(&rendered);
    let expected = workers * (writes + 2);
    let found = validate_lines(&text)?;
    if found != expected {
        return Err(ApplicationError::LineCount { expected, found });
    }

    sink.write_all(&rendered).map_err(|e| ApplicationError::OperationFailed {
        context: "write stress report".to_string(),
        source: Box::new(e),
    })?;
    let bytes = rendered.len() as u64;
    info!(lines = found, bytes, "stress run complete");
    Ok(StressReport {
        lines: found,
        bytes,
    })
}

/// Checks that every line is indented by whole levels and carries text.
/// Returns the number of lines.
fn validate_lines(text: &str) -> ApplicationResult<usize> {
    let mut count = 0;
    for (index, line) in text.lines().enumerate() {
        let body = line.trim_start_matches(' ');
        let indent = line.len() - body.len();
        if body.is_empty() || indent % INDENT_WIDTH != 0 {
            debug!(index, line, "malformed line");
            return Err(ApplicationError::MalformedLine {
                index,
                line: line.to_string(),
            });
        }
        count += 1;
    }
    Ok(count)
}
