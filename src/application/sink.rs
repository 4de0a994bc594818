//! Output sink selection: stdout or a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};

/// Opens the destination a rendered tree is flushed to.
///
/// `None` selects stdout. A path is created (or truncated).
pub fn open_sink(output: Option<&Path>) -> ApplicationResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            debug!("open_sink: {}", path.display());
            let file = File::create(path).with_path_context("create output", path)?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
