//! Line indentation applied to every piece of text entering a node buffer.

/// Spaces contributed by each level of depth.
pub const INDENT_WIDTH: usize = 4;

/// Indents every line of `text` by `INDENT_WIDTH * depth` spaces and
/// terminates the block with a single `\n`.
///
/// Empty input is returned unchanged: no prefix, no terminator.
/// Lines are split on `\n` only, so a trailing `\n` in the input yields a
/// final line holding just the prefix.
pub fn indent_block(text: &[u8], depth: usize) -> Vec<u8> {
    if text.is_empty() {
        return Vec::new();
    }

    let prefix_len = INDENT_WIDTH * depth;
    let line_count = text.iter().filter(|&&b| b == b'\n').count() + 1;
    let mut out = Vec::with_capacity(text.len() + line_count * prefix_len + 1);

    for (i, line) in text.split(|&b| b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.resize(out.len() + prefix_len, b' ');
        out.extend_from_slice(line);
    }
    out.push(b'\n');

    out
}
