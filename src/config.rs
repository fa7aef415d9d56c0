use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// Everything from this marker to the end of the line is a comment.
pub const COMMENT_MARKER: char = '#';

/// Reads a line-oriented, comment-annotated text file and returns its
/// cleaned lines, in order.
///
/// This knows nothing about the RLE grammar; it is the generic "config file"
/// front half: drop comments, drop blanks, keep the rest.
pub fn load(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let lines = clean_lines(text.lines());

    debug!(path = %path.display(), lines = lines.len(), "loaded pattern file");

    Ok(lines)
}

/// Strips each line from the first [`COMMENT_MARKER`] onward, trims
/// surrounding whitespace, and drops lines that end up empty.
pub fn clean_lines<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| match line.find(COMMENT_MARKER) {
            Some(i) => &line[..i],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
