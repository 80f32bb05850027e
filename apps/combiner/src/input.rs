//! Reading commands from a line-oriented source.
//!
//! A line is a command unless it is blank or its first non-whitespace
//! character is `#`. Leading whitespace is dropped; the rest of the line is
//! kept as-is.

use std::fs;
use std::path::Path;

use crate::errors::Result;

/// Returns the command carried by `line`, if any.
pub fn accept_line(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let command = line.trim_start();
    if command.is_empty() || command.starts_with('#') {
        return None;
    }
    Some(command)
}

/// Extracts every accepted command from `text`, in order.
pub fn parse_commands(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(accept_line)
        .map(str::to_string)
        .collect()
}

pub fn read_commands(path: &Path) -> Result<Vec<String>> {
    Ok(parse_commands(&fs::read_to_string(path)?))
}

/// Writes one output command per line.
pub fn write_output<I, S>(path: &Path, lines: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    let mut count = 0;
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
        count += 1;
    }
    fs::write(path, text)?;
    Ok(count)
}
