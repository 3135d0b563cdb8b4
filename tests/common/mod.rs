use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

#[allow(dead_code)]
pub fn read_lines(path: PathBuf) -> Result<Vec<String>, anyhow::Error> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().map(|x| x.unwrap()).collect();
    Ok(lines)
}

/// Split a line into (prefix, suffix) the same way the sorter does: on
/// the first space, with a spaceless line becoming (whole_line, "").
#[allow(dead_code)]
fn split_prefix_suffix(line: &str) -> (&str, &str) {
    match line.find(' ') {
        Some(i) => (&line[..i], &line[i + 1..]),
        None => (line, ""),
    }
}

/// True if every adjacent pair in `lines` is non-decreasing under the
/// sorter's own (suffix, prefix) composite key - the same check used to
/// assert totally-ordered output without assuming plain string order
/// coincides with it.
#[allow(dead_code)]
pub fn is_ordered_by_suffix_then_prefix(lines: &[String]) -> bool {
    lines.windows(2).all(|pair| {
        let (prefix_a, suffix_a) = split_prefix_suffix(&pair[0]);
        let (prefix_b, suffix_b) = split_prefix_suffix(&pair[1]);
        (suffix_a, prefix_a) <= (suffix_b, prefix_b)
    })
}
