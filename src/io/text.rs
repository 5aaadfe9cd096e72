use std::io::BufRead;
use std::path::Path;

use super::Err;

/// Whitespace as classified by the C locale: space, `\t`, `\n`, `\v`, `\f` and `\r`.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Removes leading and trailing whitespace.
pub fn trim(line: &str) -> &str {
    line.trim_matches(is_space)
}

/// Fails with [`Err::FileNotFound`] unless `path` names an existing filesystem entry.
pub fn ensure_exists(path: &Path) -> Result<(), Err> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(_) => Err(Err::FileNotFound { path: path.to_path_buf() }),
    }
}

fn trim_bytes(line: &[u8]) -> &[u8] {
    let keep = |b: &u8| !is_space(char::from(*b));
    match line.iter().position(keep) {
        Some(start) => {
            let end = line.iter().rposition(keep).map_or(start, |i| i + 1);
            &line[start..end]
        }
        None => &[],
    }
}

/// Whitespace-separated tokens of a line, up to the first `#`.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    let content = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    content.split(is_space).filter(|t| !t.is_empty())
}

/// Parses a header line of exactly `N` integers.
pub(crate) fn header_integers<const N: usize>(line: &str) -> Option<[i64; N]> {
    let values = tokens(line)
        .map(|t| t.parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    values.try_into().ok()
}

/// Parses a record line of exactly `expected` floating point numbers.
pub(crate) fn record_numbers(line: &str, expected: usize) -> Option<Vec<f32>> {
    let values = tokens(line)
        .map(|t| t.parse::<f32>().ok())
        .collect::<Option<Vec<_>>>()?;
    (values.len() == expected).then_some(values)
}

/// Iterates over the trimmed lines that carry content, paired with their
/// one-based physical line number. Blank lines and lines starting with `#`
/// are skipped but still counted.
///
/// Lines are split on raw bytes and only kept lines are decoded, lossily, so
/// stray non-UTF-8 bytes in comments never abort a read.
pub(crate) struct SignificantLines<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> SignificantLines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader, buffer: Vec::new(), line_number: 0 }
    }
}

impl<R: BufRead> Iterator for SignificantLines<R> {
    type Item = std::io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line_number += 1;

            let line = trim_bytes(&self.buffer);
            if line.is_empty() || line[0] == b'#' {
                continue;
            }
            let line = String::from_utf8_lossy(line);
            return Some(Ok((self.line_number, trim(&line).to_owned())));
        }
    }
}
