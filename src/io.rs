//! Reading records from files and buffered readers.
//!
//! Lines are read one at a time and mapped as they arrive. They are split on
//! `\n` with an optional preceding `\r` removed, and each line buffer starts
//! at the mapper's size hint.

use crate::mapper::RecordMapper;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lazy line iterator that stops at the first read error and parks it,
/// with its 1-based line number, for the caller to report.
struct Lines<'e, B> {
    reader: B,
    capacity: usize,
    line_number: usize,
    failure: &'e mut Option<(usize, io::Error)>,
}

impl<B: BufRead> Iterator for Lines<'_, B> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.failure.is_some() {
            return None;
        }
        let mut line = String::with_capacity(self.capacity + 2);
        self.line_number += 1;
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            Err(e) => {
                *self.failure = Some((self.line_number, e));
                None
            }
        }
    }
}

fn collect_records<R: 'static, B: BufRead>(
    mapper: &RecordMapper<R>,
    reader: B,
    origin: Option<&Path>,
) -> Result<Vec<R>> {
    let describe = |line: Option<usize>| match (line, origin) {
        (Some(n), Some(path)) => format!("read line {n} in {}", path.display()),
        (Some(n), None) => format!("read line {n}"),
        (None, Some(path)) => format!("map records from {}", path.display()),
        (None, None) => "map records".to_string(),
    };

    let mut failure = None;
    let mut out = Vec::new();
    let lines = Lines {
        reader,
        capacity: mapper.size_hint(),
        line_number: 0,
        failure: &mut failure,
    };
    for record in mapper.records(lines) {
        out.push(record.with_context(|| describe(None))?);
    }
    if let Some((line_number, e)) = failure {
        return Err(e).with_context(|| describe(Some(line_number)));
    }
    Ok(out)
}

/// Map every line of `reader` into a `Vec<R>`.
///
/// # Errors
/// Returns an error if reading fails or any line fails to map; the error
/// names the offending line.
pub fn read_records<R: 'static, B: BufRead>(mapper: &RecordMapper<R>, reader: B) -> Result<Vec<R>> {
    collect_records(mapper, reader, None)
}

/// Map every line of the file at `path` into a `Vec<R>`.
///
/// # Errors
/// Returns an error if the file cannot be opened or read, or any line fails
/// to map.
pub fn read_records_file<R: 'static>(
    mapper: &RecordMapper<R>,
    path: impl AsRef<Path>,
) -> Result<Vec<R>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    collect_records(mapper, BufReader::new(f), Some(path))
}
