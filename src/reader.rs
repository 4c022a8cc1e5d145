//! Mapping a sequence of lines.
//!
//! [`RecordReader`] numbers lines from 1, drops the first `ignore_first` and
//! the last `ignore_last` lines, and maps everything in between. The two
//! counts are independent: leading lines are dropped as they arrive, trailing
//! lines are held back in a look-behind buffer until the input ends.

use crate::error::MapError;
use crate::mapper::{LineOutcome, RecordMapper};
use std::collections::VecDeque;
use tracing::debug;

/// Iterator of mapped records over an iterator of lines.
///
/// Yields one item per data line: `Ok(record)` or the line's [`MapError`].
/// Skipped lines produce nothing. Created by [`RecordMapper::records`].
pub struct RecordReader<'m, R, I>
where
    I: Iterator,
{
    mapper: &'m RecordMapper<R>,
    lines: I,
    line_number: usize,
    held: VecDeque<(usize, I::Item)>,
}

impl<'m, R, I> RecordReader<'m, R, I>
where
    R: 'static,
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub(crate) fn new(mapper: &'m RecordMapper<R>, lines: I) -> Self {
        Self {
            mapper,
            lines,
            line_number: 0,
            held: VecDeque::with_capacity(mapper.options().ignore_last + 1),
        }
    }

    /// Number of physical lines pulled from the input so far.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn next_data_line(&mut self) -> Option<(usize, I::Item)> {
        let ignore_first = self.mapper.options().ignore_first;
        let ignore_last = self.mapper.options().ignore_last;
        loop {
            let Some(line) = self.lines.next() else {
                if !self.held.is_empty() {
                    debug!(lines = self.held.len(), "ignoring trailing lines");
                    self.held.clear();
                }
                return None;
            };
            self.line_number += 1;
            if self.line_number <= ignore_first {
                debug!(line_number = self.line_number, "ignoring leading line");
                continue;
            }
            if ignore_last == 0 {
                return Some((self.line_number, line));
            }
            self.held.push_back((self.line_number, line));
            if self.held.len() > ignore_last {
                return self.held.pop_front();
            }
        }
    }
}

impl<R, I> Iterator for RecordReader<'_, R, I>
where
    R: 'static,
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<R, MapError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line_number, line) = self.next_data_line()?;
            match self.mapper.map_line(line.as_ref(), line_number) {
                Ok(LineOutcome::Record(record)) => return Some(Ok(record)),
                Ok(LineOutcome::Skipped) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
