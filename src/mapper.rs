//! Mapping one line of text to one record.
//!
//! Per line the mapper goes through:
//!
//! ```text
//! Start ─ skip rule fires ───────────────────────────────▶ Skipped
//!   └─▶ Extracting ─▶ Extracted ─▶ Assigning ─▶ Done ──▶ Record
//!           └───────────────┴────────────┴──────────────▶ MapError
//! ```
//!
//! A line either produces a fully populated record, is skipped, or fails as a
//! whole. Partially assigned records are never returned.

use crate::error::{MapError, SchemaError};
use crate::factory::RecordFactory;
use crate::filter::LineFilter;
use crate::layout::{FlatRecord, RecordLayout};
use crate::options::RecordOptions;
use crate::plan::FieldPlan;
use crate::reader::RecordReader;
use std::any::type_name;
use std::fmt;
use tracing::debug;

/// Result of mapping a line that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum LineOutcome<R> {
    Record(R),
    /// A skip rule fired; the line is not data.
    Skipped,
}

impl<R> LineOutcome<R> {
    #[must_use]
    pub fn into_record(self) -> Option<R> {
        match self {
            LineOutcome::Record(r) => Some(r),
            LineOutcome::Skipped => None,
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, LineOutcome::Skipped)
    }
}

/// Maps lines to records of type `R`.
///
/// Configuration is immutable after [`RecordMapper::new`], so a mapper can be
/// shared between threads that map lines independently.
pub struct RecordMapper<R> {
    plan: FieldPlan<R>,
    filter: LineFilter,
    factory: RecordFactory<R>,
    options: RecordOptions,
}

impl<R> fmt::Debug for RecordMapper<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordMapper")
            .field("record", &type_name::<R>())
            .field("plan", &self.plan)
            .field("filter", &self.filter)
            .field("factory", &self.factory)
            .field("options", &self.options)
            .finish()
    }
}

impl<R: FlatRecord> RecordMapper<R> {
    /// Set up a mapper from `R`'s own layout.
    ///
    /// # Errors
    /// See [`RecordMapper::new`].
    pub fn for_record() -> Result<Self, SchemaError> {
        Self::new(R::layout())
    }
}

impl<R: 'static> RecordMapper<R> {
    /// Setup: build the field plan, compile the line filter and resolve the
    /// record factory.
    ///
    /// # Errors
    /// A [`SchemaError`] if no field is mapped, a field layout is invalid, the
    /// condition does not compile, or no constructor is set.
    pub fn new(layout: RecordLayout<R>) -> Result<Self, SchemaError> {
        let RecordLayout {
            options,
            fields,
            constructor,
            context_constructor,
            rules,
        } = layout;
        let record = type_name::<R>();

        let plan = FieldPlan::build(record, fields, options.layout_kind)?;
        let mut filter = LineFilter::from_options(&options)?;
        for rule in rules {
            filter.push(rule);
        }
        let factory = RecordFactory::resolve(constructor, context_constructor)?;

        debug!(
            record,
            fields = plan.len(),
            skip_rules = filter.len(),
            ignore_first = options.ignore_first,
            ignore_last = options.ignore_last,
            "record mapper ready"
        );
        Ok(Self {
            plan,
            filter,
            factory,
            options,
        })
    }

    /// Map a single line; `line_number` is 1-based and only used in errors.
    ///
    /// # Errors
    /// [`MapError::Field`] when a field fails to extract or assign,
    /// [`MapError::Construction`] when the record cannot be created.
    pub fn map_line(&self, line: &str, line_number: usize) -> Result<LineOutcome<R>, MapError> {
        if self.filter.should_skip(line) {
            return Ok(LineOutcome::Skipped);
        }

        let values = self.plan.extract(line, line_number)?;

        let mut record = self
            .factory
            .create()
            .map_err(|source| MapError::Construction {
                line_number,
                source,
            })?;

        for (field, value) in self.plan.fields().iter().zip(values) {
            field.assign(&mut record, value, line_number)?;
        }
        Ok(LineOutcome::Record(record))
    }

    /// Map a sequence of lines, honouring `ignore_first` and `ignore_last`.
    pub fn records<I>(&self, lines: I) -> RecordReader<'_, R, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        RecordReader::new(self, lines.into_iter())
    }

    #[must_use]
    pub fn plan(&self) -> &FieldPlan<R> {
        &self.plan
    }

    #[must_use]
    pub fn filter(&self) -> &LineFilter {
        &self.filter
    }

    #[must_use]
    pub fn options(&self) -> &RecordOptions {
        &self.options
    }

    #[must_use]
    pub fn should_skip(&self, line: &str) -> bool {
        self.filter.should_skip(line)
    }

    #[must_use]
    pub fn size_hint(&self) -> usize {
        self.plan.size_hint()
    }
}
