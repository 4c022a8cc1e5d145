//! Error taxonomy for record mapping.
//!
//! - [`SchemaError`]: raised once while a mapper is being set up. Nothing is
//!   mapped after one of these.
//! - [`ConstructionError`]: the record factory failed to produce an instance.
//! - [`FieldExtractionError`]: a field codec failed on a line, or produced a
//!   value that cannot be assigned to the field.
//! - [`MapError`]: what [`RecordMapper::map_line`](crate::RecordMapper::map_line)
//!   returns for a line that could not be mapped.
//!
//! A skipped line is not an error; it is reported as
//! [`LineOutcome::Skipped`](crate::LineOutcome::Skipped).

use crate::codec::CodecError;
use crate::options::LayoutKind;
use crate::value::FieldType;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Setup-time failures. Fatal for the record type being configured.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("record type {record} declares no mapped fields")]
    NoMappedFields { record: &'static str },

    #[error("record type {record} has no constructor; set one on its layout")]
    NoConstructor { record: &'static str },

    #[error("field {field} has a {found} layout but the record is {expected}")]
    LayoutMismatch {
        field: String,
        expected: LayoutKind,
        found: LayoutKind,
    },

    #[error("fixed-length field {field} has zero width")]
    ZeroWidth { field: String },

    #[error("delimited field {field} has an empty delimiter")]
    EmptyDelimiter { field: String },

    #[error("optional field {field} needs an Option setter to hold an absent value")]
    OptionalNotNullable { field: String },

    #[error("field {field} is mapped more than once")]
    DuplicateField { field: String },

    #[error("condition {condition} needs a non-empty selector")]
    EmptySelector { condition: &'static str },

    #[error("invalid condition pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid record options")]
    InvalidOptions(#[from] serde_json::Error),
}

/// The record factory could not produce an instance.
#[derive(Debug, Error)]
#[error("cannot construct {record}")]
pub struct ConstructionError {
    pub record: &'static str,
    #[source]
    pub source: BoxError,
}

impl ConstructionError {
    pub fn new<E>(record: &'static str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            record,
            source: source.into(),
        }
    }
}

/// Why a single field could not be produced for a line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionCause {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The codec produced a value of another type than the field declares.
    #[error("codec returned a {found} value")]
    TypeMismatch { found: String },

    /// The value has the declared type but does not fit the field, e.g. an
    /// integer overflowing `i16`, or an absent value for a non-`Option` field.
    #[error("{found} value does not fit the field")]
    Unassignable { found: String },
}

/// A field of one line failed to extract or assign.
#[derive(Debug, Error)]
#[error("line {line_number}: field {field} ({field_type}): {cause}")]
pub struct FieldExtractionError {
    pub line_number: usize,
    pub field: String,
    pub field_type: FieldType,
    /// Rendered value that failed to assign, when one was produced.
    pub actual: Option<String>,
    /// Rendered in the message and not chained as a source.
    pub cause: ExtractionCause,
}

/// Per-line mapping failure. The line produces no record.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    #[error("line {line_number}: record construction failed")]
    Construction {
        line_number: usize,
        #[source]
        source: ConstructionError,
    },

    #[error(transparent)]
    Field(#[from] FieldExtractionError),
}

impl MapError {
    /// The 1-based line the error belongs to.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            MapError::Construction { line_number, .. } => *line_number,
            MapError::Field(e) => e.line_number,
        }
    }
}
