//! Field codecs: pulling one typed value out of a line.
//!
//! A [`FieldCodec`] receives the whole line, a [`Cursor`] where the previous
//! field stopped, and the field's position [`FieldHints`]. It returns the value
//! and the cursor for the next field. The hints say whether the line is allowed
//! to end early at this field: only when it is the last field, or when the
//! following field is optional.
//!
//! Two codecs are built in and selected from the field's layout:
//! - [`FixedWidthCodec`] takes `width` characters.
//! - [`DelimitedCodec`] reads up to the next delimiter, optionally honouring a
//!   quote character.
//!
//! Both hand the raw text to [`convert`] for the declared [`FieldType`].

use crate::value::{FieldType, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byte position reached in a line.
///
/// `exhausted` is set once a field consumed the end of the line without a
/// trailing delimiter, so a following delimited field knows there is nothing
/// left, not even an empty value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub offset: usize,
    pub exhausted: bool,
}

impl Cursor {
    #[must_use]
    pub fn start() -> Self {
        Self::default()
    }

    fn end_of(line: &str) -> Self {
        Self {
            offset: line.len(),
            exhausted: true,
        }
    }
}

/// Position hints computed when the field plan is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldHints {
    pub optional: bool,
    pub is_first: bool,
    pub is_last: bool,
    pub next_is_optional: bool,
}

impl FieldHints {
    /// The line may legally end inside or right after this field.
    #[must_use]
    pub fn may_end_early(&self) -> bool {
        self.is_last || self.next_is_optional
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("line ended after {available} of {needed} characters")]
    LineTooShort { needed: usize, available: usize },

    #[error("line ended before this field")]
    MissingValue,

    #[error("delimiter {delimiter:?} not found")]
    DelimiterNotFound { delimiter: String },

    #[error("unexpected data after the last field at offset {offset}")]
    TrailingData { offset: usize },

    #[error("malformed quoted value at offset {offset}")]
    MalformedQuote { offset: usize },

    #[error("cannot parse {text:?} as {target}")]
    Parse { text: String, target: FieldType },

    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    pub fn custom(message: impl Into<String>) -> Self {
        CodecError::Custom(message.into())
    }
}

/// Extraction capability for a single field.
pub trait FieldCodec: Send + Sync {
    /// Extract this field's value from `line` starting at `cursor`.
    ///
    /// # Errors
    /// Returns a [`CodecError`] when the line cannot supply the field.
    fn extract(
        &self,
        line: &str,
        cursor: Cursor,
        hints: &FieldHints,
    ) -> Result<(Value, Cursor), CodecError>;
}

/// Whitespace trimming applied to raw text before conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrimMode {
    #[default]
    None,
    Both,
    Start,
    End,
}

impl TrimMode {
    #[must_use]
    pub fn apply(self, raw: &str) -> &str {
        match self {
            TrimMode::None => raw,
            TrimMode::Both => raw.trim(),
            TrimMode::Start => raw.trim_start(),
            TrimMode::End => raw.trim_end(),
        }
    }
}

/// Convert raw field text into a value of `target`.
///
/// Text and char fields honour `trim`; numeric and bool fields always ignore
/// surrounding whitespace. Blank input for anything but text is
/// [`Value::Absent`].
///
/// # Errors
/// [`CodecError::Parse`] when the text is not a valid `target`.
pub fn convert(raw: &str, target: FieldType, trim: TrimMode) -> Result<Value, CodecError> {
    let parse_error = || CodecError::Parse {
        text: raw.to_string(),
        target,
    };
    match target {
        FieldType::Text => Ok(Value::Text(trim.apply(raw).to_string())),
        FieldType::Char => {
            let text = trim.apply(raw);
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (None, _) => Ok(Value::Absent),
                (Some(c), None) => Ok(Value::Char(c)),
                (Some(_), Some(_)) => Err(parse_error()),
            }
        }
        FieldType::Int | FieldType::UInt | FieldType::Float | FieldType::Bool => {
            let text = raw.trim();
            if text.is_empty() {
                return Ok(Value::Absent);
            }
            match target {
                FieldType::Int => text.parse().map(Value::Int).map_err(|_| parse_error()),
                FieldType::UInt => text.parse().map(Value::UInt).map_err(|_| parse_error()),
                FieldType::Float => text.parse().map(Value::Float).map_err(|_| parse_error()),
                _ => parse_bool(text).map(Value::Bool).ok_or_else(parse_error),
            }
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "y" | "yes" => Some(true),
        "false" | "f" | "0" | "n" | "no" => Some(false),
        _ => None,
    }
}

/// Reads a fixed number of characters.
///
/// Text left over after the last field is an error, as it is for delimited
/// records.
#[derive(Clone, Debug)]
pub struct FixedWidthCodec {
    pub width: usize,
    pub field_type: FieldType,
    pub trim: TrimMode,
}

impl FieldCodec for FixedWidthCodec {
    fn extract(
        &self,
        line: &str,
        cursor: Cursor,
        hints: &FieldHints,
    ) -> Result<(Value, Cursor), CodecError> {
        let rest = line.get(cursor.offset..).unwrap_or_default();
        if cursor.exhausted || rest.is_empty() {
            if hints.optional {
                return Ok((Value::Absent, Cursor::end_of(line)));
            }
            return Err(CodecError::LineTooShort {
                needed: self.width,
                available: 0,
            });
        }

        let mut taken = 0;
        let mut end = rest.len();
        for (i, _) in rest.char_indices() {
            if taken == self.width {
                end = i;
                break;
            }
            taken += 1;
        }
        if taken < self.width && !hints.may_end_early() {
            return Err(CodecError::LineTooShort {
                needed: self.width,
                available: taken,
            });
        }

        let offset = cursor.offset + end;
        if hints.is_last && offset < line.len() {
            return Err(CodecError::TrailingData { offset });
        }
        let value = convert(&rest[..end], self.field_type, self.trim)?;
        Ok((
            value,
            Cursor {
                offset,
                exhausted: offset >= line.len(),
            },
        ))
    }
}

/// Reads up to the next delimiter.
///
/// With a `quote` character, a value starting with it runs to the matching
/// closing quote; a doubled quote inside stands for one literal quote.
#[derive(Clone, Debug)]
pub struct DelimitedCodec {
    pub delimiter: String,
    pub quote: Option<char>,
    pub field_type: FieldType,
    pub trim: TrimMode,
}

impl DelimitedCodec {
    fn after_value(
        &self,
        line: &str,
        value_end: usize,
        hints: &FieldHints,
    ) -> Result<Cursor, CodecError> {
        let tail = &line[value_end..];
        if tail.is_empty() {
            if hints.may_end_early() {
                return Ok(Cursor::end_of(line));
            }
            return Err(CodecError::DelimiterNotFound {
                delimiter: self.delimiter.clone(),
            });
        }
        if !tail.starts_with(self.delimiter.as_str()) {
            return Err(CodecError::MalformedQuote { offset: value_end });
        }
        if hints.is_last {
            return Err(CodecError::TrailingData { offset: value_end });
        }
        Ok(Cursor {
            offset: value_end + self.delimiter.len(),
            exhausted: false,
        })
    }

    fn extract_quoted(
        &self,
        line: &str,
        cursor: Cursor,
        quote: char,
        hints: &FieldHints,
    ) -> Result<(Value, Cursor), CodecError> {
        let body_start = cursor.offset + quote.len_utf8();
        let mut text = String::new();
        let mut chars = line[body_start..].char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != quote {
                text.push(c);
                continue;
            }
            if let Some(&(_, next)) = chars.peek()
                && next == quote
            {
                text.push(quote);
                chars.next();
                continue;
            }
            let value_end = body_start + i + quote.len_utf8();
            let next = self.after_value(line, value_end, hints)?;
            let value = convert(&text, self.field_type, self.trim)?;
            return Ok((value, next));
        }
        Err(CodecError::MalformedQuote {
            offset: cursor.offset,
        })
    }
}

impl FieldCodec for DelimitedCodec {
    fn extract(
        &self,
        line: &str,
        cursor: Cursor,
        hints: &FieldHints,
    ) -> Result<(Value, Cursor), CodecError> {
        if cursor.exhausted {
            if hints.optional {
                return Ok((Value::Absent, cursor));
            }
            return Err(CodecError::MissingValue);
        }

        let rest = line.get(cursor.offset..).unwrap_or_default();
        if let Some(quote) = self.quote
            && rest.starts_with(quote)
        {
            return self.extract_quoted(line, cursor, quote, hints);
        }

        let value_end = match rest.find(self.delimiter.as_str()) {
            Some(i) => cursor.offset + i,
            None => line.len(),
        };
        let next = self.after_value(line, value_end, hints)?;
        let value = convert(&line[cursor.offset..value_end], self.field_type, self.trim)?;
        Ok((value, next))
    }
}
