//! Field metadata and the descriptors built from it.
//!
//! A [`FieldSpec`] is what a record type declares for one of its fields: a
//! name, a typed setter and, for mapped fields, a [`FieldLayout`]. The field
//! factory ([`FieldDescriptor::from_spec`]) turns specs into descriptors with a
//! resolved codec; a spec without layout is an unmapped field and is dropped.

use crate::codec::{Cursor, DelimitedCodec, FieldCodec, FieldHints, FixedWidthCodec, TrimMode};
use crate::error::{ExtractionCause, FieldExtractionError, SchemaError};
use crate::options::LayoutKind;
use crate::value::{FieldType, FromValue, Value};
use std::fmt;
use std::sync::Arc;

type Setter<R> = Arc<dyn Fn(&mut R, Value) -> Result<(), Value> + Send + Sync>;

/// Where a field sits on the line.
///
/// Fixed fields carry no alignment: it only matters when padding records
/// for writing, which this crate does not do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldLayout {
    Fixed { width: usize },
    Delimited { delimiter: String, quote: Option<char> },
}

impl FieldLayout {
    #[must_use]
    pub fn fixed(width: usize) -> Self {
        FieldLayout::Fixed { width }
    }

    #[must_use]
    pub fn delimited(delimiter: impl Into<String>) -> Self {
        FieldLayout::Delimited {
            delimiter: delimiter.into(),
            quote: None,
        }
    }

    #[must_use]
    pub fn quoted(delimiter: impl Into<String>, quote: char) -> Self {
        FieldLayout::Delimited {
            delimiter: delimiter.into(),
            quote: Some(quote),
        }
    }

    #[must_use]
    pub fn kind(&self) -> LayoutKind {
        match self {
            FieldLayout::Fixed { .. } => LayoutKind::Fixed,
            FieldLayout::Delimited { .. } => LayoutKind::Delimited,
        }
    }

    /// Declared width for fixed-length fields.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        match self {
            FieldLayout::Fixed { width } => Some(*width),
            FieldLayout::Delimited { .. } => None,
        }
    }
}

/// Declared metadata for one field of a record type `R`.
pub struct FieldSpec<R> {
    name: String,
    field_type: FieldType,
    nullable: bool,
    setter: Setter<R>,
    layout: Option<FieldLayout>,
    optional: bool,
    trim: TrimMode,
    codec: Option<Arc<dyn FieldCodec>>,
}

impl<R> FieldSpec<R> {
    /// A field named `name` whose values are assigned through `set`.
    ///
    /// The declared type is taken from the setter's value type. Without a
    /// layout the field is unmapped; call [`fixed`](Self::fixed),
    /// [`delimited`](Self::delimited) or [`layout`](Self::layout) to map it.
    pub fn new<F, S>(name: impl Into<String>, set: S) -> Self
    where
        R: 'static,
        F: FromValue + 'static,
        S: Fn(&mut R, F) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            field_type: F::FIELD_TYPE,
            nullable: F::NULLABLE,
            setter: Arc::new(move |record: &mut R, value: Value| {
                set(record, F::from_value(value)?);
                Ok(())
            }),
            layout: None,
            optional: false,
            trim: TrimMode::None,
            codec: None,
        }
    }

    #[must_use]
    pub fn layout(mut self, layout: FieldLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn fixed(self, width: usize) -> Self {
        self.layout(FieldLayout::fixed(width))
    }

    #[must_use]
    pub fn delimited(self, delimiter: impl Into<String>) -> Self {
        self.layout(FieldLayout::delimited(delimiter))
    }

    /// The line may end before this field; it then yields [`Value::Absent`].
    /// The setter must take an `Option`.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn trim(mut self, trim: TrimMode) -> Self {
        self.trim = trim;
        self
    }

    /// Replace the built-in codec for this field.
    #[must_use]
    pub fn codec(mut self, codec: impl FieldCodec + 'static) -> Self {
        self.codec = Some(Arc::new(codec));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.layout.is_some()
    }
}

/// One mapped field, ready to extract and assign.
pub struct FieldDescriptor<R> {
    name: String,
    index: usize,
    field_type: FieldType,
    layout: FieldLayout,
    pub(crate) hints: FieldHints,
    codec: Arc<dyn FieldCodec>,
    setter: Setter<R>,
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            index: self.index,
            field_type: self.field_type,
            layout: self.layout.clone(),
            hints: self.hints,
            codec: Arc::clone(&self.codec),
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("field_type", &self.field_type)
            .field("layout", &self.layout)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

impl<R> FieldDescriptor<R> {
    /// Field factory: build the descriptor for `spec` inside a `kind` record.
    ///
    /// Returns `Ok(None)` for unmapped fields. `index` is the position among
    /// mapped fields; position hints other than `optional` are filled in by
    /// the plan.
    ///
    /// # Errors
    /// A [`SchemaError`] when the layout contradicts the record kind or is
    /// degenerate (zero width, empty delimiter), or when an optional field's
    /// setter cannot take an absent value.
    pub fn from_spec(
        spec: FieldSpec<R>,
        kind: LayoutKind,
        index: usize,
    ) -> Result<Option<Self>, SchemaError> {
        let FieldSpec {
            name,
            field_type,
            nullable,
            setter,
            layout,
            optional,
            trim,
            codec,
        } = spec;
        let Some(layout) = layout else {
            return Ok(None);
        };
        if optional && !nullable {
            return Err(SchemaError::OptionalNotNullable { field: name });
        }
        if layout.kind() != kind {
            return Err(SchemaError::LayoutMismatch {
                field: name,
                expected: kind,
                found: layout.kind(),
            });
        }

        let builtin: Arc<dyn FieldCodec> = match &layout {
            FieldLayout::Fixed { width } => {
                if *width == 0 {
                    return Err(SchemaError::ZeroWidth { field: name });
                }
                Arc::new(FixedWidthCodec {
                    width: *width,
                    field_type,
                    trim,
                })
            }
            FieldLayout::Delimited { delimiter, quote } => {
                if delimiter.is_empty() {
                    return Err(SchemaError::EmptyDelimiter { field: name });
                }
                Arc::new(DelimitedCodec {
                    delimiter: delimiter.clone(),
                    quote: *quote,
                    field_type,
                    trim,
                })
            }
        };

        Ok(Some(Self {
            name,
            index,
            field_type,
            layout,
            hints: FieldHints {
                optional,
                ..FieldHints::default()
            },
            codec: codec.unwrap_or(builtin),
            setter,
        }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[must_use]
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    #[must_use]
    pub fn hints(&self) -> &FieldHints {
        &self.hints
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.hints.optional
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.hints.is_first
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.hints.is_last
    }

    #[must_use]
    pub fn next_is_optional(&self) -> bool {
        self.hints.next_is_optional
    }

    /// Run this field's codec at `cursor`.
    ///
    /// # Errors
    /// The codec failure, attributed to this field and `line_number`.
    pub fn extract(
        &self,
        line: &str,
        cursor: Cursor,
        line_number: usize,
    ) -> Result<(Value, Cursor), FieldExtractionError> {
        self.codec
            .extract(line, cursor, &self.hints)
            .map_err(|e| self.error(line_number, None, e.into()))
    }

    /// Assign `value` into `record`, checking it against the declared type.
    ///
    /// # Errors
    /// [`ExtractionCause::TypeMismatch`] when the value has another type than
    /// the field, [`ExtractionCause::Unassignable`] when it has the right type
    /// but the setter's Rust type cannot hold it.
    pub fn assign(
        &self,
        record: &mut R,
        value: Value,
        line_number: usize,
    ) -> Result<(), FieldExtractionError> {
        if let Some(found) = value.field_type()
            && found != self.field_type
        {
            let actual = value.to_string();
            return Err(self.error(
                line_number,
                Some(actual),
                ExtractionCause::TypeMismatch {
                    found: found.to_string(),
                },
            ));
        }
        (self.setter)(record, value).map_err(|rejected| {
            self.error(
                line_number,
                Some(rejected.to_string()),
                ExtractionCause::Unassignable {
                    found: rejected.type_name(),
                },
            )
        })
    }

    fn error(
        &self,
        line_number: usize,
        actual: Option<String>,
        cause: ExtractionCause,
    ) -> FieldExtractionError {
        FieldExtractionError {
            line_number,
            field: self.name.clone(),
            field_type: self.field_type,
            actual,
            cause,
        }
    }
}
