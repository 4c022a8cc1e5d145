//! Ordered field extraction plan for one record type.

use crate::codec::Cursor;
use crate::error::{FieldExtractionError, SchemaError};
use crate::field::{FieldDescriptor, FieldSpec};
use crate::options::LayoutKind;
use crate::value::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Size hint used when the record is not fixed-length.
pub const DEFAULT_SIZE_HINT: usize = 32;

/// The mapped fields of a record type, in declaration order.
///
/// Built once at setup. Exactly one field is marked first and one last, and
/// every field knows whether the one after it is optional.
pub struct FieldPlan<R> {
    fields: Vec<FieldDescriptor<R>>,
    kind: LayoutKind,
    size_hint: usize,
}

impl<R> fmt::Debug for FieldPlan<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPlan")
            .field("fields", &self.fields)
            .field("kind", &self.kind)
            .field("size_hint", &self.size_hint)
            .finish()
    }
}

impl<R> Clone for FieldPlan<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            kind: self.kind,
            size_hint: self.size_hint,
        }
    }
}

impl<R> FieldPlan<R> {
    /// Build the plan from the declared field specs of `record`.
    ///
    /// Unmapped specs are skipped.
    ///
    /// # Errors
    /// [`SchemaError::NoMappedFields`] if nothing is mapped, or the field
    /// factory's error for an invalid field.
    pub fn build(
        record: &'static str,
        specs: Vec<FieldSpec<R>>,
        kind: LayoutKind,
    ) -> Result<Self, SchemaError> {
        let mut fields: Vec<FieldDescriptor<R>> = Vec::with_capacity(specs.len());
        let mut seen = HashSet::new();

        for spec in specs {
            if spec.is_mapped() && !seen.insert(spec.name().to_string()) {
                return Err(SchemaError::DuplicateField {
                    field: spec.name().to_string(),
                });
            }
            let name = spec.name().to_string();
            let Some(field) = FieldDescriptor::from_spec(spec, kind, fields.len())? else {
                debug!(record, field = %name, "field has no layout, not mapped");
                continue;
            };
            if let Some(previous) = fields.last_mut() {
                previous.hints.next_is_optional = field.is_optional();
            }
            fields.push(field);
        }

        let Some(first) = fields.first_mut() else {
            return Err(SchemaError::NoMappedFields { record });
        };
        first.hints.is_first = true;
        if let Some(last) = fields.last_mut() {
            last.hints.is_last = true;
        }

        let size_hint = match kind {
            LayoutKind::Fixed => fields.iter().filter_map(|f| f.layout().width()).sum(),
            LayoutKind::Delimited => DEFAULT_SIZE_HINT,
        };

        debug!(record, fields = fields.len(), size_hint, %kind, "field plan built");
        Ok(Self {
            fields,
            kind,
            size_hint,
        })
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a built plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// Expected line length: the width sum for fixed-length records,
    /// [`DEFAULT_SIZE_HINT`] otherwise. Only used to size buffers.
    #[must_use]
    pub fn size_hint(&self) -> usize {
        self.size_hint
    }

    /// Extract one value per field, left to right.
    ///
    /// # Errors
    /// The first field that fails, with `line_number` attached.
    pub fn extract(&self, line: &str, line_number: usize) -> Result<Vec<Value>, FieldExtractionError> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut cursor = Cursor::start();
        for field in &self.fields {
            let (value, next) = field.extract(line, cursor, line_number)?;
            values.push(value);
            cursor = next;
        }
        Ok(values)
    }
}
