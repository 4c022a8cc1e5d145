//! Declarative record layouts.
//!
//! A [`RecordLayout`] is the layout metadata of a record type: its
//! [`RecordOptions`], its fields in line order and how to construct it. Record
//! types usually attach theirs through [`FlatRecord`]:
//!
//! ```
//! use ironfile::{FieldSpec, FlatRecord, RecordLayout, RecordMapper};
//!
//! #[derive(Debug, Default)]
//! struct Payment {
//!     code: String,
//!     amount: u32,
//! }
//!
//! impl FlatRecord for Payment {
//!     fn layout() -> RecordLayout<Self> {
//!         RecordLayout::fixed()
//!             .ignore_empty_lines()
//!             .field(FieldSpec::new("code", |p: &mut Payment, v| p.code = v).fixed(3))
//!             .field(FieldSpec::new("amount", |p: &mut Payment, v| p.amount = v).fixed(6))
//!             .default_constructor()
//!     }
//! }
//!
//! let mapper = RecordMapper::<Payment>::for_record().unwrap();
//! let payment = mapper.map_line("A01001234", 1).unwrap().into_record().unwrap();
//! assert_eq!(payment.code, "A01");
//! assert_eq!(payment.amount, 1234);
//! ```

use crate::error::SchemaError;
use crate::factory::RecordFactory;
use crate::field::FieldSpec;
use crate::filter::SkipRule;
use crate::mapper::RecordMapper;
use crate::options::{ConditionSpec, LayoutKind, RecordOptions};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A record type that carries its own layout.
pub trait FlatRecord: Sized + 'static {
    fn layout() -> RecordLayout<Self>;
}

/// Builder for the layout metadata of record type `R`.
pub struct RecordLayout<R> {
    pub(crate) options: RecordOptions,
    pub(crate) fields: Vec<FieldSpec<R>>,
    pub(crate) constructor: Option<RecordFactory<R>>,
    pub(crate) context_constructor: Option<RecordFactory<R>>,
    pub(crate) rules: Vec<Box<dyn SkipRule>>,
}

impl<R: 'static> RecordLayout<R> {
    #[must_use]
    pub fn new(kind: LayoutKind) -> Self {
        Self::from_options(RecordOptions::new(kind))
    }

    #[must_use]
    pub fn fixed() -> Self {
        Self::new(LayoutKind::Fixed)
    }

    #[must_use]
    pub fn delimited() -> Self {
        Self::new(LayoutKind::Delimited)
    }

    /// Start from a complete options block, e.g. one loaded from JSON.
    #[must_use]
    pub fn from_options(options: RecordOptions) -> Self {
        Self {
            options,
            fields: Vec::new(),
            constructor: None,
            context_constructor: None,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn ignore_first(mut self, lines: usize) -> Self {
        self.options.ignore_first = lines;
        self
    }

    #[must_use]
    pub fn ignore_last(mut self, lines: usize) -> Self {
        self.options.ignore_last = lines;
        self
    }

    /// Skip zero-length lines.
    #[must_use]
    pub fn ignore_empty_lines(mut self) -> Self {
        self.options.ignore_empty_lines = true;
        self
    }

    /// Skip zero-length and whitespace-only lines.
    #[must_use]
    pub fn ignore_empty_spaces(mut self) -> Self {
        self.options.ignore_empty_lines = true;
        self.options.ignore_empty_spaces = true;
        self
    }

    #[must_use]
    pub fn comment(mut self, marker: impl Into<String>, any_place: bool) -> Self {
        self.options.comment_marker = Some(marker.into());
        self.options.comment_any_place = any_place;
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: ConditionSpec) -> Self {
        self.options.condition = condition;
        self
    }

    /// Append a skip rule evaluated after the configured ones.
    #[must_use]
    pub fn skip_rule(mut self, rule: impl SkipRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append the next field in line order.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec<R>) -> Self {
        self.fields.push(spec);
        self
    }

    #[must_use]
    pub fn constructor(mut self, construct: impl Fn() -> R + Send + Sync + 'static) -> Self {
        self.constructor = Some(RecordFactory::standalone(construct));
        self
    }

    /// Construct records from a freshly built enclosing context. Used only
    /// when no plain constructor is set.
    #[must_use]
    pub fn context_constructor<C, E, M, B>(mut self, make_context: M, build: B) -> Self
    where
        E: Into<BoxError>,
        M: Fn() -> Result<C, E> + Send + Sync + 'static,
        B: Fn(C) -> R + Send + Sync + 'static,
    {
        self.context_constructor = Some(RecordFactory::contextual(make_context, build));
        self
    }

    #[must_use]
    pub fn options(&self) -> &RecordOptions {
        &self.options
    }

    /// Run setup and produce the mapper.
    ///
    /// # Errors
    /// See [`RecordMapper::new`].
    pub fn build(self) -> Result<RecordMapper<R>, SchemaError> {
        RecordMapper::new(self)
    }
}

impl<R: Default + 'static> RecordLayout<R> {
    /// Use `R::default()` as the constructor.
    #[must_use]
    pub fn default_constructor(mut self) -> Self {
        self.constructor = Some(RecordFactory::from_default());
        self
    }
}
