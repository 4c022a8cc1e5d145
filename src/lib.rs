//! # Ironfile
//!
//! A **flat-file record mapper** for Rust. Ironfile turns lines of fixed-width or
//! delimited text into typed records, driven by a declarative layout attached to
//! each record type.
//!
//! ## Key Features
//!
//! - **Declarative layouts** - describe fields once, in line order, with typed setters
//! - **Fixed-length and delimited records** - built-in codecs for both, with quoting
//! - **Optional trailing fields** - short lines are accepted when the missing fields are optional
//! - **Line filtering** - blank lines, comments and conditional selectors (prefix,
//!   suffix, substring, enclosure, regex)
//! - **Head and tail skipping** - drop header and trailer lines by count
//! - **Structured errors** - every failure names the line, the field and its type
//! - **Shareable** - a built mapper is immutable and can be used from many threads
//!
//! ## Quick Start
//!
//! ```
//! use ironfile::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Payment {
//!     code: String,
//!     amount: String,
//! }
//!
//! let mapper = RecordLayout::<Payment>::fixed()
//!     .comment("#", false)
//!     .field(FieldSpec::new("code", |p: &mut Payment, v| p.code = v).fixed(3))
//!     .field(FieldSpec::new("amount", |p: &mut Payment, v| p.amount = v).fixed(6))
//!     .default_constructor()
//!     .build()
//!     .unwrap();
//!
//! let outcome = mapper.map_line("A01001234", 1).unwrap();
//! assert_eq!(
//!     outcome,
//!     LineOutcome::Record(Payment { code: "A01".into(), amount: "001234".into() })
//! );
//! assert!(mapper.map_line("# comment", 2).unwrap().is_skipped());
//! ```
//!
//! ## Core Concepts
//!
//! ### Layouts
//!
//! A [`RecordLayout`] holds the [`RecordOptions`] of a record type, its
//! [`FieldSpec`]s in the order the values appear on the line, and how to
//! construct an empty record ([`RecordFactory`]). Record types can carry their
//! layout by implementing [`FlatRecord`].
//!
//! ### Setup
//!
//! [`RecordMapper::new`] runs once per record type. It builds the [`FieldPlan`]
//! (one [`FieldDescriptor`] per mapped field, with first/last/next-optional
//! hints), compiles the [`LineFilter`] and resolves the constructor. Any problem
//! is a [`SchemaError`], and no line is ever mapped with a broken setup.
//!
//! ### Mapping
//!
//! [`RecordMapper::map_line`] maps one line. The outcome is a record,
//! [`LineOutcome::Skipped`], or a [`MapError`] that names the line and field.
//! [`RecordMapper::records`] maps a whole sequence of lines and applies
//! `ignore_first` / `ignore_last`.
//!
//! ### Codecs
//!
//! Each field is read by a [`FieldCodec`]. The built-in [`FixedWidthCodec`] and
//! [`DelimitedCodec`] are chosen from the field's [`FieldLayout`]; a custom
//! codec can replace them per field.
//!
//! ## Feature Flags
//!
//! - `io` - Read records from files and buffered readers (enabled by default)
//!
//! ## Module Overview
//!
//! - [`layout`] - Record layouts and the [`FlatRecord`] trait
//! - [`field`] - Field specs, layouts and descriptors
//! - [`plan`] - Ordered field extraction plan
//! - [`codec`] - Field codecs and value conversion
//! - [`filter`] / [`condition`] - Line skip rules
//! - [`factory`] - Record construction
//! - [`mapper`] / [`reader`] - Mapping single lines and line sequences
//! - [`options`] - Serde-loadable record options
//! - [`error`] - Error types
//! - [`testing`] - Assertions and fixtures for your own tests

pub mod codec;
pub mod condition;
pub mod error;
pub mod factory;
pub mod field;
pub mod filter;
pub mod layout;
pub mod mapper;
pub mod options;
pub mod plan;
pub mod reader;
pub mod testing;
pub mod value;

#[cfg(feature = "io")]
pub mod io;

// General re-exports
pub use codec::{CodecError, Cursor, DelimitedCodec, FieldCodec, FieldHints, FixedWidthCodec, TrimMode};
pub use condition::Condition;
pub use error::{ConstructionError, ExtractionCause, FieldExtractionError, MapError, SchemaError};
pub use factory::RecordFactory;
pub use field::{FieldDescriptor, FieldLayout, FieldSpec};
pub use filter::{BlankLineRule, CommentRule, LineFilter, SkipRule};
pub use layout::{FlatRecord, RecordLayout};
pub use mapper::{LineOutcome, RecordMapper};
pub use options::{ConditionSpec, LayoutKind, RecordOptions};
pub use plan::FieldPlan;
pub use reader::RecordReader;
pub use value::{FieldType, FromValue, Value};

// Gated re-exports
#[cfg(feature = "io")]
pub use io::{read_records, read_records_file};
