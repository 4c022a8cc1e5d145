//! Testing utilities for record layouts.
//!
//! This module helps users test their own record types:
//!
//! - **Assertions**: compare mapped records, check which lines a mapper skips,
//!   and check which field a bad line is blamed on
//! - **Fixtures**: ready-made fixed-length and delimited record types with
//!   sample input
//!
//! # Quick Start
//!
//! ```
//! use ironfile::RecordMapper;
//! use ironfile::testing::*;
//!
//! let mapper = RecordMapper::<SampleInvoice>::for_record().unwrap();
//! let records: Vec<SampleInvoice> = mapper
//!     .records(sample_invoice_lines())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_records_equal(&records, &sample_invoices());
//! assert_all_skipped(&mapper, &["", "# trailer"]);
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
