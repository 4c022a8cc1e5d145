//! Record-level configuration.
//!
//! [`RecordOptions`] is the per-record-type settings block: which lines to
//! ignore, how comments look, the conditional selector and whether the layout
//! is fixed-length or delimited. It is plain data and can be loaded from JSON:
//!
//! ```
//! use ironfile::options::{ConditionSpec, LayoutKind, RecordOptions};
//!
//! let opts = RecordOptions::from_json(r##"{
//!     "layout_kind": "Fixed",
//!     "ignore_first": 1,
//!     "ignore_empty_lines": true,
//!     "comment_marker": "#",
//!     "condition": { "kind": "ExcludeIfBegins", "selector": "HDR" }
//! }"##).unwrap();
//!
//! assert_eq!(opts.layout_kind, LayoutKind::Fixed);
//! assert_eq!(opts.condition, ConditionSpec::ExcludeIfBegins("HDR".into()));
//! assert!(opts.comment_any_place);
//! ```

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How fields are laid out on a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Each field occupies a fixed number of characters.
    Fixed,
    /// Fields are separated by a delimiter.
    #[default]
    Delimited,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Fixed => f.write_str("fixed-length"),
            LayoutKind::Delimited => f.write_str("delimited"),
        }
    }
}

/// Conditional selection rule, with its operand.
///
/// `Exclude*` variants skip lines the predicate holds for; `Include*` variants
/// skip every line it does not hold for. The regex variants must match the
/// whole line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "selector")]
pub enum ConditionSpec {
    #[default]
    None,
    ExcludeIfBegins(String),
    IncludeIfBegins(String),
    ExcludeIfContains(String),
    IncludeIfContains(String),
    ExcludeIfEnclosed(String),
    IncludeIfEnclosed(String),
    ExcludeIfEnds(String),
    IncludeIfEnds(String),
    ExcludeIfMatchRegex(String),
    IncludeIfMatchRegex(String),
}

impl ConditionSpec {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ConditionSpec::None => "None",
            ConditionSpec::ExcludeIfBegins(_) => "ExcludeIfBegins",
            ConditionSpec::IncludeIfBegins(_) => "IncludeIfBegins",
            ConditionSpec::ExcludeIfContains(_) => "ExcludeIfContains",
            ConditionSpec::IncludeIfContains(_) => "IncludeIfContains",
            ConditionSpec::ExcludeIfEnclosed(_) => "ExcludeIfEnclosed",
            ConditionSpec::IncludeIfEnclosed(_) => "IncludeIfEnclosed",
            ConditionSpec::ExcludeIfEnds(_) => "ExcludeIfEnds",
            ConditionSpec::IncludeIfEnds(_) => "IncludeIfEnds",
            ConditionSpec::ExcludeIfMatchRegex(_) => "ExcludeIfMatchRegex",
            ConditionSpec::IncludeIfMatchRegex(_) => "IncludeIfMatchRegex",
        }
    }

    /// The literal selector or regex pattern, `None` for [`ConditionSpec::None`].
    #[must_use]
    pub fn operand(&self) -> Option<&str> {
        match self {
            ConditionSpec::None => None,
            ConditionSpec::ExcludeIfBegins(s)
            | ConditionSpec::IncludeIfBegins(s)
            | ConditionSpec::ExcludeIfContains(s)
            | ConditionSpec::IncludeIfContains(s)
            | ConditionSpec::ExcludeIfEnclosed(s)
            | ConditionSpec::IncludeIfEnclosed(s)
            | ConditionSpec::ExcludeIfEnds(s)
            | ConditionSpec::IncludeIfEnds(s)
            | ConditionSpec::ExcludeIfMatchRegex(s)
            | ConditionSpec::IncludeIfMatchRegex(s) => Some(s),
        }
    }
}

/// Per-record-type settings. Immutable once a mapper is built from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordOptions {
    pub layout_kind: LayoutKind,
    /// Number of leading lines dropped before mapping starts.
    pub ignore_first: usize,
    /// Number of trailing lines dropped at the end of input.
    pub ignore_last: usize,
    pub ignore_empty_lines: bool,
    /// With `ignore_empty_lines`, also skip lines holding only whitespace.
    pub ignore_empty_spaces: bool,
    pub comment_marker: Option<String>,
    /// Accept the comment marker after leading whitespace, not only at column 0.
    pub comment_any_place: bool,
    pub condition: ConditionSpec,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            layout_kind: LayoutKind::default(),
            ignore_first: 0,
            ignore_last: 0,
            ignore_empty_lines: false,
            ignore_empty_spaces: false,
            comment_marker: None,
            comment_any_place: true,
            condition: ConditionSpec::None,
        }
    }
}

impl RecordOptions {
    #[must_use]
    pub fn new(layout_kind: LayoutKind) -> Self {
        Self {
            layout_kind,
            ..Self::default()
        }
    }

    /// Parse options from a JSON document. Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns [`SchemaError::InvalidOptions`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }
}
