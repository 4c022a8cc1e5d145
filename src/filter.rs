//! Per-line skip decisions.
//!
//! A [`LineFilter`] holds an ordered list of [`SkipRule`]s and stops at the
//! first one that fires. Built from [`RecordOptions`] the order is:
//!
//! 1. blank lines (`ignore_empty_lines`, `ignore_empty_spaces`)
//! 2. comment lines (`comment_marker`, `comment_any_place`)
//! 3. the conditional selector
//!
//! so the structural checks run before any selector or regex is evaluated.

use crate::condition::Condition;
use crate::error::SchemaError;
use crate::options::RecordOptions;
use std::fmt;
use tracing::trace;

/// One reason to skip a line before extraction.
pub trait SkipRule: Send + Sync {
    /// Short name used when tracing skipped lines.
    fn name(&self) -> &str;

    /// `true` if `line` must not be mapped.
    fn skips(&self, line: &str) -> bool;
}

/// Skips empty lines, and whitespace-only lines when `whitespace` is set.
#[derive(Clone, Debug)]
pub struct BlankLineRule {
    pub whitespace: bool,
}

impl SkipRule for BlankLineRule {
    fn name(&self) -> &str {
        "blank"
    }

    fn skips(&self, line: &str) -> bool {
        line.is_empty() || (self.whitespace && line.trim().is_empty())
    }
}

/// Skips lines starting with a comment marker.
///
/// With `any_place` the marker may follow leading whitespace; the strict
/// column-0 check applies either way.
#[derive(Clone, Debug)]
pub struct CommentRule {
    pub marker: String,
    pub any_place: bool,
}

impl SkipRule for CommentRule {
    fn name(&self) -> &str {
        "comment"
    }

    fn skips(&self, line: &str) -> bool {
        (self.any_place && line.trim().starts_with(self.marker.as_str()))
            || line.starts_with(self.marker.as_str())
    }
}

impl SkipRule for Condition {
    fn name(&self) -> &str {
        Condition::name(self)
    }

    fn skips(&self, line: &str) -> bool {
        Condition::skips(self, line)
    }
}

/// Ordered, short-circuiting set of skip rules.
#[derive(Default)]
pub struct LineFilter {
    rules: Vec<Box<dyn SkipRule>>,
}

impl fmt::Debug for LineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}

impl LineFilter {
    /// A filter that never skips.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the blank, comment and condition rules configured in `options`.
    ///
    /// # Errors
    /// Fails if the conditional selector is empty or its pattern is invalid.
    pub fn from_options(options: &RecordOptions) -> Result<Self, SchemaError> {
        let mut filter = Self::new();
        if options.ignore_empty_lines {
            filter = filter.with_rule(BlankLineRule {
                whitespace: options.ignore_empty_spaces,
            });
        }
        if let Some(marker) = &options.comment_marker
            && !marker.is_empty()
        {
            filter = filter.with_rule(CommentRule {
                marker: marker.clone(),
                any_place: options.comment_any_place,
            });
        }
        if let Some(condition) = Condition::compile(&options.condition)? {
            filter = filter.with_rule(condition);
        }
        Ok(filter)
    }

    /// Append a rule evaluated after every rule already present.
    #[must_use]
    pub fn with_rule(mut self, rule: impl SkipRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub(crate) fn push(&mut self, rule: Box<dyn SkipRule>) {
        self.rules.push(rule);
    }

    /// The first rule that skips `line`, if any.
    #[must_use]
    pub fn matching_rule(&self, line: &str) -> Option<&dyn SkipRule> {
        self.rules
            .iter()
            .find(|rule| rule.skips(line))
            .map(|rule| &**rule)
    }

    #[must_use]
    pub fn should_skip(&self, line: &str) -> bool {
        match self.matching_rule(line) {
            Some(rule) => {
                trace!(rule = rule.name(), line, "line skipped");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
