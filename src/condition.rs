//! Compiled conditional selectors.

use crate::error::SchemaError;
use crate::options::ConditionSpec;
use regex::Regex;

#[derive(Clone, Debug)]
enum Predicate {
    Begins(String),
    Contains(String),
    Enclosed(String),
    Ends(String),
    Matches(Regex),
}

impl Predicate {
    fn holds(&self, line: &str) -> bool {
        match self {
            Predicate::Begins(sel) => line.starts_with(sel.as_str()),
            Predicate::Contains(sel) => line.contains(sel.as_str()),
            Predicate::Enclosed(sel) => line.starts_with(sel.as_str()) && line.ends_with(sel.as_str()),
            Predicate::Ends(sel) => line.ends_with(sel.as_str()),
            Predicate::Matches(re) => re.is_match(line),
        }
    }
}

/// A [`ConditionSpec`] ready to evaluate against lines.
///
/// Built once at setup; regex patterns are compiled anchored so they must
/// match the whole line.
#[derive(Clone, Debug)]
pub struct Condition {
    name: &'static str,
    predicate: Predicate,
    exclude: bool,
}

impl Condition {
    /// Compile `spec`. Returns `Ok(None)` for [`ConditionSpec::None`].
    ///
    /// # Errors
    /// [`SchemaError::EmptySelector`] for an empty operand and
    /// [`SchemaError::InvalidPattern`] for a regex that does not compile.
    pub fn compile(spec: &ConditionSpec) -> Result<Option<Self>, SchemaError> {
        let name = spec.name();
        let Some(operand) = spec.operand() else {
            return Ok(None);
        };
        if operand.is_empty() {
            return Err(SchemaError::EmptySelector { condition: name });
        }
        let sel = operand.to_string();
        let (predicate, exclude) = match spec {
            ConditionSpec::None => return Ok(None),
            ConditionSpec::ExcludeIfBegins(_) => (Predicate::Begins(sel), true),
            ConditionSpec::IncludeIfBegins(_) => (Predicate::Begins(sel), false),
            ConditionSpec::ExcludeIfContains(_) => (Predicate::Contains(sel), true),
            ConditionSpec::IncludeIfContains(_) => (Predicate::Contains(sel), false),
            ConditionSpec::ExcludeIfEnclosed(_) => (Predicate::Enclosed(sel), true),
            ConditionSpec::IncludeIfEnclosed(_) => (Predicate::Enclosed(sel), false),
            ConditionSpec::ExcludeIfEnds(_) => (Predicate::Ends(sel), true),
            ConditionSpec::IncludeIfEnds(_) => (Predicate::Ends(sel), false),
            ConditionSpec::ExcludeIfMatchRegex(_) => (Predicate::Matches(full_match(&sel)?), true),
            ConditionSpec::IncludeIfMatchRegex(_) => (Predicate::Matches(full_match(&sel)?), false),
        };
        Ok(Some(Self {
            name,
            predicate,
            exclude,
        }))
    }

    /// `true` if the line must be skipped under this condition.
    #[must_use]
    pub fn skips(&self, line: &str) -> bool {
        self.predicate.holds(line) == self.exclude
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

fn full_match(pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| SchemaError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
