//! Tests for line skip rules.

use ironfile::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn filter(options: RecordOptions) -> LineFilter {
    LineFilter::from_options(&options).unwrap()
}

fn with_condition(condition: ConditionSpec) -> LineFilter {
    filter(RecordOptions {
        condition,
        ..RecordOptions::default()
    })
}

/// Counts how often it is asked, never skips.
struct CountingRule(Arc<AtomicUsize>);

impl SkipRule for CountingRule {
    fn name(&self) -> &str {
        "counting"
    }

    fn skips(&self, _line: &str) -> bool {
        self.0.fetch_add(1, Ordering::SeqCst);
        false
    }
}

/// Fails the test if it is ever evaluated.
struct UnreachableRule;

impl SkipRule for UnreachableRule {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn skips(&self, line: &str) -> bool {
        panic!("rule evaluated for {line:?} after an earlier rule fired");
    }
}

#[test]
fn default_options_skip_nothing() {
    let f = filter(RecordOptions::default());
    assert!(f.is_empty());
    for line in ["", "   ", "# x", "HDR"] {
        assert!(!f.should_skip(line));
    }
}

#[test]
fn blank_lines_exact_empty_only() {
    let f = filter(RecordOptions {
        ignore_empty_lines: true,
        ignore_empty_spaces: false,
        ..RecordOptions::default()
    });
    assert!(f.should_skip(""));
    assert!(!f.should_skip("   "));
    assert!(!f.should_skip("x"));
}

#[test]
fn blank_lines_with_whitespace() {
    let f = filter(RecordOptions {
        ignore_empty_lines: true,
        ignore_empty_spaces: true,
        ..RecordOptions::default()
    });
    assert!(f.should_skip(""));
    assert!(f.should_skip("   "));
    assert!(f.should_skip("\t \t"));
    assert!(!f.should_skip("  x "));
}

#[test]
fn whitespace_flag_alone_does_nothing() {
    let f = filter(RecordOptions {
        ignore_empty_lines: false,
        ignore_empty_spaces: true,
        ..RecordOptions::default()
    });
    assert!(!f.should_skip(""));
    assert!(!f.should_skip("  "));
}

#[test]
fn comment_strict_start() {
    let f = filter(RecordOptions {
        comment_marker: Some("#".into()),
        comment_any_place: false,
        ..RecordOptions::default()
    });
    assert!(f.should_skip("# note"));
    assert!(!f.should_skip("  # note"));
    assert!(!f.should_skip("data # trailing"));
}

#[test]
fn comment_any_place() {
    let f = filter(RecordOptions {
        comment_marker: Some("#".into()),
        comment_any_place: true,
        ..RecordOptions::default()
    });
    assert!(f.should_skip("# note"));
    assert!(f.should_skip("  # note"));
    assert!(!f.should_skip("data # trailing"));
}

#[test]
fn empty_comment_marker_is_ignored() {
    let f = filter(RecordOptions {
        comment_marker: Some(String::new()),
        ..RecordOptions::default()
    });
    assert!(f.is_empty());
    assert!(!f.should_skip("anything"));
}

#[test]
fn exclude_if_begins() {
    let f = with_condition(ConditionSpec::ExcludeIfBegins("HDR".into()));
    assert!(f.should_skip("HDR,1,2"));
    assert!(!f.should_skip("DATA,1,2"));
}

#[test]
fn include_if_begins() {
    let f = with_condition(ConditionSpec::IncludeIfBegins("D".into()));
    assert!(!f.should_skip("DATA,1,2"));
    assert!(f.should_skip("HDR,1,2"));
}

#[test]
fn contains_conditions() {
    let exclude = with_condition(ConditionSpec::ExcludeIfContains("VOID".into()));
    assert!(exclude.should_skip("12 VOID 34"));
    assert!(!exclude.should_skip("12 PAID 34"));

    let include = with_condition(ConditionSpec::IncludeIfContains("PAID".into()));
    assert!(!include.should_skip("12 PAID 34"));
    assert!(include.should_skip("12 VOID 34"));
}

#[test]
fn enclosed_conditions() {
    let exclude = with_condition(ConditionSpec::ExcludeIfEnclosed("--".into()));
    assert!(exclude.should_skip("-- banner --"));
    assert!(!exclude.should_skip("-- banner"));
    assert!(!exclude.should_skip("banner --"));

    let include = with_condition(ConditionSpec::IncludeIfEnclosed("\"".into()));
    assert!(!include.should_skip("\"quoted\""));
    assert!(include.should_skip("bare"));
}

#[test]
fn ends_conditions() {
    let exclude = with_condition(ConditionSpec::ExcludeIfEnds(";".into()));
    assert!(exclude.should_skip("a,b;"));
    assert!(!exclude.should_skip("a,b"));

    let include = with_condition(ConditionSpec::IncludeIfEnds("END".into()));
    assert!(!include.should_skip("row END"));
    assert!(include.should_skip("row"));
}

#[test]
fn regex_conditions_match_whole_line() {
    let exclude = with_condition(ConditionSpec::ExcludeIfMatchRegex(r"\d+".into()));
    assert!(exclude.should_skip("12345"));
    assert!(!exclude.should_skip("12345x"));
    assert!(!exclude.should_skip("x12345"));

    let include = with_condition(ConditionSpec::IncludeIfMatchRegex("[A-Z]{3},.*".into()));
    assert!(!include.should_skip("ABC,1,2"));
    assert!(include.should_skip("AB,1,2"));
}

#[test]
fn regex_alternation_is_anchored_as_a_whole() {
    let f = with_condition(ConditionSpec::ExcludeIfMatchRegex("a|b".into()));
    assert!(f.should_skip("a"));
    assert!(f.should_skip("b"));
    assert!(!f.should_skip("ab"));
    assert!(!f.should_skip("xa"));
}

#[test]
fn invalid_regex_fails_setup() {
    let err = LineFilter::from_options(&RecordOptions {
        condition: ConditionSpec::IncludeIfMatchRegex("(unclosed".into()),
        ..RecordOptions::default()
    })
    .unwrap_err();
    match err {
        SchemaError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_selector_fails_setup() {
    let err = LineFilter::from_options(&RecordOptions {
        condition: ConditionSpec::ExcludeIfBegins(String::new()),
        ..RecordOptions::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        SchemaError::EmptySelector {
            condition: "ExcludeIfBegins"
        }
    ));
}

#[test]
fn blank_rule_short_circuits_later_rules() {
    let f = filter(RecordOptions {
        ignore_empty_lines: true,
        ..RecordOptions::default()
    })
    .with_rule(UnreachableRule);
    assert!(f.should_skip(""));
}

#[test]
fn comment_rule_short_circuits_condition() {
    let calls = Arc::new(AtomicUsize::new(0));
    let f = filter(RecordOptions {
        ignore_empty_lines: true,
        comment_marker: Some("#".into()),
        ..RecordOptions::default()
    })
    .with_rule(CountingRule(Arc::clone(&calls)));

    assert!(f.should_skip(""));
    assert!(f.should_skip("# c"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(!f.should_skip("data"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn rules_run_in_configured_order() {
    let f = filter(RecordOptions {
        ignore_empty_lines: true,
        ignore_empty_spaces: true,
        comment_marker: Some("#".into()),
        condition: ConditionSpec::ExcludeIfContains("#".into()),
        ..RecordOptions::default()
    });
    assert_eq!(f.len(), 3);
    assert_eq!(f.matching_rule("   ").map(|r| r.name()), Some("blank"));
    assert_eq!(f.matching_rule("# x").map(|r| r.name()), Some("comment"));
    assert_eq!(
        f.matching_rule("a # x").map(|r| r.name()),
        Some("ExcludeIfContains")
    );
    assert!(f.matching_rule("plain").is_none());
}

#[test]
fn should_skip_is_deterministic() {
    let f = filter(RecordOptions {
        ignore_empty_lines: true,
        comment_marker: Some("//".into()),
        condition: ConditionSpec::IncludeIfMatchRegex(r"[0-9]+(,[0-9]+)*".into()),
        ..RecordOptions::default()
    });
    for line in ["", "// x", "1,2,3", "1,a", "  "] {
        let first = f.should_skip(line);
        for _ in 0..5 {
            assert_eq!(f.should_skip(line), first, "line {line:?}");
        }
    }
    assert!(!f.should_skip("1,2,3"));
    assert!(f.should_skip("1,a"));
}
