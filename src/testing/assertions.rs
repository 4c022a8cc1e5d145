//! Assertion functions for testing record mappers.

use crate::error::MapError;
use crate::mapper::RecordMapper;
use std::fmt::Debug;

/// Assert that two record lists are equal in order and content.
///
/// # Panics
///
/// Panics if the lists differ in length or content.
///
/// # Example
///
/// ```
/// use ironfile::testing::assert_records_equal;
///
/// let actual = vec!["A01", "B02"];
/// let expected = vec!["A01", "B02"];
/// assert_records_equal(&actual, &expected);
/// ```
pub fn assert_records_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Record count mismatch:\n  Expected count: {}\n  Actual count: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Record mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that `mapper` skips every one of `lines`.
///
/// # Panics
///
/// Panics on the first line the mapper would try to map.
pub fn assert_all_skipped<R: 'static>(mapper: &RecordMapper<R>, lines: &[&str]) {
    for (i, line) in lines.iter().enumerate() {
        assert!(
            mapper.should_skip(line),
            "Line at index {i} was not skipped:\n  Line: {line:?}\n  Skip rules: {:?}",
            mapper.filter()
        );
    }
}

/// Assert that `mapper` skips none of `lines`.
///
/// # Panics
///
/// Panics on the first line the mapper would skip.
pub fn assert_none_skipped<R: 'static>(mapper: &RecordMapper<R>, lines: &[&str]) {
    for (i, line) in lines.iter().enumerate() {
        if let Some(rule) = mapper.filter().matching_rule(line) {
            panic!(
                "Line at index {i} was skipped by rule {:?}:\n  Line: {line:?}",
                rule.name()
            );
        }
    }
}

/// Assert that mapping `line` fails on the field named `field`, and return
/// the error for further checks.
///
/// # Panics
///
/// Panics if the line maps, is skipped, or fails for another reason.
pub fn assert_field_error<R: 'static>(mapper: &RecordMapper<R>, line: &str, field: &str) -> MapError {
    match mapper.map_line(line, 1) {
        Err(MapError::Field(e)) if e.field == field => MapError::Field(e),
        Err(other) => panic!("Expected an error on field {field:?}, got: {other}\n  Line: {line:?}"),
        Ok(outcome) => panic!(
            "Expected an error on field {field:?}, but the line {}\n  Line: {line:?}",
            if outcome.is_skipped() { "was skipped" } else { "mapped" }
        ),
    }
}
