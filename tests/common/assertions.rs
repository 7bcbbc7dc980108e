//! Logged assertion helpers.
//!
//! These wrap standard assertions with tracing logs so the compared values
//! show up in CI output next to the library's own logs.

#![allow(dead_code)]

use std::fmt::Debug;

/// Assert equality with detailed logging.
///
/// ```rust,ignore
/// assert_eq_logged("packed color", picker.color().value(), 0xF800);
/// ```
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

/// Assert that a value is true with logging.
#[track_caller]
pub fn assert_true_logged(context: &str, value: bool) {
    tracing::debug!(context = context, value = value, "asserting true");
    assert!(value, "{context}: expected true, got false");
}

/// Assert that a result is `Err`, returning the error.
#[track_caller]
pub fn assert_err_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> E {
    match result {
        Err(err) => {
            tracing::debug!(context = context, error = ?err, "got expected error");
            err
        }
        Ok(value) => {
            tracing::error!(context = context, value = ?value, "assertion failed: expected Err");
            panic!("{context}: expected Err, got Ok({value:?})");
        }
    }
}

/// Assert two floats are within `epsilon` of each other.
#[track_caller]
pub fn assert_approx_eq_logged(context: &str, actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    tracing::debug!(
        context = context,
        actual = actual,
        expected = expected,
        diff = diff,
        "asserting approximate equality"
    );
    assert!(
        diff <= epsilon,
        "{context}: expected {expected} +/- {epsilon}, got {actual}"
    );
}
