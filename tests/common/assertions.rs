//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons and panel payloads.

use serde_json::Value;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a JSON number field is approximately `expected`.
pub fn assert_json_number(value: &Value, expected: f64) {
    let actual = value
        .as_f64()
        .unwrap_or_else(|| panic!("Expected a number, got {}", value));
    assert_approx_eq(actual, expected, Some(1e-6));
}

/// Assert that a panel payload is available and return it.
pub fn assert_available(panel: &Value) -> &Value {
    assert_eq!(
        panel["status"], "available",
        "Expected an available panel, got {}",
        panel
    );
    panel
}

/// Assert that a panel payload is unavailable with the given failure kind.
pub fn assert_unavailable(panel: &Value, kind: &str) {
    assert_eq!(
        panel["status"], "unavailable",
        "Expected an unavailable panel, got {}",
        panel
    );
    assert_eq!(panel["kind"], kind, "Unexpected failure kind in {}", panel);
    assert!(
        panel["reason"].as_str().is_some_and(|r| !r.is_empty()),
        "Unavailable panel has no reason: {}",
        panel
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(33.333, 33.33, Some(0.01));
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, None);
    }

    #[test]
    fn test_assert_unavailable() {
        assert_unavailable(
            &json!({"status": "unavailable", "kind": "empty_result", "reason": "No data"}),
            "empty_result",
        );
    }
}
