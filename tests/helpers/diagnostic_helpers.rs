//! Diagnostic assertion helpers for parser tests.

use navcal::parser::{ErrorCode, RecoveredAs, Severity, SyntaxError};

/// Render diagnostics one per line for assertion messages.
pub fn render(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(|e| {
            format!(
                "  {}:{} {} {} ({})",
                e.position.line + 1,
                e.position.column + 1,
                e.code,
                e.message,
                e.recovered_as.as_str()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert a parse produced no diagnostics at all.
pub fn assert_clean(errors: &[SyntaxError]) {
    assert!(
        errors.is_empty(),
        "Expected no diagnostics, got {}:\n{}",
        errors.len(),
        render(errors)
    );
}

/// Codes of all diagnostics, in order.
pub fn codes(errors: &[SyntaxError]) -> Vec<ErrorCode> {
    errors.iter().map(|e| e.code).collect()
}

/// Only error-severity diagnostics.
pub fn hard_errors(errors: &[SyntaxError]) -> Vec<&SyntaxError> {
    errors
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}

/// Assert some diagnostic has `code` and was recovered as `recovered_as`.
pub fn assert_has(errors: &[SyntaxError], code: ErrorCode, recovered_as: RecoveredAs) {
    assert!(
        errors
            .iter()
            .any(|e| e.code == code && e.recovered_as == recovered_as),
        "Expected {code} recovered as {}, got:\n{}",
        recovered_as.as_str(),
        render(errors)
    );
}
