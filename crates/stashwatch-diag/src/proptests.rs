//! Property-based tests for the diagnostic checks.
