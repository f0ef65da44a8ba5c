//! Edge case tests for yay-par
