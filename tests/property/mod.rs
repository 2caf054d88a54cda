//! Property-based tests for name handling and lookup guarantees

mod name_pattern;
