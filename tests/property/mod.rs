//! Property-based tests for resolution and history ordering

mod resolve_properties;
