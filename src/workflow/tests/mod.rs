//! Unit tests for workflow definitions.
