//! Unit tests for projects.
