//! Integration tests for Layer 1: Types
//!
//! Tests for the type grammar, constraint sets, matching, and default inference.

mod constraint_sets;
