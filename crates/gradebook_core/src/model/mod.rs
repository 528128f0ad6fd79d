//! Domain model for the academic records store.
//!
//! # Responsibility
//! - Define the canonical student/test/result records shared by every layer.
//! - Enforce field-level constraints at construction and deserialization.
//!
//! # Invariants
//! - Students and tests are identified by caller-provided integer ids.
//! - Results have no identity of their own; `(student_id, test_id)` is the
//!   logical key.
//! - A record that fails `validate()` never reaches a repository.

pub mod result;
pub mod student;
pub mod validation;
