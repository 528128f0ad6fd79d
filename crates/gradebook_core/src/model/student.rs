//! Student domain model.
//!
//! # Responsibility
//! - Define the student record accepted and returned by the store.
//! - Validate name length on every construction path.
//!
//! # Invariants
//! - `name` is 2..=50 characters.
//! - `tests_taken` is accepted from callers but never maintained by the store.

use crate::model::test::TestId;
use crate::model::validation::{check_name_length, ModelValidationError};
use serde::{Deserialize, Serialize};

/// Caller-provided unique key of a student.
pub type StudentId = i64;

pub const STUDENT_NAME_MIN_CHARS: usize = 2;
pub const STUDENT_NAME_MAX_CHARS: usize = 50;

/// Canonical student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StudentWire")]
pub struct Student {
    /// Unique identifier for the student.
    pub id: StudentId,
    /// Full name, 2 to 50 characters.
    pub name: String,
    /// Contact address. Not format-checked.
    pub email: String,
    /// Informational list of test ids. No operation updates it.
    pub tests_taken: Vec<TestId>,
}

#[derive(Deserialize)]
struct StudentWire {
    id: StudentId,
    name: String,
    email: String,
    #[serde(default)]
    tests_taken: Vec<TestId>,
}

impl TryFrom<StudentWire> for Student {
    type Error = ModelValidationError;

    fn try_from(value: StudentWire) -> Result<Self, Self::Error> {
        let student = Self {
            id: value.id,
            name: value.name,
            email: value.email,
            tests_taken: value.tests_taken,
        };
        student.validate()?;
        Ok(student)
    }
}

impl Student {
    /// Creates a validated student with an empty `tests_taken` list.
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ModelValidationError> {
        let student = Self {
            id,
            name: name.into(),
            email: email.into(),
            tests_taken: Vec::new(),
        };
        student.validate()?;
        Ok(student)
    }

    /// Validates field constraints.
    ///
    /// Public fields can be mutated after construction, so write paths call
    /// this again before storing.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        check_name_length(
            "student",
            &self.name,
            STUDENT_NAME_MIN_CHARS,
            STUDENT_NAME_MAX_CHARS,
        )
    }
}
