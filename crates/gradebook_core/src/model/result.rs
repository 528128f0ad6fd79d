//! Test result model.
//!
//! A result associates one student with one test. It carries no identity;
//! the store treats `(student_id, test_id)` as its key.

use crate::model::student::StudentId;
use crate::model::test::TestId;
use serde::{Deserialize, Serialize};

/// Scored association between a student and a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Student who took the test.
    pub student_id: StudentId,
    /// Test that was taken.
    pub test_id: TestId,
    /// Score obtained.
    pub score: i64,
}

impl TestResult {
    pub fn new(student_id: StudentId, test_id: TestId, score: i64) -> Self {
        Self {
            student_id,
            test_id,
            score,
        }
    }

    /// Returns the logical key used for duplicate detection.
    pub fn key(&self) -> (StudentId, TestId) {
        (self.student_id, self.test_id)
    }
}
