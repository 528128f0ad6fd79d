//! Bootstrap records injected into a fresh store.
//!
//! # Invariants
//! - Seed data is passed to repository constructors explicitly; there is
//!   no process-global store.

use crate::model::result::TestResult;
use crate::model::student::Student;
use crate::model::test::Test;

/// Initial content for a records repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedData {
    pub students: Vec<Student>,
    pub tests: Vec<Test>,
    pub results: Vec<TestResult>,
}

impl SeedData {
    /// Fixed demo data loaded at service startup.
    ///
    /// Two students, two tests and three results.
    pub fn bootstrap() -> Self {
        Self {
            students: vec![
                seed_student(1, "John Doe", "john@example.com"),
                seed_student(2, "Joe", "joe@example.com"),
            ],
            tests: vec![seed_test(1, "Math", 100), seed_test(2, "Math Quiz", 100)],
            results: vec![
                TestResult::new(1, 1, 90),
                TestResult::new(1, 2, 95),
                TestResult::new(2, 2, 90),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.tests.is_empty() && self.results.is_empty()
    }
}

// Seed literals are known-valid; build them directly so bootstrap stays
// infallible. The repository still validates them on insert.
fn seed_student(id: i64, name: &str, email: &str) -> Student {
    Student {
        id,
        name: name.to_string(),
        email: email.to_string(),
        tests_taken: Vec::new(),
    }
}

fn seed_test(id: i64, name: &str, max_score: i64) -> Test {
    Test {
        id,
        name: name.to_string(),
        max_score,
    }
}

#[cfg(test)]
mod tests {
    use super::SeedData;

    #[test]
    fn bootstrap_records_pass_validation() {
        let seed = SeedData::bootstrap();
        assert!(seed.students.iter().all(|s| s.validate().is_ok()));
        assert!(seed.tests.iter().all(|t| t.validate().is_ok()));
        assert_eq!(seed.results.len(), 3);
    }

    #[test]
    fn default_seed_is_empty() {
        assert!(SeedData::default().is_empty());
        assert!(!SeedData::bootstrap().is_empty());
    }
}
