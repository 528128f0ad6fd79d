//! Records repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the student, test and result collections.
//! - Provide raw data access; empty-is-error policies live in the service.
//!
//! # Invariants
//! - Write paths call `validate()` before mutating any collection.
//! - Student and test ids are unique keys; listings follow insertion order.
//! - At most one result exists per `(student_id, test_id)`.
//! - `delete_student` removes the student and its results in one call.

use crate::model::result::TestResult;
use crate::model::student::{Student, StudentId};
use crate::model::test::{Test, TestId};
use crate::model::validation::ModelValidationError;
use crate::seed::SeedData;
use log::warn;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Key of the record a repository error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    Student(StudentId),
    Test(TestId),
    Result {
        student_id: StudentId,
        test_id: TestId,
    },
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student(id) => write!(f, "student {id}"),
            Self::Test(id) => write!(f, "test {id}"),
            Self::Result {
                student_id,
                test_id,
            } => write!(f, "result (student {student_id}, test {test_id})"),
        }
    }
}

/// Repository error for record writes and lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ModelValidationError),
    Conflict(RecordKey),
    NotFound(RecordKey),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(key) => write!(f, "{key} already exists"),
            Self::NotFound(key) => write!(f, "{key} not found"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Conflict(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for academic records.
pub trait RecordsRepository {
    fn create_student(&mut self, student: &Student) -> RepoResult<StudentId>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Removes the student and every result referencing it.
    ///
    /// Returns the number of cascaded results.
    fn delete_student(&mut self, id: StudentId) -> RepoResult<usize>;

    fn create_test(&mut self, test: &Test) -> RepoResult<TestId>;
    fn get_test(&self, id: TestId) -> RepoResult<Option<Test>>;
    fn list_tests(&self) -> RepoResult<Vec<Test>>;

    fn create_result(&mut self, result: &TestResult) -> RepoResult<()>;
    fn results_for_student(&self, student_id: StudentId) -> RepoResult<Vec<TestResult>>;
    fn results_for_test(&self, test_id: TestId) -> RepoResult<Vec<TestResult>>;
}

/// Keyed collection that remembers insertion order.
#[derive(Debug, Clone)]
struct OrderedTable<K, V> {
    order: Vec<K>,
    rows: HashMap<K, V>,
}

impl<K, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + std::hash::Hash, V: Clone> OrderedTable<K, V> {
    fn contains(&self, key: K) -> bool {
        self.rows.contains_key(&key)
    }

    /// Returns `false` without touching the table when `key` is taken.
    fn insert(&mut self, key: K, value: V) -> bool {
        if self.rows.contains_key(&key) {
            return false;
        }
        self.order.push(key);
        self.rows.insert(key, value);
        true
    }

    fn get(&self, key: K) -> Option<V> {
        self.rows.get(&key).cloned()
    }

    fn remove(&mut self, key: K) -> bool {
        if self.rows.remove(&key).is_none() {
            return false;
        }
        self.order.retain(|existing| *existing != key);
        true
    }

    fn values(&self) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|key| self.rows.get(key).cloned())
            .collect()
    }
}

/// Process-local records repository.
///
/// Not internally synchronized; callers sharing it across threads wrap it
/// in a lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordsRepository {
    students: OrderedTable<StudentId, Student>,
    tests: OrderedTable<TestId, Test>,
    results: Vec<TestResult>,
}

impl InMemoryRecordsRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `seed`.
    ///
    /// Seed entries go through the regular write paths; duplicates and
    /// invalid records are skipped with a warning.
    pub fn with_seed(seed: SeedData) -> Self {
        let mut repo = Self::new();
        for student in &seed.students {
            if let Err(err) = repo.create_student(student) {
                warn!("event=seed_skip module=repo kind=student error={err}");
            }
        }
        for test in &seed.tests {
            if let Err(err) = repo.create_test(test) {
                warn!("event=seed_skip module=repo kind=test error={err}");
            }
        }
        for result in &seed.results {
            if let Err(err) = repo.create_result(result) {
                warn!("event=seed_skip module=repo kind=result error={err}");
            }
        }
        repo
    }

    fn matching_results(&self, predicate: impl Fn(&TestResult) -> bool) -> Vec<TestResult> {
        self.results
            .iter()
            .filter(|result| predicate(result))
            .copied()
            .collect()
    }
}

impl RecordsRepository for InMemoryRecordsRepository {
    fn create_student(&mut self, student: &Student) -> RepoResult<StudentId> {
        student.validate()?;

        if !self.students.insert(student.id, student.clone()) {
            return Err(RepoError::Conflict(RecordKey::Student(student.id)));
        }
        Ok(student.id)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        Ok(self.students.get(id))
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        Ok(self.students.values())
    }

    fn delete_student(&mut self, id: StudentId) -> RepoResult<usize> {
        if !self.students.contains(id) {
            return Err(RepoError::NotFound(RecordKey::Student(id)));
        }

        let before = self.results.len();
        self.results.retain(|result| result.student_id != id);
        self.students.remove(id);
        Ok(before - self.results.len())
    }

    fn create_test(&mut self, test: &Test) -> RepoResult<TestId> {
        test.validate()?;

        if !self.tests.insert(test.id, test.clone()) {
            return Err(RepoError::Conflict(RecordKey::Test(test.id)));
        }
        Ok(test.id)
    }

    fn get_test(&self, id: TestId) -> RepoResult<Option<Test>> {
        Ok(self.tests.get(id))
    }

    fn list_tests(&self) -> RepoResult<Vec<Test>> {
        Ok(self.tests.values())
    }

    fn create_result(&mut self, result: &TestResult) -> RepoResult<()> {
        let key = result.key();
        if self.results.iter().any(|existing| existing.key() == key) {
            return Err(RepoError::Conflict(RecordKey::Result {
                student_id: result.student_id,
                test_id: result.test_id,
            }));
        }
        self.results.push(*result);
        Ok(())
    }

    fn results_for_student(&self, student_id: StudentId) -> RepoResult<Vec<TestResult>> {
        Ok(self.matching_results(|result| result.student_id == student_id))
    }

    fn results_for_test(&self, test_id: TestId) -> RepoResult<Vec<TestResult>> {
        Ok(self.matching_results(|result| result.test_id == test_id))
    }
}
