//! Academic records use-case service.
//!
//! # Responsibility
//! - Expose the store operations used by the HTTP layer.
//! - Apply caller-facing error policy on top of raw repository access:
//!   empty listings and empty result scans are `NotFound`.
//! - Compute per-test aggregates (average, highest score).
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Aggregates never divide by zero; no matching result is `NotFound`.
//! - Student deletion cascades to results within one repository call.

use crate::model::result::TestResult;
use crate::model::student::{Student, StudentId};
use crate::model::test::{Test, TestId};
use crate::model::validation::ModelValidationError;
use crate::repo::records_repo::{RecordKey, RecordsRepository, RepoError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse error class surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Creation of a record whose key already exists.
    Conflict,
    /// Lookup or query with nothing to return.
    NotFound,
    /// Record failed field validation.
    Invalid,
}

/// Service error for academic records use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Invalid(ModelValidationError),
    StudentExists(StudentId),
    TestExists(TestId),
    ResultExists {
        student_id: StudentId,
        test_id: TestId,
    },
    StudentNotFound(StudentId),
    TestNotFound(TestId),
    ResultNotFound {
        student_id: StudentId,
        test_id: TestId,
    },
    /// Student listing requested on an empty store.
    NoStudents,
    /// Test listing requested on an empty store.
    NoTests,
    NoResultsForStudent(StudentId),
    NoResultsForTest(TestId),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(_) => ErrorKind::Invalid,
            Self::StudentExists(_) | Self::TestExists(_) | Self::ResultExists { .. } => {
                ErrorKind::Conflict
            }
            Self::StudentNotFound(_)
            | Self::TestNotFound(_)
            | Self::ResultNotFound { .. }
            | Self::NoStudents
            | Self::NoTests
            | Self::NoResultsForStudent(_)
            | Self::NoResultsForTest(_) => ErrorKind::NotFound,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::StudentExists(_) => write!(f, "Student already exists"),
            Self::TestExists(_) => write!(f, "Test already exists"),
            Self::ResultExists { .. } => write!(f, "Result already exists"),
            Self::StudentNotFound(_) | Self::NoStudents => write!(f, "Student does not exist"),
            Self::TestNotFound(_) | Self::NoTests => write!(f, "Test does not exist"),
            Self::ResultNotFound { .. } => write!(f, "Result does not exist"),
            Self::NoResultsForStudent(id) => write!(f, "Student with ID {id} not found"),
            Self::NoResultsForTest(id) => write!(f, "Test with ID {id} not found"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Invalid(err),
            RepoError::Conflict(RecordKey::Student(id)) => Self::StudentExists(id),
            RepoError::Conflict(RecordKey::Test(id)) => Self::TestExists(id),
            RepoError::Conflict(RecordKey::Result {
                student_id,
                test_id,
            }) => Self::ResultExists {
                student_id,
                test_id,
            },
            RepoError::NotFound(RecordKey::Student(id)) => Self::StudentNotFound(id),
            RepoError::NotFound(RecordKey::Test(id)) => Self::TestNotFound(id),
            RepoError::NotFound(RecordKey::Result {
                student_id,
                test_id,
            }) => Self::ResultNotFound {
                student_id,
                test_id,
            },
        }
    }
}

/// Academic records store facade over a repository implementation.
pub struct RecordsService<R: RecordsRepository> {
    repo: R,
}

impl<R: RecordsRepository> RecordsService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a student. Fails with `StudentExists` when the id is taken.
    pub fn create_student(&mut self, student: &Student) -> ServiceResult<StudentId> {
        let id = self.repo.create_student(student)?;
        info!("event=student_create module=service status=ok student_id={id}");
        Ok(id)
    }

    pub fn get_student(&self, id: StudentId) -> ServiceResult<Student> {
        self.repo
            .get_student(id)?
            .ok_or(ServiceError::StudentNotFound(id))
    }

    /// Lists all students in insertion order.
    ///
    /// An empty store is reported as `NoStudents`, not as an empty list.
    pub fn list_students(&self) -> ServiceResult<Vec<Student>> {
        let students = self.repo.list_students()?;
        if students.is_empty() {
            return Err(ServiceError::NoStudents);
        }
        Ok(students)
    }

    /// Deletes a student and every result recorded for it.
    pub fn delete_student(&mut self, id: StudentId) -> ServiceResult<()> {
        let cascaded = self.repo.delete_student(id)?;
        info!(
            "event=student_delete module=service status=ok student_id={id} cascaded_results={cascaded}"
        );
        Ok(())
    }

    /// Adds a test. Fails with `TestExists` when the id is taken.
    pub fn create_test(&mut self, test: &Test) -> ServiceResult<TestId> {
        let id = self.repo.create_test(test)?;
        info!("event=test_create module=service status=ok test_id={id}");
        Ok(id)
    }

    pub fn get_test(&self, id: TestId) -> ServiceResult<Test> {
        self.repo.get_test(id)?.ok_or(ServiceError::TestNotFound(id))
    }

    /// Lists all tests in insertion order; empty store is `NoTests`.
    pub fn list_tests(&self) -> ServiceResult<Vec<Test>> {
        let tests = self.repo.list_tests()?;
        if tests.is_empty() {
            return Err(ServiceError::NoTests);
        }
        Ok(tests)
    }

    /// Records a result.
    ///
    /// A second result for the same `(student_id, test_id)` is rejected.
    /// The referenced student and test are not required to exist.
    pub fn create_result(&mut self, result: &TestResult) -> ServiceResult<()> {
        self.repo.create_result(result)?;
        info!(
            "event=result_create module=service status=ok student_id={} test_id={}",
            result.student_id, result.test_id
        );
        Ok(())
    }

    /// Lists results for one student in insertion order.
    ///
    /// Only the result sequence is consulted; the student itself may be absent.
    pub fn list_results_by_student(
        &self,
        student_id: StudentId,
    ) -> ServiceResult<Vec<TestResult>> {
        let results = self.repo.results_for_student(student_id)?;
        if results.is_empty() {
            debug!(
                "event=results_by_student module=service status=empty student_id={student_id}"
            );
            return Err(ServiceError::NoResultsForStudent(student_id));
        }
        Ok(results)
    }

    /// Lists results for one test in insertion order.
    pub fn list_results_by_test(&self, test_id: TestId) -> ServiceResult<Vec<TestResult>> {
        let results = self.repo.results_for_test(test_id)?;
        if results.is_empty() {
            debug!("event=results_by_test module=service status=empty test_id={test_id}");
            return Err(ServiceError::NoResultsForTest(test_id));
        }
        Ok(results)
    }

    /// Mean score over every result for `test_id`.
    ///
    /// Sums in `i128`; `i64` scores cannot overflow the accumulator.
    pub fn average_score(&self, test_id: TestId) -> ServiceResult<f64> {
        let results = self.repo.results_for_test(test_id)?;
        let (sum, count) = results
            .iter()
            .fold((0_i128, 0_usize), |(sum, count), result| {
                (sum + i128::from(result.score), count + 1)
            });
        if count == 0 {
            return Err(ServiceError::NoResultsForTest(test_id));
        }
        Ok(sum as f64 / count as f64)
    }

    /// Highest score over every result for `test_id`.
    pub fn highest_score(&self, test_id: TestId) -> ServiceResult<i64> {
        self.repo
            .results_for_test(test_id)?
            .iter()
            .map(|result| result.score)
            .max()
            .ok_or(ServiceError::NoResultsForTest(test_id))
    }
}
