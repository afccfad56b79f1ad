use async_trait::async_trait;

use crate::student::{NewStudent, Student, StudentQuery};

use super::Result;

/// Repository for student records. The record store is the source of truth;
/// the cache layer sits in front of it and never writes through here.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Lists students matching the query, sorted by name ascending.
    ///
    /// A filter matches when the fragment is a case-insensitive substring of
    /// the stored name. The repository owns the sort so cached and uncached
    /// reads are identical.
    async fn list_students(&self, query: &StudentQuery) -> Result<Vec<Student>>;

    /// Gets a student by id.
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;

    /// Inserts a new student and returns the stored record with its
    /// assigned id and timestamps.
    async fn create_student(&self, new: &NewStudent) -> Result<Student>;

    /// Replaces an existing student's fields as a single atomic update.
    async fn update_student(&self, student: &Student) -> Result<()>;

    /// Deletes a student by id.
    async fn delete_student(&self, id: i64) -> Result<()>;
}
