//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use gradebook_core::storage::{RepositoryError, Result, StudentRepository};
use gradebook_core::student::{
    matches_filter, sort_students_by_name, NewStudent, Student, StudentQuery,
};

/// In-memory storage backend for testing and dependency-free dev runs.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
/// Ids are assigned from a monotonic counter, like SQLite's rowid.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    students: Arc<RwLock<HashMap<i64, Student>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            students: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(0)),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn list_students(&self, query: &StudentQuery) -> Result<Vec<Student>> {
        let students = self.students.read().await;
        let mut matched: Vec<Student> = students
            .values()
            .filter(|s| match query.filter() {
                Some(fragment) => matches_filter(&s.name, fragment),
                None => true,
            })
            .cloned()
            .collect();

        sort_students_by_name(&mut matched);
        Ok(matched)
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        let students = self.students.read().await;
        Ok(students.get(&id).cloned())
    }

    async fn create_student(&self, new: &NewStudent) -> Result<Student> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let student = Student::new(id, new.name(), new.grade(), Utc::now());

        let mut students = self.students.write().await;
        students.insert(id, student.clone());

        Ok(student)
    }

    async fn update_student(&self, student: &Student) -> Result<()> {
        let mut students = self.students.write().await;
        if !students.contains_key(&student.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Student",
                id: student.id.to_string(),
            });
        }
        students.insert(student.id, student.clone());
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        let mut students = self.students.write().await;
        if students.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Student",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
