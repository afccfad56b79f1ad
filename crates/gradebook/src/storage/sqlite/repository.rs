//! SQLite repository implementation.
//!
//! Implements the repository trait from `gradebook_core::storage` using
//! SQLite. Every mutation is a single statement, so SQLite's implicit
//! per-statement transaction provides commit-or-rollback.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;

use gradebook_core::storage::{RepositoryError, Result, StudentRepository};
use gradebook_core::student::{NewStudent, Student, StudentQuery};

use super::conversions::{format_datetime, row_to_student};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for student records.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl StudentRepository for SqliteRepository {
    async fn list_students(&self, query: &StudentQuery) -> Result<Vec<Student>> {
        let fragment = query.filter().map(str::to_string);

        self.conn
            .call(move |conn| {
                let mut rows = Vec::new();
                match fragment {
                    Some(fragment) => {
                        let mut stmt = conn
                            .prepare(schema::SELECT_STUDENTS_BY_NAME_FRAGMENT)
                            .map_err(wrap_err)?;
                        let mapped = stmt
                            .query_map([&fragment], row_to_student)
                            .map_err(wrap_err)?;
                        for row_result in mapped {
                            rows.push(row_result.map_err(wrap_err)?);
                        }
                    }
                    None => {
                        let mut stmt =
                            conn.prepare(schema::SELECT_ALL_STUDENTS).map_err(wrap_err)?;
                        let mapped = stmt.query_map([], row_to_student).map_err(wrap_err)?;
                        for row_result in mapped {
                            rows.push(row_result.map_err(wrap_err)?);
                        }
                    }
                }
                Ok(rows)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_STUDENT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_student) {
                    Ok(student) => Ok(Some(student)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Student", id.to_string()))
    }

    async fn create_student(&self, new: &NewStudent) -> Result<Student> {
        let name = new.name().to_string();
        let grade = new.grade();
        let now = Utc::now();
        let timestamp = format_datetime(&now);

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_STUDENT,
                    rusqlite::params![name, grade, timestamp, timestamp],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Student", "new"))?;

        Ok(Student::new(id, new.name(), grade, now))
    }

    async fn update_student(&self, student: &Student) -> Result<()> {
        let id = student.id;
        let name = student.name.clone();
        let grade = student.grade;
        let updated_at = format_datetime(&student.updated_at);

        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::UPDATE_STUDENT,
                    rusqlite::params![name, grade, updated_at, id],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Student", id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Student",
                id: id.to_string(),
            });
        }

        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(schema::DELETE_STUDENT, rusqlite::params![id])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Student", id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Student",
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
