//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Students table
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    grade REAL NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Index for name ordering and filtering
CREATE INDEX IF NOT EXISTS idx_students_name ON students(name);
"#;

pub const INSERT_STUDENT: &str = r#"
INSERT INTO students (name, grade, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_STUDENT_BY_ID: &str = r#"
SELECT id, name, grade, created_at, updated_at
FROM students
WHERE id = ?1
"#;

pub const SELECT_ALL_STUDENTS: &str = r#"
SELECT id, name, grade, created_at, updated_at
FROM students
ORDER BY name ASC, id ASC
"#;

/// The filter fragment matches as a case-insensitive substring of the name.
pub const SELECT_STUDENTS_BY_NAME_FRAGMENT: &str = r#"
SELECT id, name, grade, created_at, updated_at
FROM students
WHERE LOWER(name) LIKE '%' || LOWER(?1) || '%'
ORDER BY name ASC, id ASC
"#;

pub const UPDATE_STUDENT: &str = r#"
UPDATE students
SET name = ?1, grade = ?2, updated_at = ?3
WHERE id = ?4
"#;

pub const DELETE_STUDENT: &str = r#"
DELETE FROM students
WHERE id = ?1
"#;
