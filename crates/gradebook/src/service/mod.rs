//! The grade service: read-through caching and invalidate-on-write over the
//! student repository.

mod students;

pub use students::{ListStudentsResult, StudentService};
