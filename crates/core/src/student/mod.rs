mod query;
mod sorting;
mod types;
mod validation;

pub use query::StudentQuery;
pub use sorting::{matches_filter, sort_students_by_name};
pub use types::Student;
pub use validation::{NewStudent, StudentUpdate, ValidationError, GRADE_MAX, GRADE_MIN};
