use thiserror::Error;

use super::Student;

/// Lowest grade accepted for a student record.
pub const GRADE_MIN: f64 = 0.0;
/// Highest grade accepted for a student record.
pub const GRADE_MAX: f64 = 20.0;

/// Errors for malformed student input. These are raised before any store
/// mutation is attempted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Grade must be between 0 and 20, got {grade}")]
    GradeOutOfRange { grade: f64 },
    #[error("Grade must be a finite number")]
    GradeNotFinite,
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn validate_grade(grade: f64) -> Result<(), ValidationError> {
    if !grade.is_finite() {
        return Err(ValidationError::GradeNotFinite);
    }
    if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
        return Err(ValidationError::GradeOutOfRange { grade });
    }
    Ok(())
}

/// A validated payload for inserting a student.
///
/// Construction is the validation step: an instance always carries a
/// non-empty trimmed name and an in-range grade.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    name: String,
    grade: f64,
}

impl NewStudent {
    /// Validates the raw input and builds the insert payload.
    pub fn new(name: &str, grade: f64) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        validate_grade(grade)?;
        Ok(Self { name, grade })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }
}

/// A validated partial update for an existing student.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    name: Option<String>,
    grade: Option<f64>,
}

impl StudentUpdate {
    /// Validates the supplied fields and builds the update. Fields left as
    /// `None` are kept unchanged by [`StudentUpdate::apply_to`].
    pub fn new(name: Option<&str>, grade: Option<f64>) -> Result<Self, ValidationError> {
        let name = name.map(validate_name).transpose()?;
        if let Some(grade) = grade {
            validate_grade(grade)?;
        }
        Ok(Self { name, grade })
    }

    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.grade.is_none()
    }

    /// Applies the update to a student, leaving omitted fields untouched.
    /// The caller is responsible for bumping `updated_at`.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(ref name) = self.name {
            student.name = name.clone();
        }
        if let Some(grade) = self.grade {
            student.grade = grade;
        }
    }
}
