use crate::assignment::Assignment;
use std::fmt;

#[derive(Debug, Clone)]
pub struct AssignmentValidationError {
    message: String,
}

impl AssignmentValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for AssignmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AssignmentValidationError {}

pub fn validate_assignment(assignment: &Assignment) -> Result<(), AssignmentValidationError> {
    if assignment.teacher_id.trim().is_empty() {
        return Err(AssignmentValidationError::new(format!(
            "class '{}' has a blank teacher reference",
            assignment.class_code
        )));
    }
    if assignment.room_id.trim().is_empty() {
        return Err(AssignmentValidationError::new(format!(
            "class '{}' has a blank room reference",
            assignment.class_code
        )));
    }
    if assignment.start >= assignment.end {
        return Err(AssignmentValidationError::new(format!(
            "class '{}' must start before it ends ({} >= {})",
            assignment.class_code, assignment.start, assignment.end
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Assignment;
    use chrono::NaiveDate;

    #[test]
    fn rejects_inverted_interval() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let assignment = Assignment::new(
            "MATH101",
            "T1",
            "R1",
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(9, 0, 0).unwrap(),
        );
        let err = validate_assignment(&assignment).expect_err("inverted interval");
        assert!(err.to_string().contains("must start before it ends"));
    }

    #[test]
    fn accepts_well_formed_assignment() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let assignment = Assignment::new(
            "MATH101",
            "T1",
            "R1",
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(10, 0, 0).unwrap(),
        );
        assert!(validate_assignment(&assignment).is_ok());
    }
}
