use super::selection::CourseSelections;
use super::student::{Field, FieldError, StudentInfo, SubmitErrors};
use serde::Serialize;

/// A submitted reservation. Created only from a form that passes every
/// field rule and holds at least one course; never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationSnapshot {
    student: StudentInfo,
    courses: CourseSelections,
}

impl ReservationSnapshot {
    /// Validates the whole form and freezes it.
    ///
    /// All field errors are collected together with `CoursesRequired`, so the
    /// caller can show every problem at once.
    pub fn freeze(
        student: &StudentInfo,
        courses: &CourseSelections,
    ) -> Result<Self, SubmitErrors> {
        let mut errors = student.validate_all();
        if courses.is_empty() {
            errors.insert(Field::Courses, FieldError::CoursesRequired);
        }

        if !errors.is_empty() {
            return Err(SubmitErrors(errors));
        }

        Ok(Self {
            student: student.clone(),
            courses: courses.clone(),
        })
    }

    pub fn student(&self) -> &StudentInfo {
        &self.student
    }

    pub fn courses(&self) -> &CourseSelections {
        &self.courses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Course, Schedule};
    use crate::domain::selection::CourseSelection;
    use crate::domain::student::Gender;

    fn valid_student() -> StudentInfo {
        StudentInfo {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            address: "12 Analytical St".into(),
            mobile: "9876543210".into(),
            gender: Some(Gender::Female),
        }
    }

    #[test]
    fn test_freeze_valid_form() {
        let courses = CourseSelections::new()
            .add(CourseSelection::new(Course::GraphicDesign, Schedule::Afternoon))
            .unwrap();
        let snapshot = ReservationSnapshot::freeze(&valid_student(), &courses).unwrap();
        assert_eq!(snapshot.student().name, "Ada Lovelace");
        assert_eq!(snapshot.courses().len(), 1);
    }

    #[test]
    fn test_freeze_requires_a_course() {
        let errors = ReservationSnapshot::freeze(&valid_student(), &CourseSelections::new())
            .unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.get(Field::Courses), Some(FieldError::CoursesRequired));
    }

    #[test]
    fn test_missing_gender_is_accepted() {
        let student = StudentInfo {
            gender: None,
            ..valid_student()
        };
        let courses = CourseSelections::new()
            .add(CourseSelection::new(Course::DataScience, Schedule::Morning))
            .unwrap();
        assert!(ReservationSnapshot::freeze(&student, &courses).is_ok());
    }
}
