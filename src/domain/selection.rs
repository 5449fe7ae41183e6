use super::catalog::{Course, Schedule};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_COURSES: usize = 2;

/// One reserved course in one time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSelection {
    pub course: Course,
    pub schedule: Schedule,
}

impl CourseSelection {
    pub fn new(course: Course, schedule: Schedule) -> Self {
        Self { course, schedule }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRejection {
    #[error("You can choose a maximum of {max} courses.")]
    CapacityExceeded { max: usize },
    #[error("You already selected this course. Choose another course.")]
    DuplicateCourse,
    #[error("You already selected a course in this time slot. Choose a different timing.")]
    ScheduleConflict,
    #[error("There is no selected course at position {index}.")]
    NoSuchSelection { index: usize },
}

/// The ordered course selections of one student.
///
/// Order is selection order and is kept for display and receipt lines.
/// The list never holds more than its capacity (`MAX_COURSES` unless
/// configured otherwise), never repeats a course and never puts two courses
/// in the same slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CourseSelections(Vec<CourseSelection>);

impl CourseSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the list extended with `selection`, or the first rule it breaks.
    pub fn add(&self, selection: CourseSelection) -> Result<Self, SelectionRejection> {
        self.add_within(selection, MAX_COURSES)
    }

    /// Like `add`, but with a capacity of `max` courses.
    pub fn add_within(
        &self,
        selection: CourseSelection,
        max: usize,
    ) -> Result<Self, SelectionRejection> {
        if self.0.len() >= max {
            return Err(SelectionRejection::CapacityExceeded { max });
        }
        if self.0.iter().any(|s| s.course == selection.course) {
            return Err(SelectionRejection::DuplicateCourse);
        }
        if self.0.iter().any(|s| s.schedule == selection.schedule) {
            return Err(SelectionRejection::ScheduleConflict);
        }

        let mut next = self.0.clone();
        next.push(selection);
        Ok(Self(next))
    }

    /// Returns the list without the entry at `index`.
    pub fn remove(&self, index: usize) -> Result<Self, SelectionRejection> {
        if index >= self.0.len() {
            return Err(SelectionRejection::NoSuchSelection { index });
        }

        let mut next = self.0.clone();
        next.remove(index);
        Ok(Self(next))
    }

    pub fn as_slice(&self) -> &[CourseSelection] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseSelection> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
