use super::money::Money;
use crate::error::ReservationError;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The fixed catalog of courses a student can reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "Full Stack Development")]
    FullStackDevelopment,
    #[serde(rename = "Python Programming")]
    PythonProgramming,
    #[serde(rename = "Graphic Design")]
    GraphicDesign,
    #[serde(rename = "Data Science")]
    DataScience,
}

impl Course {
    pub const ALL: [Course; 4] = [
        Course::FullStackDevelopment,
        Course::PythonProgramming,
        Course::GraphicDesign,
        Course::DataScience,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Course::FullStackDevelopment => "Full Stack Development",
            Course::PythonProgramming => "Python Programming",
            Course::GraphicDesign => "Graphic Design",
            Course::DataScience => "Data Science",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Course {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Course::ALL
            .into_iter()
            .find(|course| course.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReservationError::InvalidEvent(format!("unknown course '{s}'")))
    }
}

/// A daily time slot. A student may hold at most one course per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Schedule {
    Morning,
    Afternoon,
    Evening,
}

impl Schedule {
    pub const ALL: [Schedule; 3] = [Schedule::Morning, Schedule::Afternoon, Schedule::Evening];

    pub fn name(&self) -> &'static str {
        match self {
            Schedule::Morning => "Morning",
            Schedule::Afternoon => "Afternoon",
            Schedule::Evening => "Evening",
        }
    }

    pub fn time_range(&self) -> &'static str {
        match self {
            Schedule::Morning => "10AM - 12PM",
            Schedule::Afternoon => "1PM - 3PM",
            Schedule::Evening => "6PM - 8PM",
        }
    }

    /// Slot name with its hours, e.g. "Morning (10AM - 12PM)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.time_range())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Schedule {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Schedule::ALL
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReservationError::InvalidEvent(format!("unknown schedule '{s}'")))
    }
}

/// Maps each course to its fixed fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTable(BTreeMap<Course, Money>);

impl FeeTable {
    pub fn new(fees: impl IntoIterator<Item = (Course, Money)>) -> Self {
        Self(fees.into_iter().collect())
    }

    /// Fee for `course`, or zero when the table has no entry for it.
    pub fn fee(&self, course: Course) -> Money {
        self.0.get(&course).copied().unwrap_or(Money::ZERO)
    }
}

impl Default for FeeTable {
    fn default() -> Self {
        Self::new([
            (Course::FullStackDevelopment, Money::new(dec!(5000))),
            (Course::PythonProgramming, Money::new(dec!(4000))),
            (Course::GraphicDesign, Money::new(dec!(3000))),
            (Course::DataScience, Money::new(dec!(6000))),
        ])
    }
}
