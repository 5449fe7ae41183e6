//! Student details captured during the reservation stage, and the per-field
//! sanitization and validation rules applied to them.

use crate::error::ReservationError;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
static MOBILE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile regex"));

const MIN_NAME_LEN: usize = 3;

/// Keys of the per-field error map. `Courses` has no text value of its own;
/// it only carries the "at least one course" submit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Address,
    Mobile,
    Gender,
    Courses,
}

impl Field {
    pub const EDITABLE: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Address,
        Field::Mobile,
        Field::Gender,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Address => "address",
            Field::Mobile => "mobile",
            Field::Gender => "gender",
            Field::Courses => "courses",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Field::EDITABLE
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReservationError::InvalidEvent(format!("unknown field '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parses a radio-button value. Anything unrecognized yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name cannot be empty.")]
    NameEmpty,
    #[error("Name must be at least 3 characters.")]
    NameTooShort,
    #[error("Please enter a valid email.")]
    EmailInvalid,
    #[error("Address cannot be empty.")]
    AddressEmpty,
    #[error("Phone must be exactly 10 digits.")]
    MobileInvalid,
    #[error("Select at least one course.")]
    CoursesRequired,
}

/// Rendered as the message shown under the field.
impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Every error found when the reservation form was submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", summarize(.0))]
pub struct SubmitErrors(pub FieldErrors);

impl SubmitErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, err)| format!("{field}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Cleans a raw input value the way the form stores it.
///
/// Digits are stripped from names and everything but digits from mobile
/// numbers. Other fields are stored as typed.
pub fn sanitize(field: Field, raw: &str) -> String {
    match field {
        Field::Name => raw.chars().filter(|c| !c.is_ascii_digit()).collect(),
        Field::Mobile => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        _ => raw.to_string(),
    }
}

/// Validates an already sanitized value.
///
/// Gender has no rule: an empty gender is accepted on submit.
pub fn validate(field: Field, value: &str) -> Option<FieldError> {
    match field {
        Field::Name => {
            if value.trim().is_empty() {
                Some(FieldError::NameEmpty)
            } else if value.chars().count() < MIN_NAME_LEN {
                Some(FieldError::NameTooShort)
            } else {
                None
            }
        }
        Field::Email => (!EMAIL_SHAPE.is_match(value.trim())).then_some(FieldError::EmailInvalid),
        Field::Address => value.trim().is_empty().then_some(FieldError::AddressEmpty),
        Field::Mobile => (!MOBILE_SHAPE.is_match(value)).then_some(FieldError::MobileInvalid),
        Field::Gender | Field::Courses => None,
    }
}

/// The editable student details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    pub email: String,
    pub address: String,
    pub mobile: String,
    pub gender: Option<Gender>,
}

impl StudentInfo {
    /// Sanitizes `raw`, stores it and returns the error for the stored value.
    pub fn set(&mut self, field: Field, raw: &str) -> Option<FieldError> {
        let value = sanitize(field, raw);
        let error = validate(field, &value);
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Address => self.address = value,
            Field::Mobile => self.mobile = value,
            Field::Gender => self.gender = Gender::parse(&value),
            Field::Courses => {}
        }
        error
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Address => &self.address,
            Field::Mobile => &self.mobile,
            Field::Gender => match self.gender {
                Some(Gender::Male) => "Male",
                Some(Gender::Female) => "Female",
                Some(Gender::Other) => "Other",
                None => "",
            },
            Field::Courses => "",
        }
    }

    /// Runs every field rule at once.
    pub fn validate_all(&self) -> FieldErrors {
        Field::EDITABLE
            .into_iter()
            .filter_map(|field| validate(field, self.value(field)).map(|err| (field, err)))
            .collect()
    }
}
