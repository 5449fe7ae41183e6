use crate::application::events::Event;
use crate::error::{ReservationError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    FieldChanged,
    CourseAdd,
    CourseRemove,
    FormSubmit,
    FormReset,
    GoBack,
    ReferralChanged,
    MethodSelected,
    PayClicked,
    ShowBillClicked,
}

/// One row of an event script: `event, target, value`.
///
/// `target` names the field or course an event applies to; `value` carries
/// the typed text, schedule, index or payment method.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EventRecord {
    pub event: EventKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

fn required<'a>(slot: &'a Option<String>, what: &str, kind: EventKind) -> Result<&'a str> {
    slot.as_deref()
        .ok_or_else(|| ReservationError::InvalidEvent(format!("{kind:?} needs a {what}")))
}

impl TryFrom<EventRecord> for Event {
    type Error = ReservationError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let kind = record.event;
        let event = match kind {
            EventKind::FieldChanged => Event::FieldChanged {
                field: required(&record.target, "field", kind)?.parse()?,
                value: record.value.unwrap_or_default(),
            },
            EventKind::CourseAdd => Event::CourseAdd {
                course: required(&record.target, "course", kind)?.parse()?,
                schedule: required(&record.value, "schedule", kind)?.parse()?,
            },
            EventKind::CourseRemove => {
                let raw = required(&record.value, "index", kind)?;
                let index = raw.parse().map_err(|_| {
                    ReservationError::InvalidEvent(format!("'{raw}' is not a course position"))
                })?;
                Event::CourseRemove { index }
            }
            EventKind::FormSubmit => Event::FormSubmit,
            EventKind::FormReset => Event::FormReset,
            EventKind::GoBack => Event::GoBack,
            EventKind::ReferralChanged => Event::ReferralChanged {
                value: record.value.unwrap_or_default(),
            },
            EventKind::MethodSelected => Event::MethodSelected {
                method: record.value.as_deref().map(str::parse).transpose()?,
            },
            EventKind::PayClicked => Event::PayClicked,
            EventKind::ShowBillClicked => Event::ShowBillClicked,
        };
        Ok(event)
    }
}

/// Reads presentation events from a CSV script.
///
/// Rows are trimmed and may omit trailing columns. Each row is parsed lazily,
/// so a bad row surfaces as an error item without stopping the stream.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn events(self) -> impl Iterator<Item = Result<Event>> {
        self.reader.into_deserialize().map(|result| -> Result<Event> {
            let record: EventRecord = result.map_err(ReservationError::from)?;
            Event::try_from(record)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Course, Schedule};
    use crate::domain::payment::PaymentMethod;
    use crate::domain::student::Field;

    #[test]
    fn test_reader_valid_stream() {
        let data = "event, target, value\n\
                    field_changed, name, Ada Lovelace\n\
                    course_add, Data Science, Evening\n\
                    course_remove, , 0\n\
                    form_submit\n\
                    method_selected, , Net Banking\n\
                    method_selected, ,\n";
        let events: Vec<Event> = EventReader::new(data.as_bytes())
            .events()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            events,
            vec![
                Event::FieldChanged {
                    field: Field::Name,
                    value: "Ada Lovelace".into()
                },
                Event::CourseAdd {
                    course: Course::DataScience,
                    schedule: Schedule::Evening
                },
                Event::CourseRemove { index: 0 },
                Event::FormSubmit,
                Event::MethodSelected {
                    method: Some(PaymentMethod::NetBanking)
                },
                Event::MethodSelected { method: None },
            ]
        );
    }

    #[test]
    fn test_reader_bad_rows_do_not_stop_the_stream() {
        let data = "event, target, value\n\
                    teleport, , \n\
                    course_add, Cooking, Morning\n\
                    course_remove, , first\n\
                    pay_clicked, , \n";
        let results: Vec<Result<Event>> = EventReader::new(data.as_bytes()).events().collect();

        assert_eq!(results.len(), 4);
        assert!(matches!(results[0], Err(ReservationError::CsvError(_))));
        assert!(matches!(results[1], Err(ReservationError::InvalidEvent(_))));
        assert!(matches!(results[2], Err(ReservationError::InvalidEvent(_))));
        assert_eq!(results[3].as_ref().unwrap(), &Event::PayClicked);
    }

    #[test]
    fn test_field_change_without_value_clears_field() {
        let data = "event,target,value\nfield_changed,address,\n";
        let event = EventReader::new(data.as_bytes()).events().next().unwrap().unwrap();
        assert_eq!(
            event,
            Event::FieldChanged {
                field: Field::Address,
                value: String::new()
            }
        );
    }
}
