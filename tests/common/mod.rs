#![allow(dead_code)]

use coursepay::application::events::Event;
use coursepay::application::workflow::WorkflowController;
use coursepay::domain::catalog::{Course, Schedule};
use coursepay::domain::student::Field;

/// Fills every student field with valid values.
pub fn fill_valid_student(workflow: &mut WorkflowController) {
    for (field, value) in [
        (Field::Name, "Ada Lovelace"),
        (Field::Email, "ada@example.com"),
        (Field::Address, "12 Analytical Street"),
        (Field::Mobile, "98765-43210"),
        (Field::Gender, "Female"),
    ] {
        workflow
            .dispatch(Event::FieldChanged {
                field,
                value: value.to_string(),
            })
            .unwrap();
    }
}

/// A controller in the payment stage holding the given courses.
pub fn workflow_in_payment(courses: &[(Course, Schedule)]) -> WorkflowController {
    let mut workflow = WorkflowController::default();
    fill_valid_student(&mut workflow);
    for &(course, schedule) in courses {
        workflow
            .dispatch(Event::CourseAdd { course, schedule })
            .unwrap();
    }
    workflow.dispatch(Event::FormSubmit).unwrap();
    workflow
}
