use crate::domain::catalog::{Course, Schedule};
use crate::domain::payment::PaymentMethod;
use crate::domain::student::Field;

/// User actions raised by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FieldChanged { field: Field, value: String },
    CourseAdd { course: Course, schedule: Schedule },
    CourseRemove { index: usize },
    FormSubmit,
    FormReset,
    GoBack,
    ReferralChanged { value: String },
    /// `None` clears the selection.
    MethodSelected { method: Option<PaymentMethod> },
    PayClicked,
    ShowBillClicked,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::FieldChanged { .. } => "field_changed",
            Event::CourseAdd { .. } => "course_add",
            Event::CourseRemove { .. } => "course_remove",
            Event::FormSubmit => "form_submit",
            Event::FormReset => "form_reset",
            Event::GoBack => "go_back",
            Event::ReferralChanged { .. } => "referral_changed",
            Event::MethodSelected { .. } => "method_selected",
            Event::PayClicked => "pay_clicked",
            Event::ShowBillClicked => "show_bill_clicked",
        }
    }
}
