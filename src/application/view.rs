use crate::domain::payment::{PaymentMethod, ReferralCode, ReferralError};
use crate::domain::pricing::PriceBreakdown;
use crate::domain::receipt::Receipt;
use crate::domain::selection::CourseSelections;
use crate::domain::student::{FieldErrors, StudentInfo};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Reservation,
    Payment,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Reservation => "reservation",
            StageKind::Payment => "payment",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the presentation layer renders, read after each action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowView {
    pub stage: StageKind,
    pub student: StudentInfo,
    pub errors: FieldErrors,
    pub courses: CourseSelections,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentView {
    pub referral: ReferralCode,
    pub referral_error: Option<ReferralError>,
    pub method: Option<PaymentMethod>,
    pub price: PriceBreakdown,
    pub paid: bool,
    /// Present only once the bill has been asked for.
    pub receipt: Option<Receipt>,
}
