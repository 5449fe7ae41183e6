use crate::domain::payment::PaymentRejection;
use crate::domain::selection::SelectionRejection;
use crate::domain::student::SubmitErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error(transparent)]
    Selection(#[from] SelectionRejection),
    #[error(transparent)]
    Payment(#[from] PaymentRejection),
    #[error("Reservation cannot be submitted: {0}")]
    Submit(#[from] SubmitErrors),
    #[error("'{action}' is not available during the {stage} stage")]
    WrongStage {
        action: &'static str,
        stage: &'static str,
    },
    #[error("The bill is only available after payment")]
    NotPaid,
    #[error("Payment is already complete")]
    AlreadyPaid,
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReservationError {
    /// True for outcomes the user caused and can correct, as opposed to I/O failures.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::CsvError(_) | Self::IoError(_))
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
