use crate::error::ReservationError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const REFERRAL_CODE_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    #[serde(rename = "UPI")]
    Upi,
    NetBanking,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
        PaymentMethod::Cash,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CreditCard",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "NetBanking",
            PaymentMethod::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PaymentMethod {
    type Err = ReservationError;

    /// Accepts the method code, ignoring case and inner spaces ("Net Banking").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.code().eq_ignore_ascii_case(&compact))
            .ok_or_else(|| ReservationError::InvalidEvent(format!("unknown payment method '{s}'")))
    }
}

/// An optional referral code, stored upper-cased together with the length
/// a well-formed code must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralCode {
    code: String,
    len: usize,
}

impl ReferralCode {
    pub fn new(raw: &str) -> Self {
        Self::with_len(raw, REFERRAL_CODE_LEN)
    }

    pub fn with_len(raw: &str, len: usize) -> Self {
        Self {
            code: raw.to_uppercase(),
            len,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn is_present(&self) -> bool {
        !self.code.is_empty()
    }

    /// Exactly the expected number of ASCII letters or digits.
    pub fn is_well_formed(&self) -> bool {
        self.code.chars().count() == self.len
            && self
                .code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    /// Whether the code earns the referral discount.
    pub fn qualifies(&self) -> bool {
        self.is_present() && self.is_well_formed()
    }

    /// The live error shown under the referral input, if any.
    pub fn error(&self) -> Option<ReferralError> {
        (self.is_present() && !self.is_well_formed())
            .then_some(ReferralError::Malformed { len: self.len })
    }
}

impl Default for ReferralCode {
    fn default() -> Self {
        Self::new("")
    }
}

impl Serialize for ReferralCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralError {
    #[error("Referral code must be exactly {len} characters (letters/numbers).")]
    Malformed { len: usize },
}

impl Serialize for ReferralError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRejection {
    #[error("Please select a payment method before proceeding.")]
    MethodRequired,
    #[error("Please fix referral code before payment.")]
    InvalidReferral,
}

/// Payment inputs collected during the payment stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentState {
    pub referral: ReferralCode,
    pub method: Option<PaymentMethod>,
    pub paid: bool,
    pub receipt_visible: bool,
}

impl PaymentState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Gatekeeper for the pay action.
pub struct PaymentAuthorizer;

impl PaymentAuthorizer {
    /// Checks the pay preconditions in order and returns the paid state.
    ///
    /// The input state is left untouched on rejection.
    pub fn pay(state: &PaymentState) -> Result<PaymentState, PaymentRejection> {
        if state.method.is_none() {
            return Err(PaymentRejection::MethodRequired);
        }
        if state.referral.is_present() && !state.referral.is_well_formed() {
            return Err(PaymentRejection::InvalidReferral);
        }

        Ok(PaymentState {
            paid: true,
            ..state.clone()
        })
    }
}
