use super::catalog::{Course, FeeTable, Schedule};
use super::money::Money;
use super::payment::{PaymentMethod, PaymentState};
use super::pricing::PriceBreakdown;
use super::reservation::ReservationSnapshot;
use crate::error::{ReservationError, Result};
use serde::Serialize;

/// Institution details printed above the receipt table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptHeader {
    pub institution: String,
    pub motto: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub course: Course,
    pub schedule: Schedule,
    pub fee: Money,
}

/// Post-payment summary of a reservation.
///
/// Discounts are `None` when they did not apply, so a receipt only lists the
/// discounts the student actually received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub header: ReceiptHeader,
    pub student: String,
    pub method: PaymentMethod,
    pub lines: Vec<ReceiptLine>,
    pub base_total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_discount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_discount: Option<Money>,
    pub final_total: Money,
}

pub struct ReceiptGenerator;

impl ReceiptGenerator {
    /// Builds the receipt for a paid reservation.
    ///
    /// Fails with `NotPaid` unless the payment state has been authorized.
    pub fn generate(
        header: &ReceiptHeader,
        snapshot: &ReservationSnapshot,
        payment: &PaymentState,
        price: &PriceBreakdown,
        fees: &FeeTable,
    ) -> Result<Receipt> {
        if !payment.paid {
            return Err(ReservationError::NotPaid);
        }
        let method = payment.method.ok_or(ReservationError::NotPaid)?;

        let lines = snapshot
            .courses()
            .iter()
            .map(|selection| ReceiptLine {
                course: selection.course,
                schedule: selection.schedule,
                fee: fees.fee(selection.course),
            })
            .collect();

        Ok(Receipt {
            header: header.clone(),
            student: snapshot.student().name.clone(),
            method,
            lines,
            base_total: price.base_total,
            referral_discount: price
                .referral_discount
                .is_positive()
                .then_some(price.referral_discount),
            method_discount: price
                .method_discount
                .is_positive()
                .then_some(price.method_discount),
            final_total: price.final_total,
        })
    }
}
