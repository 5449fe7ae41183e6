use super::catalog::FeeTable;
use super::money::Money;
use super::payment::{PaymentMethod, PaymentState};
use super::reservation::ReservationSnapshot;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Discount rates applied to the base total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountRates {
    pub referral: Decimal,
    pub upi: Decimal,
    pub net_banking: Decimal,
}

impl DiscountRates {
    pub fn for_method(&self, method: Option<PaymentMethod>) -> Decimal {
        match method {
            Some(PaymentMethod::Upi) => self.upi,
            Some(PaymentMethod::NetBanking) => self.net_banking,
            Some(PaymentMethod::CreditCard) | Some(PaymentMethod::Cash) | None => Decimal::ZERO,
        }
    }
}

impl Default for DiscountRates {
    fn default() -> Self {
        Self {
            referral: dec!(0.10),
            upi: dec!(0.03),
            net_banking: dec!(0.05),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base_total: Money,
    pub referral_discount: Money,
    pub method_discount: Money,
    pub final_total: Money,
}

/// Derives totals from a reservation and the current payment inputs.
///
/// Both discounts are taken off the base total independently, never off each
/// other. The final total is not floored, so it may go negative with
/// unusually large rates.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    fees: FeeTable,
    rates: DiscountRates,
}

impl PricingEngine {
    pub fn new(fees: FeeTable, rates: DiscountRates) -> Self {
        Self { fees, rates }
    }

    pub fn fees(&self) -> &FeeTable {
        &self.fees
    }

    pub fn price(&self, snapshot: &ReservationSnapshot, payment: &PaymentState) -> PriceBreakdown {
        let base_total: Money = snapshot
            .courses()
            .iter()
            .map(|selection| self.fees.fee(selection.course))
            .sum();

        let referral_discount = if payment.referral.qualifies() {
            base_total.percent(self.rates.referral)
        } else {
            Money::ZERO
        };
        let method_discount = base_total.percent(self.rates.for_method(payment.method));

        PriceBreakdown {
            base_total,
            referral_discount,
            method_discount,
            final_total: base_total - referral_discount - method_discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Course, Schedule};
    use crate::domain::payment::ReferralCode;
    use crate::domain::selection::{CourseSelection, CourseSelections};
    use crate::domain::student::StudentInfo;

    fn snapshot(picks: &[(Course, Schedule)]) -> ReservationSnapshot {
        let student = StudentInfo {
            name: "Grace".into(),
            email: "grace@navy.mil".into(),
            address: "Arlington".into(),
            mobile: "0123456789".into(),
            gender: None,
        };
        let mut courses = CourseSelections::new();
        for (course, schedule) in picks {
            courses = courses.add(CourseSelection::new(*course, *schedule)).unwrap();
        }
        ReservationSnapshot::freeze(&student, &courses).unwrap()
    }

    fn payment(referral: &str, method: Option<PaymentMethod>) -> PaymentState {
        PaymentState {
            referral: ReferralCode::new(referral),
            method,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_discounts() {
        let engine = PricingEngine::default();
        let snap = snapshot(&[(Course::PythonProgramming, Schedule::Afternoon)]);
        for method in [Some(PaymentMethod::Cash), Some(PaymentMethod::CreditCard), None] {
            let price = engine.price(&snap, &payment("", method));
            assert_eq!(price.base_total, Money::new(dec!(4000)));
            assert_eq!(price.final_total, price.base_total);
        }
    }

    #[test]
    fn test_referral_and_upi_are_not_compounded() {
        let engine = PricingEngine::default();
        let snap = snapshot(&[
            (Course::FullStackDevelopment, Schedule::Morning),
            (Course::DataScience, Schedule::Evening),
        ]);
        let price = engine.price(&snap, &payment("abcd1234", Some(PaymentMethod::Upi)));
        assert_eq!(price.base_total, Money::new(dec!(11000)));
        assert_eq!(price.referral_discount, Money::new(dec!(1100)));
        assert_eq!(price.method_discount, Money::new(dec!(330)));
        assert_eq!(price.final_total, Money::new(dec!(9570)));
    }

    #[test]
    fn test_net_banking_rate() {
        let engine = PricingEngine::default();
        let snap = snapshot(&[(Course::GraphicDesign, Schedule::Morning)]);
        let price = engine.price(&snap, &payment("", Some(PaymentMethod::NetBanking)));
        assert_eq!(price.method_discount, Money::new(dec!(150)));
        assert_eq!(price.final_total, Money::new(dec!(2850)));
    }

    #[test]
    fn test_malformed_referral_earns_nothing() {
        let engine = PricingEngine::default();
        let snap = snapshot(&[(Course::GraphicDesign, Schedule::Morning)]);
        let price = engine.price(&snap, &payment("abc", Some(PaymentMethod::Cash)));
        assert_eq!(price.referral_discount, Money::ZERO);
        assert_eq!(price.final_total, Money::new(dec!(3000)));
    }

    #[test]
    fn test_final_total_is_not_floored() {
        let rates = DiscountRates {
            referral: dec!(0.80),
            upi: dec!(0.30),
            net_banking: dec!(0.05),
        };
        let engine = PricingEngine::new(FeeTable::default(), rates);
        let snap = snapshot(&[(Course::GraphicDesign, Schedule::Morning)]);
        let price = engine.price(&snap, &payment("ABCD1234", Some(PaymentMethod::Upi)));
        assert_eq!(price.final_total, Money::new(dec!(-300)));
    }
}
