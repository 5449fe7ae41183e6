use crate::domain::catalog::FeeTable;
use crate::domain::payment::REFERRAL_CODE_LEN;
use crate::domain::pricing::{DiscountRates, PricingEngine};
use crate::domain::receipt::ReceiptHeader;
use crate::domain::selection::MAX_COURSES;
use serde::{Deserialize, Serialize};

/// The fixed settings of the registration desk.
///
/// These are not editable at runtime; `Default` is the only configuration the
/// application ships with. `WorkflowController::new` reads every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    pub institution: String,
    pub motto: String,
    pub fees: FeeTable,
    pub rates: DiscountRates,
    pub referral_code_len: usize,
    pub max_courses: usize,
}

impl RegistrationConfig {
    pub fn pricing_engine(&self) -> PricingEngine {
        PricingEngine::new(self.fees.clone(), self.rates)
    }

    pub fn receipt_header(&self) -> ReceiptHeader {
        ReceiptHeader {
            institution: self.institution.clone(),
            motto: self.motto.clone(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            institution: "Computer Online Education Centre".to_string(),
            motto: "The great aim of education is not knowledge, but action".to_string(),
            fees: FeeTable::default(),
            rates: DiscountRates::default(),
            referral_code_len: REFERRAL_CODE_LEN,
            max_courses: MAX_COURSES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Course;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_constants() {
        let config = RegistrationConfig::default();
        assert_eq!(config.max_courses, 2);
        assert_eq!(config.referral_code_len, 8);
        assert_eq!(config.rates.referral, dec!(0.10));
        assert_eq!(config.rates.upi, dec!(0.03));
        assert_eq!(config.rates.net_banking, dec!(0.05));
        assert_eq!(config.fees.fee(Course::DataScience), Money::new(dec!(6000)));
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_value(RegistrationConfig::default()).unwrap();
        assert_eq!(json["max_courses"], 2);
        assert_eq!(json["fees"]["Graphic Design"], "3000.00");
    }
}
