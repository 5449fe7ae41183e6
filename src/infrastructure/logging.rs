use crate::application::view::WorkflowView;
use crate::application::observer::WorkflowObserver;
use tracing::{debug, info};

/// Observer that reports every workflow update through `tracing`.
///
/// Used by the command-line driver in place of a rendering front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl WorkflowObserver for LoggingObserver {
    fn on_update(&self, view: &WorkflowView) {
        debug!(
            stage = %view.stage,
            courses = view.courses.len(),
            errors = view.errors.len(),
            "Workflow updated"
        );

        if let Some(payment) = &view.payment {
            debug!(
                base_total = %payment.price.base_total,
                referral_discount = %payment.price.referral_discount,
                method_discount = %payment.price.method_discount,
                final_total = %payment.price.final_total,
                paid = payment.paid,
                "Pricing"
            );
            if let Some(receipt) = &payment.receipt {
                info!(student = %receipt.student, final_total = %receipt.final_total, "Bill shown");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::workflow::WorkflowController;
    use crate::domain::student::Field;

    #[test]
    fn test_logging_observer_accepts_updates() {
        let mut wf = WorkflowController::default();
        wf.subscribe(Box::new(LoggingObserver::new()));
        let outcome = wf.dispatch(crate::application::events::Event::FieldChanged {
            field: Field::Name,
            value: "Ada".into(),
        });
        assert!(outcome.is_ok());
    }
}
