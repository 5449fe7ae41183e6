use super::events::Event;
use super::observer::WorkflowObserverBox;
use super::view::{PaymentView, StageKind, WorkflowView};
use crate::config::RegistrationConfig;
use crate::domain::catalog::{Course, Schedule};
use crate::domain::payment::{
    PaymentAuthorizer, PaymentMethod, PaymentState, ReferralCode, ReferralError,
};
use crate::domain::pricing::{PriceBreakdown, PricingEngine};
use crate::domain::receipt::{Receipt, ReceiptGenerator, ReceiptHeader};
use crate::domain::reservation::ReservationSnapshot;
use crate::domain::selection::{CourseSelection, CourseSelections};
use crate::domain::student::{Field, FieldError, FieldErrors, StudentInfo};
use crate::error::{ReservationError, Result};
use tracing::{debug, info, warn};

/// The editable form of the reservation stage.
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    student: StudentInfo,
    courses: CourseSelections,
    errors: FieldErrors,
}

/// The frozen reservation and the payment inputs of the payment stage.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    snapshot: ReservationSnapshot,
    payment: PaymentState,
    receipt: Option<Receipt>,
}

#[derive(Debug, Clone)]
pub enum Stage {
    Reservation(ReservationForm),
    Payment(PaymentSession),
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Reservation(_) => StageKind::Reservation,
            Stage::Payment(_) => StageKind::Payment,
        }
    }
}

/// What a successfully handled event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    /// A field edit was stored; carries the error for the new value.
    FieldChecked(Option<FieldError>),
    ReferralChecked(Option<ReferralError>),
    StageChanged(StageKind),
}

/// The registration workflow: reservation, then payment, then receipt.
///
/// Every action either completes fully or is rejected without touching the
/// state. Observers are notified after each dispatched event either way.
pub struct WorkflowController {
    pricing: PricingEngine,
    header: ReceiptHeader,
    max_courses: usize,
    referral_code_len: usize,
    stage: Stage,
    observers: Vec<WorkflowObserverBox>,
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new(&RegistrationConfig::default())
    }
}

impl WorkflowController {
    pub fn new(config: &RegistrationConfig) -> Self {
        Self {
            pricing: config.pricing_engine(),
            header: config.receipt_header(),
            max_courses: config.max_courses,
            referral_code_len: config.referral_code_len,
            stage: Stage::Reservation(ReservationForm::default()),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: WorkflowObserverBox) {
        self.observers.push(observer);
    }

    pub fn stage(&self) -> StageKind {
        self.stage.kind()
    }

    /// Routes an event to its action, then notifies observers.
    pub fn dispatch(&mut self, event: Event) -> Result<Outcome> {
        let name = event.name();
        let result = match event {
            Event::FieldChanged { field, value } => {
                self.field_changed(field, &value).map(Outcome::FieldChecked)
            }
            Event::CourseAdd { course, schedule } => {
                self.add_course(course, schedule).map(|_| Outcome::Accepted)
            }
            Event::CourseRemove { index } => self.remove_course(index).map(|_| Outcome::Accepted),
            Event::FormSubmit => self.submit().map(|_| Outcome::StageChanged(StageKind::Payment)),
            Event::FormReset => self.reset().map(|_| Outcome::Accepted),
            Event::GoBack => self
                .go_back()
                .map(|_| Outcome::StageChanged(StageKind::Reservation)),
            Event::ReferralChanged { value } => {
                self.referral_changed(&value).map(Outcome::ReferralChecked)
            }
            Event::MethodSelected { method } => {
                self.select_method(method).map(|_| Outcome::Accepted)
            }
            Event::PayClicked => self.pay().map(|_| Outcome::Accepted),
            Event::ShowBillClicked => self.show_bill().map(|_| Outcome::Accepted),
        };

        if let Err(e) = &result {
            warn!(event = name, stage = %self.stage.kind(), "Rejected: {}", e);
        }
        self.notify();
        result
    }

    /// Sanitizes and stores a field value, recording its validation error.
    pub fn field_changed(&mut self, field: Field, raw: &str) -> Result<Option<FieldError>> {
        let form = self.reservation_mut("field_changed")?;
        if field == Field::Courses {
            return Err(ReservationError::InvalidEvent(
                "courses are changed with course_add and course_remove".to_string(),
            ));
        }
        let error = form.student.set(field, raw);
        match error {
            Some(err) => form.errors.insert(field, err),
            None => form.errors.remove(&field),
        };
        debug!(%field, error = ?error, "Field updated");
        Ok(error)
    }

    pub fn add_course(&mut self, course: Course, schedule: Schedule) -> Result<&CourseSelections> {
        let max = self.max_courses;
        let form = self.reservation_mut("course_add")?;
        form.courses = form
            .courses
            .add_within(CourseSelection::new(course, schedule), max)?;
        form.errors.remove(&Field::Courses);
        debug!(%course, %schedule, selected = form.courses.len(), "Course added");
        Ok(&form.courses)
    }

    pub fn remove_course(&mut self, index: usize) -> Result<&CourseSelections> {
        let form = self.reservation_mut("course_remove")?;
        form.courses = form.courses.remove(index)?;
        debug!(index, selected = form.courses.len(), "Course removed");
        Ok(&form.courses)
    }

    /// Validates the whole form and, if clean, moves to the payment stage.
    ///
    /// On failure the error map is replaced by the full set of submit errors.
    pub fn submit(&mut self) -> Result<()> {
        let code_len = self.referral_code_len;
        let form = self.reservation_mut("form_submit")?;
        match ReservationSnapshot::freeze(&form.student, &form.courses) {
            Ok(snapshot) => {
                info!(
                    student = %snapshot.student().name,
                    courses = snapshot.courses().len(),
                    "Reservation submitted"
                );
                let payment = PaymentState {
                    referral: ReferralCode::with_len("", code_len),
                    ..PaymentState::new()
                };
                self.stage = Stage::Payment(PaymentSession {
                    snapshot,
                    payment,
                    receipt: None,
                });
                Ok(())
            }
            Err(errors) => {
                form.errors = errors.0.clone();
                Err(errors.into())
            }
        }
    }

    /// Clears the form. Recorded errors stay until the next edit or submit.
    pub fn reset(&mut self) -> Result<()> {
        let form = self.reservation_mut("form_reset")?;
        form.student = StudentInfo::default();
        form.courses = CourseSelections::new();
        debug!("Form reset");
        Ok(())
    }

    /// Drops the reservation and payment and starts over with an empty form.
    pub fn go_back(&mut self) -> Result<()> {
        self.payment_mut("go_back")?;
        self.stage = Stage::Reservation(ReservationForm::default());
        info!("Returned to reservation");
        Ok(())
    }

    pub fn referral_changed(&mut self, raw: &str) -> Result<Option<ReferralError>> {
        let len = self.referral_code_len;
        let payment = self.unpaid_payment_mut("referral_changed")?;
        payment.referral = ReferralCode::with_len(raw, len);
        let error = payment.referral.error();
        debug!(referral = payment.referral.as_str(), error = ?error, "Referral updated");
        Ok(error)
    }

    pub fn select_method(&mut self, method: Option<PaymentMethod>) -> Result<()> {
        let payment = self.unpaid_payment_mut("method_selected")?;
        payment.method = method;
        debug!(method = ?method, "Payment method selected");
        Ok(())
    }

    /// Authorizes the payment and builds the receipt.
    ///
    /// Paying again after success changes nothing.
    pub fn pay(&mut self) -> Result<()> {
        let pricing = &self.pricing;
        let header = &self.header;
        let session = match &mut self.stage {
            Stage::Payment(session) => session,
            Stage::Reservation(_) => return Err(wrong_stage("pay_clicked", StageKind::Reservation)),
        };
        if session.payment.paid {
            return Ok(());
        }

        let paid = PaymentAuthorizer::pay(&session.payment)?;
        let price = pricing.price(&session.snapshot, &paid);
        let receipt =
            ReceiptGenerator::generate(header, &session.snapshot, &paid, &price, pricing.fees())?;
        info!(
            method = %receipt.method,
            final_total = %receipt.final_total,
            "Payment successful"
        );
        session.payment = paid;
        session.receipt = Some(receipt);
        Ok(())
    }

    pub fn show_bill(&mut self) -> Result<()> {
        let session = self.payment_mut("show_bill_clicked")?;
        if !session.payment.paid {
            return Err(ReservationError::NotPaid);
        }
        session.payment.receipt_visible = true;
        Ok(())
    }

    /// Live totals for the payment stage.
    pub fn pricing(&self) -> Option<PriceBreakdown> {
        match &self.stage {
            Stage::Payment(session) => Some(self.pricing.price(&session.snapshot, &session.payment)),
            Stage::Reservation(_) => None,
        }
    }

    /// The receipt, once paid and asked for.
    pub fn receipt(&self) -> Option<&Receipt> {
        match &self.stage {
            Stage::Payment(session) if session.payment.receipt_visible => session.receipt.as_ref(),
            _ => None,
        }
    }

    pub fn view(&self) -> WorkflowView {
        match &self.stage {
            Stage::Reservation(form) => WorkflowView {
                stage: StageKind::Reservation,
                student: form.student.clone(),
                errors: form.errors.clone(),
                courses: form.courses.clone(),
                payment: None,
            },
            Stage::Payment(session) => WorkflowView {
                stage: StageKind::Payment,
                student: session.snapshot.student().clone(),
                errors: FieldErrors::new(),
                courses: session.snapshot.courses().clone(),
                payment: Some(PaymentView {
                    referral: session.payment.referral.clone(),
                    referral_error: session.payment.referral.error(),
                    method: session.payment.method,
                    price: self.pricing.price(&session.snapshot, &session.payment),
                    paid: session.payment.paid,
                    receipt: self.receipt().cloned(),
                }),
            },
        }
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in &self.observers {
            observer.on_update(&view);
        }
    }

    fn reservation_mut(&mut self, action: &'static str) -> Result<&mut ReservationForm> {
        match &mut self.stage {
            Stage::Reservation(form) => Ok(form),
            Stage::Payment(_) => Err(wrong_stage(action, StageKind::Payment)),
        }
    }

    fn payment_mut(&mut self, action: &'static str) -> Result<&mut PaymentSession> {
        match &mut self.stage {
            Stage::Payment(session) => Ok(session),
            Stage::Reservation(_) => Err(wrong_stage(action, StageKind::Reservation)),
        }
    }

    fn unpaid_payment_mut(&mut self, action: &'static str) -> Result<&mut PaymentState> {
        let session = self.payment_mut(action)?;
        if session.payment.paid {
            return Err(ReservationError::AlreadyPaid);
        }
        Ok(&mut session.payment)
    }
}

fn wrong_stage(action: &'static str, stage: StageKind) -> ReservationError {
    ReservationError::WrongStage {
        action,
        stage: stage.as_str(),
    }
}
