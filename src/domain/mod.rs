//! Domain layer: value objects and the pure registration rules.

pub mod catalog;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod receipt;
pub mod reservation;
pub mod selection;
pub mod student;
