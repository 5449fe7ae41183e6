//! Application layer orchestrating the registration workflow.
//!
//! `WorkflowController` owns the current stage and routes presentation events
//! to the domain rules. Each event is handled to completion before the next
//! one is accepted.

pub mod events;
pub mod observer;
pub mod view;
pub mod workflow;
