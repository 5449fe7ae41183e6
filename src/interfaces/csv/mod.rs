//! CSV adapters for event scripts and receipts.

pub mod event_reader;
pub mod receipt_writer;
