//! Adapters implementing the workflow observer port.

pub mod logging;
