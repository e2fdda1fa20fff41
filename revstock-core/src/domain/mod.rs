//! Domain types for RevStock

pub mod record;

pub use record::{month_of, Record, MONTHS};
