//! Presswire domain core.
//!
//! This crate has zero internal deps and no I/O so the scheduling rules can
//! be used (and unit-tested) without a database or web server.

pub mod clock;
pub mod error;
pub mod roles;
pub mod schedule;
pub mod types;
