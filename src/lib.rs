//! Spaced-repetition core for a vocabulary-learning service.
//!
//! Two engines over caller-supplied snapshots: the Leitner scheduler
//! ([`services::scheduler`]) decides which items are due and applies review
//! outcomes, and the progress aggregator ([`services::progress`]) computes a
//! learner's report and population rank. Persistence, time, and identity are
//! collaborators injected through the seams in [`store`]; the core never
//! opens a connection or reads the system clock on its own.

pub mod config;
pub mod dates;
pub mod logging;
pub mod services;
pub mod store;
pub mod types;
