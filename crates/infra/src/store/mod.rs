//! Account store implementations.
//!
//! Both back the same [`ferrobank_ledger::AccountStore`] port with the same
//! atomicity semantics: the in-memory store serializes through one mutex and
//! is used for dev runs and black-box tests; the Postgres store carries the
//! real deployment.

pub mod memory;
pub mod postgres;
