//! Data models for the assembled dashboard report
//!
//! Everything here is built once per run and discarded at exit; nothing is
//! persisted.

pub mod report;

pub use report::{CoinSnapshot, GlobalIndicators, Report};
