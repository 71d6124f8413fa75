//! Inbound adapters
//!
//! - `http`: JSON / form API over the reservation ledger

pub mod http;
