//! Application services

pub mod ledger;

pub use ledger::LedgerService;
