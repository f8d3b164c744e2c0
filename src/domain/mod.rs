//! Core domain types and logic.

pub mod config_validation;
pub mod criterion;
pub mod error;
pub mod evaluation;
pub mod num;
pub mod order;
pub mod position;
pub mod price_series;
pub mod ranking;
pub mod trading_record;
