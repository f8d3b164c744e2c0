//! Domain error types.

use crate::domain::num::NumBackend;
use crate::domain::order::OrderSide;

/// Top-level error type for tradescore.
#[derive(Debug, thiserror::Error)]
pub enum TradescoreError {
    #[error("index {index} out of range for series of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("incompatible numeric backends: {left} and {right}")]
    IncompatibleNumericBackend { left: NumBackend, right: NumBackend },

    #[error("numeric overflow in {operation}")]
    NumericOverflow { operation: &'static str },

    #[error("invalid {backend} literal: {literal:?}")]
    InvalidNumber { literal: String, backend: NumBackend },

    #[error("order amount must be positive, got {amount}")]
    InvalidAmount { amount: String },

    #[error("price at index {index} must be non-negative, got {price}")]
    InvalidPrice { index: usize, price: String },

    #[error("bar at index {index} is dated before the previous bar")]
    UnorderedBar { index: usize },

    #[error("invalid order sequence: {side} at index {index} repeats the side of the open position")]
    InvalidOrderSequence { index: usize, side: OrderSide },

    #[error("order at index {index} precedes previous order at index {previous}")]
    UnorderedOrder { index: usize, previous: usize },

    #[error("exit amount {exit} does not match entry amount {entry}")]
    AmountMismatch { entry: String, exit: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to load {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TradescoreError> for std::process::ExitCode {
    fn from(err: &TradescoreError) -> Self {
        let code: u8 = match err {
            TradescoreError::Io(_) => 1,
            TradescoreError::ConfigParse { .. }
            | TradescoreError::ConfigMissing { .. }
            | TradescoreError::ConfigInvalid { .. } => 2,
            TradescoreError::DataLoad { .. }
            | TradescoreError::InvalidPrice { .. }
            | TradescoreError::UnorderedBar { .. } => 3,
            TradescoreError::DivisionByZero
            | TradescoreError::IncompatibleNumericBackend { .. }
            | TradescoreError::NumericOverflow { .. }
            | TradescoreError::InvalidNumber { .. } => 4,
            TradescoreError::IndexOutOfRange { .. }
            | TradescoreError::InvalidAmount { .. }
            | TradescoreError::InvalidOrderSequence { .. }
            | TradescoreError::UnorderedOrder { .. }
            | TradescoreError::AmountMismatch { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    #[test]
    fn display_index_out_of_range() {
        let err = TradescoreError::IndexOutOfRange { index: 7, len: 6 };
        assert_eq!(
            err.to_string(),
            "index 7 out of range for series of length 6"
        );
    }

    #[test]
    fn display_incompatible_backends() {
        let err = TradescoreError::IncompatibleNumericBackend {
            left: NumBackend::Decimal,
            right: NumBackend::Double,
        };
        assert_eq!(
            err.to_string(),
            "incompatible numeric backends: decimal and double"
        );
    }

    #[test]
    fn display_invalid_order_sequence() {
        let err = TradescoreError::InvalidOrderSequence {
            index: 3,
            side: OrderSide::Buy,
        };
        assert!(err.to_string().contains("buy at index 3"));
    }

    fn exit_code(err: &TradescoreError) -> String {
        format!("{:?}", ExitCode::from(err))
    }

    #[test]
    fn exit_codes_by_family() {
        let config = TradescoreError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        };
        assert_eq!(exit_code(&config), format!("{:?}", ExitCode::from(2)));
        assert_eq!(
            exit_code(&TradescoreError::DivisionByZero),
            format!("{:?}", ExitCode::from(4))
        );
        let unordered = TradescoreError::UnorderedOrder {
            index: 1,
            previous: 2,
        };
        assert_eq!(exit_code(&unordered), format!("{:?}", ExitCode::from(5)));
    }
}
