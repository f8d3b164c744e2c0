#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use tradescore::domain::criterion::CriterionKind;
use tradescore::domain::error::TradescoreError;
use tradescore::domain::evaluation::EvaluationConfig;
pub use tradescore::domain::num::{Num, NumBackend};
pub use tradescore::domain::order::{Order, OrderRequest, OrderSide};
pub use tradescore::domain::price_series::PriceSeries;
pub use tradescore::domain::trading_record::TradingRecord;
use tradescore::ports::data_port::DataPort;

pub const BACKENDS: [NumBackend; 2] = [NumBackend::Decimal, NumBackend::Double];

/// Prices of the rising scenario: long 0->2 and 3->5 gain 750 at amount 50.
pub const GAIN_PRICES: [f64; 6] = [100.0, 105.0, 110.0, 100.0, 95.0, 105.0];

/// Prices of the falling scenario: long 0->1 and 2->5 lose 1750 at amount 50.
pub const LOSS_PRICES: [f64; 6] = [100.0, 95.0, 100.0, 80.0, 85.0, 70.0];

pub fn series(backend: NumBackend, closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(backend, closes).unwrap()
}

pub fn num(backend: NumBackend, value: i64) -> Num {
    backend.num_of_i64(value)
}

pub fn assert_num_eq(expected: i64, actual: &Num) {
    let expected = actual.backend().num_of_i64(expected);
    assert!(
        actual.is_equal(&expected).unwrap(),
        "expected {expected}, got {actual}"
    );
}

/// Orders for round trips `(entry, exit)` at the given amount.
pub fn round_trips(
    series: &PriceSeries,
    entry_side: OrderSide,
    trips: &[(usize, usize)],
    amount: i64,
) -> Vec<Order> {
    let amount = series.backend().num_of_i64(amount);
    trips
        .iter()
        .flat_map(|&(entry, exit)| {
            [
                Order::build(entry_side, entry, series, amount).unwrap(),
                Order::build(entry_side.opposite(), exit, series, amount).unwrap(),
            ]
        })
        .collect()
}

pub fn request(side: OrderSide, index: usize, amount: i64, backend: NumBackend) -> OrderRequest {
    OrderRequest {
        side,
        index,
        amount: backend.num_of_i64(amount),
    }
}

pub fn sample_config() -> EvaluationConfig {
    EvaluationConfig {
        data_dir: PathBuf::from("unused"),
        series: "BHP".to_string(),
        backend: NumBackend::Decimal,
        criterion: CriterionKind::ProfitLoss,
        parallel: true,
        log_level: log::LevelFilter::Off,
    }
}

/// Order streams are stored as `(side, index, amount)` triples.
pub struct MockDataPort {
    pub closes: HashMap<String, Vec<f64>>,
    pub orders: HashMap<String, Vec<(OrderSide, usize, i64)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            closes: HashMap::new(),
            orders: HashMap::new(),
        }
    }

    pub fn with_series(mut self, name: &str, closes: &[f64]) -> Self {
        self.closes.insert(name.to_string(), closes.to_vec());
        self
    }

    pub fn with_orders(mut self, name: &str, orders: &[(OrderSide, usize, i64)]) -> Self {
        self.orders.insert(name.to_string(), orders.to_vec());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        name: &str,
        backend: NumBackend,
    ) -> Result<PriceSeries, TradescoreError> {
        let closes = self.closes.get(name).ok_or_else(|| TradescoreError::DataLoad {
            path: name.to_string(),
            reason: "no such series".into(),
        })?;
        PriceSeries::from_closes(backend, closes)
    }

    fn fetch_orders(
        &self,
        name: &str,
        backend: NumBackend,
    ) -> Result<Vec<OrderRequest>, TradescoreError> {
        let orders = self.orders.get(name).ok_or_else(|| TradescoreError::DataLoad {
            path: name.to_string(),
            reason: "no such order stream".into(),
        })?;
        Ok(orders
            .iter()
            .map(|&(side, index, amount)| request(side, index, amount, backend))
            .collect())
    }

    fn list_order_sets(&self) -> Result<Vec<String>, TradescoreError> {
        let mut names: Vec<String> = self.orders.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
