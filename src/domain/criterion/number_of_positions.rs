//! Count of closed positions.

use super::AnalysisCriterion;
use crate::domain::error::TradescoreError;
use crate::domain::num::Num;
use crate::domain::position::Position;
use crate::domain::price_series::PriceSeries;
use crate::domain::trading_record::TradingRecord;

/// Number of closed positions. Fewer positions is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberOfPositionsCriterion;

impl AnalysisCriterion for NumberOfPositionsCriterion {
    fn name(&self) -> &'static str {
        "number_of_positions"
    }

    fn calculate_position(
        &self,
        series: &PriceSeries,
        position: &Position,
    ) -> Result<Num, TradescoreError> {
        let count = if position.is_closed() { 1 } else { 0 };
        Ok(series.backend().num_of_i64(count))
    }

    fn calculate(
        &self,
        series: &PriceSeries,
        record: &TradingRecord,
    ) -> Result<Num, TradescoreError> {
        Ok(series
            .backend()
            .num_of_i64(record.closed_position_count() as i64))
    }

    fn better_than(&self, a: &Num, b: &Num) -> Result<bool, TradescoreError> {
        a.is_less_than(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::num::NumBackend;
    use crate::domain::order::Order;

    #[test]
    fn counts_only_closed_positions() {
        let d = NumBackend::Decimal;
        let s = PriceSeries::from_closes(d, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let a = d.num_of_i64(1);
        let record = TradingRecord::from_orders([
            Order::build_buy(0, &s, a).unwrap(),
            Order::build_sell(1, &s, a).unwrap(),
            Order::build_sell(2, &s, a).unwrap(),
            Order::build_buy(3, &s, a).unwrap(),
            Order::build_buy(4, &s, a).unwrap(),
        ])
        .unwrap();
        let score = NumberOfPositionsCriterion.calculate(&s, &record).unwrap();
        assert!(score.is_equal(&d.num_of_i64(2)).unwrap());

        let open = record.current_position().unwrap();
        assert!(NumberOfPositionsCriterion
            .calculate_position(&s, open)
            .unwrap()
            .is_zero());
    }

    #[test]
    fn fewer_is_better() {
        let d = NumBackend::Double;
        let c = NumberOfPositionsCriterion;
        assert!(c.better_than(&d.num_of_i64(3), &d.num_of_i64(6)).unwrap());
        assert!(!c.better_than(&d.num_of_i64(6), &d.num_of_i64(3)).unwrap());
        assert!(!c.better_than(&d.num_of_i64(3), &d.num_of_i64(3)).unwrap());
    }
}
