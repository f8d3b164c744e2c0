//! Total profit/loss over closed positions.

use super::{AnalysisCriterion, sum_closed};
use crate::domain::error::TradescoreError;
use crate::domain::num::Num;
use crate::domain::position::Position;
use crate::domain::price_series::PriceSeries;
use crate::domain::trading_record::TradingRecord;

/// Sum of signed profit/loss over closed positions. Long positions earn
/// `(exit - entry) * amount`, short positions the negation; open positions
/// contribute zero. Higher is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitLossCriterion;

impl AnalysisCriterion for ProfitLossCriterion {
    fn name(&self) -> &'static str {
        "profit_loss"
    }

    fn calculate_position(
        &self,
        _series: &PriceSeries,
        position: &Position,
    ) -> Result<Num, TradescoreError> {
        position.profit_loss()
    }

    fn calculate(
        &self,
        series: &PriceSeries,
        record: &TradingRecord,
    ) -> Result<Num, TradescoreError> {
        sum_closed(series, record, |p| self.calculate_position(series, p))
    }

    fn better_than(&self, a: &Num, b: &Num) -> Result<bool, TradescoreError> {
        a.is_greater_than(b)
    }
}
