//! Count of profitable closed positions.

use super::{AnalysisCriterion, sum_closed};
use crate::domain::error::TradescoreError;
use crate::domain::num::Num;
use crate::domain::position::Position;
use crate::domain::price_series::PriceSeries;
use crate::domain::trading_record::TradingRecord;

/// Number of closed positions with a strictly positive profit/loss.
/// Break-even positions do not count. More is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinningPositionsCriterion;

impl AnalysisCriterion for WinningPositionsCriterion {
    fn name(&self) -> &'static str {
        "winning_positions"
    }

    fn calculate_position(
        &self,
        series: &PriceSeries,
        position: &Position,
    ) -> Result<Num, TradescoreError> {
        let won = position.is_closed() && position.profit_loss()?.is_positive();
        Ok(series.backend().num_of_i64(i64::from(won)))
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
