//! Average profit/loss per closed position.

use super::{AnalysisCriterion, ProfitLossCriterion};
use crate::domain::error::TradescoreError;
use crate::domain::num::Num;
use crate::domain::position::Position;
use crate::domain::price_series::PriceSeries;
use crate::domain::trading_record::TradingRecord;

/// Total profit/loss divided by the number of closed positions, zero when
/// nothing has closed. Higher is better.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageProfitLossCriterion;

impl AnalysisCriterion for AverageProfitLossCriterion {
    fn name(&self) -> &'static str {
        "average_profit_loss"
    }

    fn calculate_position(
        &self,
        series: &PriceSeries,
        position: &Position,
    ) -> Result<Num, TradescoreError> {
        ProfitLossCriterion.calculate_position(series, position)
    }

    fn calculate(
        &self,
        series: &PriceSeries,
        record: &TradingRecord,
    ) -> Result<Num, TradescoreError> {
        let closed = record.closed_position_count();
        if closed == 0 {
            return Ok(series.backend().zero());
        }
        let total = ProfitLossCriterion.calculate(series, record)?;
        total.divide(&series.backend().num_of_i64(closed as i64))
    }

    fn better_than(&self, a: &Num, b: &Num) -> Result<bool, TradescoreError> {
        a.is_greater_than(b)
    }
}
