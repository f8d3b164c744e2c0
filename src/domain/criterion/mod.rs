//! Analysis criteria: score a trading record and rank two scores.
//!
//! A driver only relies on [`AnalysisCriterion`]; [`CriterionKind`] is the set
//! of criteria that can be selected by name from configuration or the CLI.

pub mod average_profit_loss;
pub mod number_of_positions;
pub mod profit_loss;
pub mod winning_positions;

use std::fmt;
use std::str::FromStr;

use super::error::TradescoreError;
use super::num::Num;
use super::position::Position;
use super::price_series::PriceSeries;
use super::trading_record::TradingRecord;

pub use average_profit_loss::AverageProfitLossCriterion;
pub use number_of_positions::NumberOfPositionsCriterion;
pub use profit_loss::ProfitLossCriterion;
pub use winning_positions::WinningPositionsCriterion;

/// A scoring function over a trading record plus the order used to rank
/// two scores. Implementations hold no mutable state, so one instance can be
/// shared across threads evaluating independent records.
pub trait AnalysisCriterion: Send + Sync {
    fn name(&self) -> &'static str;

    /// Score of a single position.
    fn calculate_position(
        &self,
        series: &PriceSeries,
        position: &Position,
    ) -> Result<Num, TradescoreError>;

    /// Score of a whole record. A record without closed positions scores zero.
    fn calculate(
        &self,
        series: &PriceSeries,
        record: &TradingRecord,
    ) -> Result<Num, TradescoreError>;

    /// Whether `a` ranks strictly ahead of `b`. Equal scores are never better.
    fn better_than(&self, a: &Num, b: &Num) -> Result<bool, TradescoreError>;
}

/// Sums `f` over the closed positions of `record`, in record order,
/// starting from the series' zero.
pub(crate) fn sum_closed<F>(
    series: &PriceSeries,
    record: &TradingRecord,
    mut f: F,
) -> Result<Num, TradescoreError>
where
    F: FnMut(&Position) -> Result<Num, TradescoreError>,
{
    record
        .closed_positions()
        .try_fold(series.backend().zero(), |acc, position| acc.add(&f(position)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    ProfitLoss,
    NumberOfPositions,
    WinningPositions,
    AverageProfitLoss,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 4] = [
        CriterionKind::ProfitLoss,
        CriterionKind::NumberOfPositions,
        CriterionKind::WinningPositions,
        CriterionKind::AverageProfitLoss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CriterionKind::ProfitLoss => "profit_loss",
            CriterionKind::NumberOfPositions => "number_of_positions",
            CriterionKind::WinningPositions => "winning_positions",
            CriterionKind::AverageProfitLoss => "average_profit_loss",
        }
    }

    pub fn build(self) -> Box<dyn AnalysisCriterion> {
        match self {
            CriterionKind::ProfitLoss => Box::new(ProfitLossCriterion),
            CriterionKind::NumberOfPositions => Box::new(NumberOfPositionsCriterion),
            CriterionKind::WinningPositions => Box::new(WinningPositionsCriterion),
            CriterionKind::AverageProfitLoss => Box::new(AverageProfitLossCriterion),
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CriterionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        CriterionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = CriterionKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown criterion '{}' (expected one of {})", s.trim(), known.join(", "))
            })
    }
}
