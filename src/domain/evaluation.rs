//! Evaluation driver: order requests in, scored trading record out.
//!
//! EvaluationConfig holds the parameters an evaluation run is built from.

use std::path::PathBuf;

use log::info;

use super::criterion::{AnalysisCriterion, CriterionKind};
use super::error::TradescoreError;
use super::num::{Num, NumBackend};
use super::order::OrderRequest;
use super::price_series::PriceSeries;
use super::trading_record::TradingRecord;

#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    pub data_dir: PathBuf,
    pub series: String,
    pub backend: NumBackend,
    pub criterion: CriterionKind,
    pub parallel: bool,
    pub log_level: log::LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub criterion: &'static str,
    pub record: TradingRecord,
    pub score: Num,
}

/// Resolves each request against `series`, feeds the orders to a fresh
/// record in sequence and scores the result.
pub fn evaluate(
    series: &PriceSeries,
    requests: &[OrderRequest],
    criterion: &dyn AnalysisCriterion,
) -> Result<Evaluation, TradescoreError> {
    let mut record = TradingRecord::new();
    for request in requests {
        record.operate(request.resolve(series)?)?;
    }
    let score = criterion.calculate(series, &record)?;
    info!(
        "{} on {}: {} ({} closed, {} open)",
        criterion.name(),
        series.name(),
        score,
        record.closed_position_count(),
        record.position_count() - record.closed_position_count(),
    );
    Ok(Evaluation {
        criterion: criterion.name(),
        record,
        score,
    })
}
