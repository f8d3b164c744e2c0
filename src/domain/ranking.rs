//! Ranks candidate order streams by a criterion.
//!
//! Each candidate is evaluated against the same read-only series with its own
//! trading record, so candidates can be scored on the rayon pool without any
//! shared mutable state.

use log::info;
use rayon::prelude::*;

use super::criterion::AnalysisCriterion;
use super::error::TradescoreError;
use super::evaluation::{Evaluation, evaluate};
use super::num::Num;
use super::order::OrderRequest;
use super::price_series::PriceSeries;

#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub requests: Vec<OrderRequest>,
}

#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub name: String,
    pub score: Num,
    pub closed_positions: usize,
}

/// Scores every candidate and returns them best first. Candidates whose
/// scores tie keep their input order. The first failing candidate fails the
/// whole ranking.
pub fn rank(
    criterion: &dyn AnalysisCriterion,
    series: &PriceSeries,
    candidates: &[Candidate],
    parallel: bool,
) -> Result<Vec<RankedCandidate>, TradescoreError> {
    let evaluate_one = |candidate: &Candidate| -> Result<RankedCandidate, TradescoreError> {
        let Evaluation { record, score, .. } = evaluate(series, &candidate.requests, criterion)?;
        Ok(RankedCandidate {
            name: candidate.name.clone(),
            score,
            closed_positions: record.closed_position_count(),
        })
    };

    let scored: Vec<RankedCandidate> = if parallel {
        candidates
            .par_iter()
            .map(evaluate_one)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        candidates
            .iter()
            .map(evaluate_one)
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut ranked: Vec<RankedCandidate> = Vec::with_capacity(scored.len());
    for candidate in scored {
        let mut slot = ranked.len();
        for (i, existing) in ranked.iter().enumerate() {
            if criterion.better_than(&candidate.score, &existing.score)? {
                slot = i;
                break;
            }
        }
        ranked.insert(slot, candidate);
    }

    info!(
        "ranked {} candidates on {} by {}",
        ranked.len(),
        series.name(),
        criterion.name()
    );
    Ok(ranked)
}
