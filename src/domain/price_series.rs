//! Indexed, append-only price series.

use chrono::NaiveDate;

use super::error::TradescoreError;
use super::num::{Num, NumBackend};

#[derive(Debug, Clone)]
pub struct PriceBar {
    pub date: Option<NaiveDate>,
    pub close: Num,
}

impl PriceBar {
    pub fn new(close: Num) -> Self {
        Self { date: None, close }
    }

    pub fn dated(date: NaiveDate, close: Num) -> Self {
        Self {
            date: Some(date),
            close,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceSeries {
    name: String,
    backend: NumBackend,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(name: impl Into<String>, backend: NumBackend) -> Self {
        Self {
            name: name.into(),
            backend,
            bars: Vec::new(),
        }
    }

    /// Builds an undated series from closing prices.
    pub fn from_closes(backend: NumBackend, closes: &[f64]) -> Result<Self, TradescoreError> {
        let mut series = Self::new("closes", backend);
        for &close in closes {
            series.push(PriceBar::new(backend.num_of_f64(close)?))?;
        }
        Ok(series)
    }

    pub fn push(&mut self, bar: PriceBar) -> Result<(), TradescoreError> {
        let index = self.bars.len();
        if bar.close.backend() != self.backend {
            return Err(TradescoreError::IncompatibleNumericBackend {
                left: self.backend,
                right: bar.close.backend(),
            });
        }
        if bar.close.is_negative() {
            return Err(TradescoreError::InvalidPrice {
                index,
                price: bar.close.to_string(),
            });
        }
        let previous_date = self.bars.iter().rev().find_map(|b| b.date);
        if let (Some(prev), Some(date)) = (previous_date, bar.date) {
            if date < prev {
                return Err(TradescoreError::UnorderedBar { index });
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    pub fn price_at(&self, index: usize) -> Result<Num, TradescoreError> {
        self.bar(index).map(|b| b.close)
    }

    pub fn bar(&self, index: usize) -> Result<&PriceBar, TradescoreError> {
        self.bars.get(index).ok_or(TradescoreError::IndexOutOfRange {
            index,
            len: self.bars.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn backend(&self) -> NumBackend {
        self.backend
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }
}
