//! CSV file data adapter.
//!
//! Layout under the base directory:
//! - `<series>.csv` with a `close` column and an optional `date` column
//!   (`YYYY-MM-DD`); other columns such as open/high/low/volume are ignored.
//! - `<name>.orders.csv` with `side,index,amount` columns.

use crate::domain::error::TradescoreError;
use crate::domain::num::NumBackend;
use crate::domain::order::OrderRequest;
use crate::domain::price_series::{PriceBar, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const ORDERS_SUFFIX: &str = ".orders.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn series_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", name))
    }

    fn orders_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}{}", name, ORDERS_SUFFIX))
    }

    fn reader(path: &Path) -> Result<csv::Reader<fs::File>, TradescoreError> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| load_error(path, e))
    }
}

fn load_error(path: &Path, reason: impl std::fmt::Display) -> TradescoreError {
    TradescoreError::DataLoad {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn required_column(
    path: &Path,
    headers: &csv::StringRecord,
    name: &str,
) -> Result<usize, TradescoreError> {
    column(headers, name).ok_or_else(|| load_error(path, format!("missing {} column", name)))
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        name: &str,
        backend: NumBackend,
    ) -> Result<PriceSeries, TradescoreError> {
        let path = self.series_path(name);
        let mut rdr = Self::reader(&path)?;
        let headers = rdr.headers().map_err(|e| load_error(&path, e))?.clone();
        let close_col = required_column(&path, &headers, "close")?;
        let date_col = column(&headers, "date");

        let mut series = PriceSeries::new(name, backend);
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| load_error(&path, e))?;

            let close_str = record
                .get(close_col)
                .ok_or_else(|| load_error(&path, format!("row {}: missing close value", row + 1)))?;
            let close = backend
                .num_of_str(close_str)
                .map_err(|e| load_error(&path, format!("row {}: {}", row + 1, e)))?;

            let date = match date_col.and_then(|c| record.get(c)) {
                Some(s) if !s.is_empty() => Some(
                    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                        load_error(&path, format!("row {}: invalid date format: {}", row + 1, e))
                    })?,
                ),
                _ => None,
            };

            series.push(PriceBar { date, close })?;
        }

        debug!("loaded {} bars from {}", series.len(), path.display());
        Ok(series)
    }

    fn fetch_orders(
        &self,
        name: &str,
        backend: NumBackend,
    ) -> Result<Vec<OrderRequest>, TradescoreError> {
        let path = self.orders_path(name);
        let mut rdr = Self::reader(&path)?;
        let headers = rdr.headers().map_err(|e| load_error(&path, e))?.clone();
        let side_col = required_column(&path, &headers, "side")?;
        let index_col = required_column(&path, &headers, "index")?;
        let amount_col = required_column(&path, &headers, "amount")?;

        let mut requests = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| load_error(&path, e))?;
            let field = |col: usize| record.get(col).unwrap_or_default();
            let request = OrderRequest::parse(
                field(side_col),
                field(index_col),
                field(amount_col),
                backend,
            )
            .map_err(|reason| load_error(&path, format!("row {}: {}", row + 1, reason)))?;
            requests.push(request);
        }

        debug!("loaded {} orders from {}", requests.len(), path.display());
        Ok(requests)
    }

    fn list_order_sets(&self) -> Result<Vec<String>, TradescoreError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| load_error(&self.base_path, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| load_error(&self.base_path, e))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(name) = file_name.strip_suffix(ORDERS_SUFFIX) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}
