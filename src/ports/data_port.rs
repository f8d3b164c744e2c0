//! Data access port trait for price series and order streams.

use crate::domain::error::TradescoreError;
use crate::domain::num::NumBackend;
use crate::domain::order::OrderRequest;
use crate::domain::price_series::PriceSeries;

pub trait DataPort {
    fn fetch_series(&self, name: &str, backend: NumBackend)
    -> Result<PriceSeries, TradescoreError>;

    fn fetch_orders(
        &self,
        name: &str,
        backend: NumBackend,
    ) -> Result<Vec<OrderRequest>, TradescoreError>;

    /// Names of every order stream available to [`DataPort::fetch_orders`].
    fn list_order_sets(&self) -> Result<Vec<String>, TradescoreError>;
}
