//! Executed orders and their builders.

use std::fmt;
use std::str::FromStr;

use super::error::TradescoreError;
use super::num::{Num, NumBackend};
use super::price_series::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn opposite(self) -> OrderSide {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => f.write_str("buy"),
            OrderSide::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" => Ok(OrderSide::Buy),
            "sell" | "s" => Ok(OrderSide::Sell),
            other => Err(format!("unknown order side '{other}'")),
        }
    }
}

/// A single trade action. The price is resolved from the series when the
/// order is built and never re-read.
#[derive(Debug, Clone)]
pub struct Order {
    side: OrderSide,
    index: usize,
    amount: Num,
    price: Num,
}

impl Order {
    pub fn build(
        side: OrderSide,
        index: usize,
        series: &PriceSeries,
        amount: Num,
    ) -> Result<Order, TradescoreError> {
        if amount.backend() != series.backend() {
            return Err(TradescoreError::IncompatibleNumericBackend {
                left: series.backend(),
                right: amount.backend(),
            });
        }
        if !amount.is_positive() {
            return Err(TradescoreError::InvalidAmount {
                amount: amount.to_string(),
            });
        }
        let price = series.price_at(index)?;
        Ok(Order {
            side,
            index,
            amount,
            price,
        })
    }

    pub fn build_buy(
        index: usize,
        series: &PriceSeries,
        amount: Num,
    ) -> Result<Order, TradescoreError> {
        Self::build(OrderSide::Buy, index, series, amount)
    }

    pub fn build_sell(
        index: usize,
        series: &PriceSeries,
        amount: Num,
    ) -> Result<Order, TradescoreError> {
        Self::build(OrderSide::Sell, index, series, amount)
    }

    pub fn side(&self) -> OrderSide {
        self.side
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn amount(&self) -> Num {
        self.amount
    }

    pub fn price(&self) -> Num {
        self.price
    }

    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }

    /// price × amount
    pub fn value(&self) -> Result<Num, TradescoreError> {
        self.price.multiply(&self.amount)
    }
}

/// An order as read from input, before its price is resolved against a series.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub side: OrderSide,
    pub index: usize,
    pub amount: Num,
}

impl OrderRequest {
    pub fn parse(
        side: &str,
        index: &str,
        amount: &str,
        backend: NumBackend,
    ) -> Result<OrderRequest, String> {
        let side = side.parse::<OrderSide>()?;
        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid index '{}': {}", index.trim(), e))?;
        let amount = backend.num_of_str(amount).map_err(|e| e.to_string())?;
        Ok(OrderRequest {
            side,
            index,
            amount,
        })
    }

    pub fn resolve(&self, series: &PriceSeries) -> Result<Order, TradescoreError> {
        Order::build(self.side, self.index, series, self.amount)
    }
}
