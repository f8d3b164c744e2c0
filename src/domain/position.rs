//! Round-trip positions built from an entry order and an optional exit.

use super::error::TradescoreError;
use super::num::Num;
use super::order::{Order, OrderSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn of(entry_side: OrderSide) -> Direction {
        match entry_side {
            OrderSide::Buy => Direction::Long,
            OrderSide::Sell => Direction::Short,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Position {
    entry: Order,
    exit: Option<Order>,
}

impl Position {
    pub fn open(entry: Order) -> Self {
        Self { entry, exit: None }
    }

    /// Attaches the exit order. Only the trading record closes positions.
    pub(crate) fn close(&mut self, exit: Order) -> Result<(), TradescoreError> {
        if self.exit.is_some() || exit.side() == self.entry.side() {
            return Err(TradescoreError::InvalidOrderSequence {
                index: exit.index(),
                side: exit.side(),
            });
        }
        if exit.index() < self.entry.index() {
            return Err(TradescoreError::UnorderedOrder {
                index: exit.index(),
                previous: self.entry.index(),
            });
        }
        if !exit.amount().is_equal(&self.entry.amount())? {
            return Err(TradescoreError::AmountMismatch {
                entry: self.entry.amount().to_string(),
                exit: exit.amount().to_string(),
            });
        }
        self.exit = Some(exit);
        Ok(())
    }

    pub fn entry(&self) -> &Order {
        &self.entry
    }

    pub fn exit(&self) -> Option<&Order> {
        self.exit.as_ref()
    }

    pub fn direction(&self) -> Direction {
        Direction::of(self.entry.side())
    }

    pub fn is_long(&self) -> bool {
        self.direction() == Direction::Long
    }

    pub fn is_short(&self) -> bool {
        self.direction() == Direction::Short
    }

    pub fn is_open(&self) -> bool {
        self.exit.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.exit.is_some()
    }

    /// Signed profit/loss: `(exit - entry) * amount`, negated for shorts.
    /// Open positions are worth exactly zero.
    pub fn profit_loss(&self) -> Result<Num, TradescoreError> {
        let Some(exit) = &self.exit else {
            return Ok(self.entry.price().backend().zero());
        };
        let delta = exit
            .price()
            .subtract(&self.entry.price())?
            .multiply(&self.entry.amount())?;
        Ok(match self.direction() {
            Direction::Long => delta,
            Direction::Short => delta.negate(),
        })
    }

    /// Number of bars between entry and exit, inclusive.
    pub fn bar_count(&self) -> Option<usize> {
        self.exit
            .as_ref()
            .map(|exit| exit.index() - self.entry.index() + 1)
    }
}
