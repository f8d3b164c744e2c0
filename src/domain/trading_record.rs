//! Trading record: pairs a flat order stream into positions.
//!
//! The record is a two-state machine. With no open position, an incoming
//! order opens one. With a position open, an order on the opposite side
//! closes it and an order on the same side is rejected. Positions live in an
//! arena and the open one is referenced by its arena index, so the history
//! and the current position never alias.

use log::{debug, trace};

use super::error::TradescoreError;
use super::order::Order;
use super::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    NoOpenPosition,
    OpenPosition(usize),
}

#[derive(Debug, Clone)]
pub struct TradingRecord {
    positions: Vec<Position>,
    state: RecordState,
    last_order_index: Option<usize>,
}

impl Default for TradingRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl TradingRecord {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            state: RecordState::NoOpenPosition,
            last_order_index: None,
        }
    }

    pub fn from_orders<I>(orders: I) -> Result<Self, TradescoreError>
    where
        I: IntoIterator<Item = Order>,
    {
        let mut record = Self::new();
        for order in orders {
            record.operate(order)?;
        }
        Ok(record)
    }

    /// Consumes the next order. On error the record is left unchanged.
    pub fn operate(&mut self, order: Order) -> Result<(), TradescoreError> {
        if let Some(previous) = self.last_order_index {
            if order.index() < previous {
                return Err(TradescoreError::UnorderedOrder {
                    index: order.index(),
                    previous,
                });
            }
        }
        trace!("order {} at index {}", order.side(), order.index());

        let index = order.index();
        match self.state {
            RecordState::NoOpenPosition => {
                self.positions.push(Position::open(order));
                let slot = self.positions.len() - 1;
                debug!(
                    "opened {:?} position #{} at index {}",
                    self.positions[slot].direction(),
                    slot,
                    index
                );
                self.state = RecordState::OpenPosition(slot);
            }
            RecordState::OpenPosition(slot) => {
                let position = &mut self.positions[slot];
                if order.side() == position.entry().side() {
                    return Err(TradescoreError::InvalidOrderSequence {
                        index,
                        side: order.side(),
                    });
                }
                position.close(order)?;
                debug!("closed position #{} at index {}", slot, index);
                self.state = RecordState::NoOpenPosition;
            }
        }
        self.last_order_index = Some(index);
        Ok(())
    }

    /// Every position in record order, including a trailing open one.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn closed_positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().filter(|p| p.is_closed())
    }

    pub fn current_position(&self) -> Option<&Position> {
        match self.state {
            RecordState::NoOpenPosition => None,
            RecordState::OpenPosition(slot) => self.positions.get(slot),
        }
    }

    pub fn last_order(&self) -> Option<&Order> {
        let last = self.positions.last()?;
        Some(last.exit().unwrap_or(last.entry()))
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn closed_position_count(&self) -> usize {
        self.closed_positions().count()
    }

    /// True when no position is open.
    pub fn is_closed(&self) -> bool {
        self.state == RecordState::NoOpenPosition
    }
}
