//! Bounded, most-recent-first trade history.

use std::collections::VecDeque;

use crate::domain::TradeRecord;

#[derive(Debug, Clone)]
pub struct TradeHistory {
    records: VecDeque<TradeRecord>,
    limit: usize,
}

impl TradeHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    /// Puts `record` at the front and evicts from the back past the limit.
    pub fn push(&mut self, record: TradeRecord) {
        self.records.push_front(record);
        while self.records.len() > self.limit {
            self.records.pop_back();
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<TradeRecord> {
        self.records.iter().cloned().collect()
    }
}
