//! Order-restoring result collection
//!
//! Workers finish in whatever order the network allows. The aggregator
//! writes every result into the slot named by its position, so the final
//! vector is in input order no matter how results arrived.

use crate::crawler::job::JobResult;
use thiserror::Error;
use tokio::sync::mpsc;

/// Violations of the one-result-per-job rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("result position {position} is outside the batch of {len} jobs")]
    OutOfRange { position: usize, len: usize },

    #[error("duplicate result for position {0}")]
    Duplicate(usize),

    #[error("missing results for {count} job(s), first at position {first}")]
    Missing { first: usize, count: usize },
}

/// Collects exactly one result per job into a pre-sized slot vector
#[derive(Debug)]
pub struct ResultAggregator {
    slots: Vec<Option<JobResult>>,
    received: usize,
}

impl ResultAggregator {
    /// Creates an aggregator expecting `len` results
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            received: 0,
        }
    }

    /// Stores a result at its position
    ///
    /// Each slot is written at most once; a second write or a position past
    /// the end of the batch is an error and leaves the aggregator unchanged.
    pub fn insert(&mut self, result: JobResult) -> Result<(), AggregateError> {
        let len = self.slots.len();
        let position = result.position;
        let slot = self
            .slots
            .get_mut(position)
            .ok_or(AggregateError::OutOfRange { position, len })?;

        if slot.is_some() {
            return Err(AggregateError::Duplicate(position));
        }

        *slot = Some(result);
        self.received += 1;
        Ok(())
    }

    pub fn received(&self) -> usize {
        self.received
    }

    pub fn is_complete(&self) -> bool {
        self.received == self.slots.len()
    }

    /// Returns the results in input order
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<JobResult>)` - One result per job, ordered by position
    /// * `Err(AggregateError::Missing)` - Some positions never received a result
    pub fn finish(self) -> Result<Vec<JobResult>, AggregateError> {
        if !self.is_complete() {
            let first = self
                .slots
                .iter()
                .position(Option::is_none)
                .unwrap_or_default();
            return Err(AggregateError::Missing {
                first,
                count: self.slots.len() - self.received,
            });
        }

        Ok(self.slots.into_iter().flatten().collect())
    }

    /// Drains `receiver` until `len` results arrived or every sender is gone
    ///
    /// Senders disappearing early (a worker panicked) surfaces as
    /// [`AggregateError::Missing`] instead of waiting forever.
    pub async fn collect(
        mut receiver: mpsc::Receiver<JobResult>,
        len: usize,
    ) -> Result<Vec<JobResult>, AggregateError> {
        let mut aggregator = Self::new(len);

        while !aggregator.is_complete() {
            match receiver.recv().await {
                Some(result) => aggregator.insert(result)?,
                None => break,
            }
        }

        aggregator.finish()
    }
}
