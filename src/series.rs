use log::{debug, error};

use crate::prelude::{Epoch, RawRecord, StateVector};

#[cfg(feature = "serde")]
use serde::Serialize;

/// [StateVectorSeries] is the outcome of one ingestion cycle:
/// [StateVector]s sorted by ascending [Epoch]. It is never modified
/// once built: a refresh produces a brand new series.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StateVectorSeries {
    vectors: Vec<StateVector>,
}

/// Overview of one [StateVectorSeries]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SeriesSummary {
    /// Number of state vectors
    pub count: usize,
    /// Earliest [Epoch]
    pub first: Epoch,
    /// Latest [Epoch]
    pub last: Epoch,
    /// Mean speed over the series [km/s]
    pub mean_speed_km_s: f64,
}

impl StateVectorSeries {
    /// Builds a new [StateVectorSeries]. [StateVector]s are sorted
    /// by [Epoch], samples sharing the same [Epoch] keep their original order.
    pub fn new(mut vectors: Vec<StateVector>) -> Self {
        vectors.sort_by(|a, b| a.epoch.cmp(&b.epoch));
        Self { vectors }
    }

    /// Builds a new [StateVectorSeries] from the ingestion layer.
    /// Each record is interpreted on its own: invalid records are
    /// logged and dropped, without impacting the other ones.
    pub fn from_raw(records: &[RawRecord]) -> Self {
        let vectors = records
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| match StateVector::from_raw(raw) {
                Ok(sv) => Some(sv),
                Err(e) => {
                    error!("record #{} (\"{}\") dropped: {}", index, raw.epoch, e);
                    None
                },
            })
            .collect::<Vec<_>>();

        debug!("{}/{} valid state vectors", vectors.len(), records.len());
        Self::new(vectors)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateVector> {
        self.vectors.iter()
    }

    /// Earliest [StateVector]
    pub fn first(&self) -> Option<&StateVector> {
        self.vectors.first()
    }

    /// Latest [StateVector]
    pub fn last(&self) -> Option<&StateVector> {
        self.vectors.last()
    }

    /// Index of the first [StateVector] not prior to [Epoch]
    fn lower_bound(&self, epoch: Epoch) -> usize {
        self.vectors.partition_point(|sv| sv.epoch < epoch)
    }

    /// Returns [StateVector] sampled at this very [Epoch].
    /// Binary search: O(log n). When the feed repeated this [Epoch],
    /// the first occurrence is returned.
    pub fn exact(&self, epoch: Epoch) -> Option<&StateVector> {
        self.vectors
            .get(self.lower_bound(epoch))
            .filter(|sv| sv.epoch == epoch)
    }

    /// Returns up to `limit` [StateVector]s, starting at `offset`.
    /// Out of range requests return an empty slice.
    pub fn range(&self, offset: usize, limit: usize) -> &[StateVector] {
        let start = offset.min(self.vectors.len());
        let end = start.saturating_add(limit).min(self.vectors.len());
        &self.vectors[start..end]
    }

    /// Returns the [StateVector] closest in time to `target`.
    /// Equidistant samples resolve to the earliest one.
    /// Returns None only on empty series.
    pub fn nearest(&self, target: Epoch) -> Option<&StateVector> {
        let index = self.lower_bound(target);

        let before = index.checked_sub(1).and_then(|i| self.vectors.get(i));
        let after = self.vectors.get(index);

        let closest = match (before, after) {
            (Some(before), Some(after)) => {
                if target - before.epoch <= after.epoch - target {
                    before
                } else {
                    after
                }
            },
            (Some(before), None) => before,
            (None, Some(after)) => after,
            (None, None) => return None,
        };

        // first occurrence of a repeated epoch
        self.exact(closest.epoch)
    }

    /// Returns [SeriesSummary], None on empty series.
    pub fn summary(&self) -> Option<SeriesSummary> {
        let (first, last) = (self.first()?, self.last()?);
        let mean_speed_km_s =
            self.iter().map(|sv| sv.speed_km_s()).sum::<f64>() / self.len() as f64;
        Some(SeriesSummary {
            count: self.len(),
            first: first.epoch,
            last: last.epoch,
            mean_speed_km_s,
        })
    }
}
