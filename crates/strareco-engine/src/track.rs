//! Daughter track quality filter.

use strareco_core::Track;

use crate::config::TrackQualityCuts;

/// Accepts tracks with enough inner-tracker clusters and TPC crossed rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackQualityFilter {
    cuts: TrackQualityCuts,
}

impl TrackQualityFilter {
    /// Build a filter from its thresholds.
    pub fn new(cuts: TrackQualityCuts) -> Self {
        Self { cuts }
    }

    /// The active thresholds.
    pub fn cuts(&self) -> TrackQualityCuts {
        self.cuts
    }

    /// Whether `track` meets both minimums.
    pub fn accept(&self, track: &Track) -> bool {
        track.its_clusters >= self.cuts.min_its_clusters
            && track.tpc_crossed_rows >= self.cuts.min_tpc_crossed_rows
    }

    /// Whether every track in `tracks` is accepted.
    pub fn accept_all<'t>(&self, tracks: impl IntoIterator<Item = &'t Track>) -> bool {
        tracks.into_iter().all(|t| self.accept(t))
    }
}
