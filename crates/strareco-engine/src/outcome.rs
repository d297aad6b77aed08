//! Per-candidate decisions and their tallies.

/// What happened to one V0 or cascade candidate.
///
/// Every variant except [`Selected`](CandidateOutcome::Selected) is a skip
/// decision: the candidate contributed to no histogram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Rejected by the source-side prefilter.
    Prefiltered,
    /// The candidate (or a V0 daughter) carries no truth label.
    MissingTruth,
    /// |y| of the truth particle exceeds the rapidity window.
    OutsideRapidity,
    /// The cascade's V0 link row points at no V0 candidate.
    UnresolvedV0Link,
    /// At least one daughter track failed the quality filter.
    FailedTrackQuality,
    /// The candidate passed all quality gates.
    Selected {
        /// QA histograms were filled (the truth species has a QA set).
        qa_filled: bool,
        /// The topological signal-region cuts passed.
        in_signal_region: bool,
        /// A mass histogram was filled.
        mass_filled: bool,
    },
}

/// Counts of [`CandidateOutcome`]s over one or more batches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CandidateTally {
    /// Candidates looked at, aborted ones excluded.
    pub evaluated: u64,
    /// [`CandidateOutcome::Prefiltered`].
    pub prefiltered: u64,
    /// [`CandidateOutcome::MissingTruth`].
    pub missing_truth: u64,
    /// [`CandidateOutcome::OutsideRapidity`].
    pub outside_rapidity: u64,
    /// [`CandidateOutcome::UnresolvedV0Link`].
    pub unresolved_v0_link: u64,
    /// [`CandidateOutcome::FailedTrackQuality`].
    pub failed_track_quality: u64,
    /// [`CandidateOutcome::Selected`].
    pub selected: u64,
    /// Selected candidates that filled QA histograms.
    pub qa_filled: u64,
    /// Selected candidates inside the signal region.
    pub in_signal_region: u64,
    /// Selected candidates that filled a mass histogram.
    pub mass_filled: u64,
    /// Candidates never evaluated because their event was aborted.
    pub aborted: u64,
}

impl CandidateTally {
    /// Count one outcome.
    pub fn record(&mut self, outcome: CandidateOutcome) {
        self.evaluated += 1;
        match outcome {
            CandidateOutcome::Prefiltered => self.prefiltered += 1,
            CandidateOutcome::MissingTruth => self.missing_truth += 1,
            CandidateOutcome::OutsideRapidity => self.outside_rapidity += 1,
            CandidateOutcome::UnresolvedV0Link => self.unresolved_v0_link += 1,
            CandidateOutcome::FailedTrackQuality => self.failed_track_quality += 1,
            CandidateOutcome::Selected {
                qa_filled,
                in_signal_region,
                mass_filled,
            } => {
                self.selected += 1;
                self.qa_filled += u64::from(qa_filled);
                self.in_signal_region += u64::from(in_signal_region);
                self.mass_filled += u64::from(mass_filled);
            }
        }
    }

    /// Candidates that contributed to no histogram.
    pub fn skipped(&self) -> u64 {
        self.evaluated - self.selected
    }

    /// Add another tally.
    pub fn absorb(&mut self, other: &CandidateTally) {
        self.evaluated += other.evaluated;
        self.prefiltered += other.prefiltered;
        self.missing_truth += other.missing_truth;
        self.outside_rapidity += other.outside_rapidity;
        self.unresolved_v0_link += other.unresolved_v0_link;
        self.failed_track_quality += other.failed_track_quality;
        self.selected += other.selected;
        self.qa_filled += other.qa_filled;
        self.in_signal_region += other.in_signal_region;
        self.mass_filled += other.mass_filled;
        self.aborted += other.aborted;
    }
}
