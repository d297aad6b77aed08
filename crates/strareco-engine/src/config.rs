//! QA configuration, validation, and error types.
//!
//! [`QaConfig`] carries every selection threshold the pipeline applies.
//! Defaults reproduce the standard strangeness QA settings. A config can
//! be built in code (struct update syntax over `Default`) or loaded from
//! TOML; either way [`validate()`](QaConfig::validate) is checked before
//! a [`StrangenessQa`](crate::analysis::StrangenessQa) accepts it.

use std::error::Error;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ── V0Cuts ─────────────────────────────────────────────────────────

/// Topological selections on V0 candidates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct V0Cuts {
    /// Minimum cosine of the V0 pointing angle. Default: 0.95.
    pub cospa: f64,
    /// Maximum DCA between the V0 daughters (cm). Default: 1.0.
    pub dca_v0_daughters: f64,
    /// Minimum |DCA| of the positive daughter to the PV (cm). Default: 0.1.
    pub dca_pos_to_pv: f64,
    /// Minimum |DCA| of the negative daughter to the PV (cm). Default: 0.1.
    pub dca_neg_to_pv: f64,
    /// Minimum transverse decay radius (cm). Default: 0.9.
    pub radius: f64,
}

impl Default for V0Cuts {
    fn default() -> Self {
        Self {
            cospa: 0.95,
            dca_v0_daughters: 1.0,
            dca_pos_to_pv: 0.1,
            dca_neg_to_pv: 0.1,
            radius: 0.9,
        }
    }
}

// ── CascadeCuts ────────────────────────────────────────────────────

/// Topological selections on cascade candidates.
///
/// The V0 inside a cascade is additionally subject to [`V0Cuts`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CascadeCuts {
    /// Minimum cosine of the cascade pointing angle. Default: 0.95.
    pub cospa: f64,
    /// Maximum DCA between the V0 and the bachelor (cm). Default: 1.0.
    pub dca_casc_daughters: f64,
    /// Minimum |DCA| of the bachelor to the PV (cm). Default: 0.1.
    pub dca_bach_to_pv: f64,
    /// Minimum transverse cascade decay radius (cm). Default: 0.5.
    pub radius: f64,
    /// Half-width of the Λ mass window for the cascade V0 (GeV/c²). Default: 0.01.
    ///
    /// Validated, but no selection uses it.
    pub v0_mass_window: f64,
    /// Minimum DCA of the cascade V0 to the PV (cm). Default: 0.01.
    ///
    /// Validated, but no selection uses it.
    pub min_dca_v0_to_pv: f64,
}

impl Default for CascadeCuts {
    fn default() -> Self {
        Self {
            cospa: 0.95,
            dca_casc_daughters: 1.0,
            dca_bach_to_pv: 0.1,
            radius: 0.5,
            v0_mass_window: 0.01,
            min_dca_v0_to_pv: 0.01,
        }
    }
}

// ── EventSelectionConfig ───────────────────────────────────────────

/// Event-level gates applied before candidate evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventSelectionConfig {
    /// Require the standard event-selection flag. Default: true.
    pub require_sel8: bool,
    /// Require |z| of the primary vertex within `max_vertex_z`. Default: true.
    pub require_vertex_z: bool,
    /// Maximum |z| of the primary vertex (cm). Default: 10.0.
    pub max_vertex_z: f64,
}

impl Default for EventSelectionConfig {
    fn default() -> Self {
        Self {
            require_sel8: true,
            require_vertex_z: true,
            max_vertex_z: 10.0,
        }
    }
}

// ── TrackQualityCuts ───────────────────────────────────────────────

/// Minimum detector-hit requirements on daughter tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackQualityCuts {
    /// Minimum inner tracker clusters. Default: 4.
    pub min_its_clusters: u8,
    /// Minimum crossed TPC rows. Default: 70.
    pub min_tpc_crossed_rows: u8,
}

impl Default for TrackQualityCuts {
    fn default() -> Self {
        Self {
            min_its_clusters: 4,
            min_tpc_crossed_rows: 70,
        }
    }
}

// ── MissingTruthPolicy ─────────────────────────────────────────────

/// What a cascade without a truth label does to the rest of its event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTruthPolicy {
    /// Skip the candidate and continue with the next one.
    #[default]
    Skip,
    /// Stop evaluating the remaining cascades of the event.
    ///
    /// Reproduces the historical behaviour of the task this pipeline
    /// replaces, for bit-for-bit comparisons.
    AbortEvent,
}

// ── ProcessSwitches ────────────────────────────────────────────────

/// Enables the independent processing passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessSwitches {
    /// Event selection and V0/cascade candidate evaluation.
    pub reconstructed: bool,
    /// Generated spectra restricted to reconstructed collisions.
    pub generated_reconstructible: bool,
    /// Generated spectra over all simulated collisions.
    pub pure_generated: bool,
}

impl Default for ProcessSwitches {
    fn default() -> Self {
        Self {
            reconstructed: true,
            generated_reconstructible: true,
            pure_generated: true,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors from loading or validating a [`QaConfig`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        /// Path that was read.
        path: String,
        /// Description of the I/O failure.
        reason: String,
    },
    /// The TOML document is malformed or has unknown keys.
    Parse {
        /// Parser message.
        reason: String,
    },
    /// A numeric setting is NaN or infinite.
    NonFinite {
        /// Dotted name of the setting.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A distance, radius or window is negative.
    Negative {
        /// Dotted name of the setting.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A pointing-angle cosine lies outside `[-1, 1]`.
    CosineOutOfRange {
        /// Dotted name of the setting.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A bound that must be strictly positive is zero or negative.
    NotPositive {
        /// Dotted name of the setting.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "cannot read config '{path}': {reason}"),
            Self::Parse { reason } => write!(f, "invalid config: {reason}"),
            Self::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            Self::CosineOutOfRange { field, value } => {
                write!(f, "{field} must be within [-1, 1], got {value}")
            }
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── QaConfig ───────────────────────────────────────────────────────

/// Complete configuration of the strangeness QA pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QaConfig {
    /// V0 topological selections.
    pub v0: V0Cuts,
    /// Cascade topological selections.
    pub cascade: CascadeCuts,
    /// Event selection gates.
    pub event: EventSelectionConfig,
    /// Daughter track quality requirements.
    pub tracks: TrackQualityCuts,
    /// Maximum |y| of the truth particle. Default: 0.5.
    ///
    /// Candidates are rejected when |y| exceeds it; generated particles
    /// are counted when |y| is strictly below it.
    pub max_rapidity: f64,
    /// Treatment of cascades without a truth label. Default: skip.
    pub missing_cascade_truth: MissingTruthPolicy,
    /// Re-apply the source-side candidate prefilter inside the pipeline.
    ///
    /// Off by default: the table source is expected to deliver
    /// prefiltered candidates. See [`Prefilter`](crate::prefilter::Prefilter).
    pub apply_prefilter: bool,
    /// Processing passes.
    pub process: ProcessSwitches,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            v0: V0Cuts::default(),
            cascade: CascadeCuts::default(),
            event: EventSelectionConfig::default(),
            tracks: TrackQualityCuts::default(),
            max_rapidity: 0.5,
            missing_cascade_truth: MissingTruthPolicy::Skip,
            apply_prefilter: false,
            process: ProcessSwitches::default(),
        }
    }
}

impl QaConfig {
    /// Parse a TOML document and validate it. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load a TOML file, falling back to defaults if it is unusable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("using default QA config ({}): {}", path.display(), e);
            Self::default()
        })
    }

    /// Serialize to a pretty TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Validate all numeric settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Cosines.
        check_cosine("v0.cospa", self.v0.cospa)?;
        check_cosine("cascade.cospa", self.cascade.cospa)?;

        // 2. Distances, radii and windows.
        let non_negative = [
            ("v0.dca_v0_daughters", self.v0.dca_v0_daughters),
            ("v0.dca_pos_to_pv", self.v0.dca_pos_to_pv),
            ("v0.dca_neg_to_pv", self.v0.dca_neg_to_pv),
            ("v0.radius", self.v0.radius),
            ("cascade.dca_casc_daughters", self.cascade.dca_casc_daughters),
            ("cascade.dca_bach_to_pv", self.cascade.dca_bach_to_pv),
            ("cascade.radius", self.cascade.radius),
            ("cascade.v0_mass_window", self.cascade.v0_mass_window),
            ("cascade.min_dca_v0_to_pv", self.cascade.min_dca_v0_to_pv),
        ];
        for (field, value) in non_negative {
            check_non_negative(field, value)?;
        }

        // 3. Acceptance bounds.
        check_positive("max_rapidity", self.max_rapidity)?;
        check_positive("event.max_vertex_z", self.event.max_vertex_z)?;

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn check_cosine(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if !(-1.0..=1.0).contains(&value) {
        return Err(ConfigError::CosineOutOfRange { field, value });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}
