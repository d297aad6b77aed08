//! Histogram names and binning of the strangeness QA registry.
//!
//! Every histogram the pipeline fills is declared here, once, by
//! [`strangeness_registry`]. The fill sites look names up through the
//! functions and tables of this module, so a name can never be
//! misspelled at one site only.

use strareco_core::Species;
use strareco_hist::{Axis, HistError, HistogramRegistry};

/// Event-selection counter histogram (3 labelled bins).
pub const EVENT_SELECTION: &str = "hEventSelection";

/// Bin labels of [`EVENT_SELECTION`].
pub const EVENT_SELECTION_LABELS: [&str; 3] = ["All collisions", "Sel8 cut", "posZ cut"];

const PT_TITLE: &str = "p_{T} (GeV/c)";
const MASS_TITLE: &str = "Inv. Mass (GeV/c^{2})";

// ── Per-species names ──────────────────────────────────────────────

/// Generated-spectrum histogram of a species (all simulated collisions).
pub fn generated_histogram(species: Species) -> &'static str {
    match species {
        Species::KaonShort => "hGenK0Short",
        Species::Lambda => "hGenLambda",
        Species::AntiLambda => "hGenAntiLambda",
        Species::XiMinus => "hGenXiMinus",
        Species::XiPlus => "hGenXiPlus",
        Species::OmegaMinus => "hGenOmegaMinus",
        Species::OmegaPlus => "hGenOmegaPlus",
    }
}

/// Generated-spectrum histogram of a species (reconstructed collisions only).
pub fn generated_with_pv_histogram(species: Species) -> &'static str {
    match species {
        Species::KaonShort => "hGenWithPVK0Short",
        Species::Lambda => "hGenWithPVLambda",
        Species::AntiLambda => "hGenWithPVAntiLambda",
        Species::XiMinus => "hGenWithPVXiMinus",
        Species::XiPlus => "hGenWithPVXiPlus",
        Species::OmegaMinus => "hGenWithPVOmegaMinus",
        Species::OmegaPlus => "hGenWithPVOmegaPlus",
    }
}

/// pT versus invariant-mass histogram of a species.
pub fn mass_histogram(species: Species) -> &'static str {
    match species {
        Species::KaonShort => "h2dMassK0Short",
        Species::Lambda => "h2dMassLambda",
        Species::AntiLambda => "h2dMassAntiLambda",
        Species::XiMinus => "h2dMassXiMinus",
        Species::XiPlus => "h2dMassXiPlus",
        Species::OmegaMinus => "h2dMassOmegaMinus",
        Species::OmegaPlus => "h2dMassOmegaPlus",
    }
}

/// Invariant-mass window `(min, max)` in GeV/c² of a species' mass histogram.
pub fn mass_range(species: Species) -> (f64, f64) {
    match species {
        Species::KaonShort => (0.40, 0.60),
        Species::Lambda | Species::AntiLambda => (1.01, 1.21),
        Species::XiMinus | Species::XiPlus => (1.22, 1.42),
        Species::OmegaMinus | Species::OmegaPlus => (1.57, 1.77),
    }
}

// ── QA histogram sets ──────────────────────────────────────────────

/// The five pT-differential QA histograms of a V0 species.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct V0QaHistograms {
    /// Decay radius.
    pub radius: &'static str,
    /// DCA between the daughters.
    pub dca_v0_daughters: &'static str,
    /// Positive daughter DCA to the primary vertex.
    pub dca_pos_to_pv: &'static str,
    /// Negative daughter DCA to the primary vertex.
    pub dca_neg_to_pv: &'static str,
    /// Pointing angle (rad).
    pub pointing_angle: &'static str,
}

impl V0QaHistograms {
    /// All names, in declaration order.
    pub fn names(&self) -> [&'static str; 5] {
        [
            self.radius,
            self.dca_v0_daughters,
            self.dca_pos_to_pv,
            self.dca_neg_to_pv,
            self.pointing_angle,
        ]
    }
}

const K0SHORT_QA: V0QaHistograms = V0QaHistograms {
    radius: "h2dK0ShortQAV0Radius",
    dca_v0_daughters: "h2dK0ShortQADCAV0Dau",
    dca_pos_to_pv: "h2dK0ShortQADCAPosToPV",
    dca_neg_to_pv: "h2dK0ShortQADCANegToPV",
    pointing_angle: "h2dK0ShortQAPointingAngle",
};

const LAMBDA_QA: V0QaHistograms = V0QaHistograms {
    radius: "h2dLambdaQAV0Radius",
    dca_v0_daughters: "h2dLambdaQADCAV0Dau",
    dca_pos_to_pv: "h2dLambdaQADCAPosToPV",
    dca_neg_to_pv: "h2dLambdaQADCANegToPV",
    pointing_angle: "h2dLambdaQAPointingAngle",
};

/// QA histograms of a V0 species; only K0S and Λ have them.
pub fn v0_qa_histograms(species: Species) -> Option<&'static V0QaHistograms> {
    match species {
        Species::KaonShort => Some(&K0SHORT_QA),
        Species::Lambda => Some(&LAMBDA_QA),
        _ => None,
    }
}

/// The nine pT-differential QA histograms of a cascade species.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeQaHistograms {
    /// V0 decay radius.
    pub v0_radius: &'static str,
    /// Cascade decay radius.
    pub cascade_radius: &'static str,
    /// DCA between the V0 daughters.
    pub dca_v0_daughters: &'static str,
    /// DCA between the V0 and the bachelor.
    pub dca_casc_daughters: &'static str,
    /// Positive V0 daughter DCA to the primary vertex.
    pub dca_pos_to_pv: &'static str,
    /// Negative V0 daughter DCA to the primary vertex.
    pub dca_neg_to_pv: &'static str,
    /// Bachelor DCA to the primary vertex.
    pub dca_bach_to_pv: &'static str,
    /// Cascade DCA to the primary vertex.
    pub dca_casc_to_pv: &'static str,
    /// Cascade pointing angle (rad).
    pub pointing_angle: &'static str,
}

impl CascadeQaHistograms {
    /// All names, in declaration order.
    pub fn names(&self) -> [&'static str; 9] {
        [
            self.v0_radius,
            self.cascade_radius,
            self.dca_v0_daughters,
            self.dca_casc_daughters,
            self.dca_pos_to_pv,
            self.dca_neg_to_pv,
            self.dca_bach_to_pv,
            self.dca_casc_to_pv,
            self.pointing_angle,
        ]
    }
}

const XI_MINUS_QA: CascadeQaHistograms = CascadeQaHistograms {
    v0_radius: "h2dXiMinusQAV0Radius",
    cascade_radius: "h2dXiMinusQACascadeRadius",
    dca_v0_daughters: "h2dXiMinusQADCAV0Dau",
    dca_casc_daughters: "h2dXiMinusQADCACascDau",
    dca_pos_to_pv: "h2dXiMinusQADCAPosToPV",
    dca_neg_to_pv: "h2dXiMinusQADCANegToPV",
    dca_bach_to_pv: "h2dXiMinusQADCABachToPV",
    dca_casc_to_pv: "h2dXiMinusQADCACascToPV",
    pointing_angle: "h2dXiMinusQAPointingAngle",
};

const OMEGA_MINUS_QA: CascadeQaHistograms = CascadeQaHistograms {
    v0_radius: "h2dOmegaMinusQAV0Radius",
    cascade_radius: "h2dOmegaMinusQACascadeRadius",
    dca_v0_daughters: "h2dOmegaMinusQADCAV0Dau",
    dca_casc_daughters: "h2dOmegaMinusQADCACascDau",
    dca_pos_to_pv: "h2dOmegaMinusQADCAPosToPV",
    dca_neg_to_pv: "h2dOmegaMinusQADCANegToPV",
    dca_bach_to_pv: "h2dOmegaMinusQADCABachToPV",
    dca_casc_to_pv: "h2dOmegaMinusQADCACascToPV",
    pointing_angle: "h2dOmegaMinusQAPointingAngle",
};

/// QA histograms of a cascade species; only Ξ− and Ω− have them.
pub fn cascade_qa_histograms(species: Species) -> Option<&'static CascadeQaHistograms> {
    match species {
        Species::XiMinus => Some(&XI_MINUS_QA),
        Species::OmegaMinus => Some(&OMEGA_MINUS_QA),
        _ => None,
    }
}

// ── Registry ───────────────────────────────────────────────────────

fn pt_axis(bins: usize) -> Result<Axis, HistError> {
    Ok(Axis::new(bins, 0.0, 10.0)?.with_title(PT_TITLE))
}

/// Build a registry with every QA histogram declared and empty.
///
/// Declaration order: generated spectra, reconstructible spectra, mass
/// histograms, V0 QA, cascade QA, event selection.
pub fn strangeness_registry() -> Result<HistogramRegistry, HistError> {
    let mut registry = HistogramRegistry::new("strangeness-qa");

    for species in Species::ALL {
        registry.add_1d(generated_histogram(species), pt_axis(100)?)?;
    }
    for species in Species::ALL {
        registry.add_1d(generated_with_pv_histogram(species), pt_axis(100)?)?;
    }
    for species in Species::ALL {
        let (lo, hi) = mass_range(species);
        let mass = Axis::new(400, lo, hi)?.with_title(MASS_TITLE);
        registry.add_2d(mass_histogram(species), pt_axis(100)?, mass)?;
    }

    let radius = Axis::new(200, 0.0, 50.0)?;
    let dca_daughters = Axis::new(100, 0.0, 2.0)?;
    let dca_to_pv = Axis::new(200, -2.0, 2.0)?;
    let pointing = Axis::new(200, 0.0, 1.0)?;

    for qa in [&K0SHORT_QA, &LAMBDA_QA] {
        registry.add_2d(qa.radius, pt_axis(10)?, radius.clone())?;
        registry.add_2d(qa.dca_v0_daughters, pt_axis(10)?, dca_daughters.clone())?;
        registry.add_2d(qa.dca_pos_to_pv, pt_axis(10)?, dca_to_pv.clone())?;
        registry.add_2d(qa.dca_neg_to_pv, pt_axis(10)?, dca_to_pv.clone())?;
        registry.add_2d(qa.pointing_angle, pt_axis(10)?, pointing.clone())?;
    }
    for qa in [&XI_MINUS_QA, &OMEGA_MINUS_QA] {
        registry.add_2d(qa.v0_radius, pt_axis(10)?, radius.clone())?;
        registry.add_2d(qa.cascade_radius, pt_axis(10)?, radius.clone())?;
        registry.add_2d(qa.dca_v0_daughters, pt_axis(10)?, dca_daughters.clone())?;
        registry.add_2d(qa.dca_casc_daughters, pt_axis(10)?, dca_daughters.clone())?;
        registry.add_2d(qa.dca_pos_to_pv, pt_axis(10)?, dca_to_pv.clone())?;
        registry.add_2d(qa.dca_neg_to_pv, pt_axis(10)?, dca_to_pv.clone())?;
        registry.add_2d(qa.dca_bach_to_pv, pt_axis(10)?, dca_to_pv.clone())?;
        registry.add_2d(qa.dca_casc_to_pv, pt_axis(10)?, dca_to_pv.clone())?;
        registry.add_2d(qa.pointing_angle, pt_axis(10)?, pointing.clone())?;
    }

    let selection = Axis::new(3, -0.5, 2.5)?.with_labels(EVENT_SELECTION_LABELS)?;
    registry.add_1d(EVENT_SELECTION, selection)?;

    Ok(registry)
}
