//! The closed set of strange hadron species studied by the QA pipeline.
//!
//! Truth particles carry a signed PDG code. [`Species::from_pdg`] is the
//! single place where PDG codes are interpreted; everything downstream
//! matches on [`Species`] so that adding or removing a species is checked
//! for exhaustiveness by the compiler.

use std::fmt;

/// Topology of the decay a species is reconstructed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpeciesFamily {
    /// Two-prong neutral decay (K0S, Λ, anti-Λ).
    V0,
    /// V0 plus a charged bachelor (Ξ±, Ω±).
    Cascade,
}

/// A strange hadron species with a dedicated set of histograms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// K0S (PDG 310).
    KaonShort,
    /// Λ (PDG 3122).
    Lambda,
    /// anti-Λ (PDG −3122).
    AntiLambda,
    /// Ξ− (PDG 3312).
    XiMinus,
    /// Ξ+ (PDG −3312).
    XiPlus,
    /// Ω− (PDG 3334).
    OmegaMinus,
    /// Ω+ (PDG −3334).
    OmegaPlus,
}

/// `(species, pdg code, histogram family name)` for every species.
const SPECIES_TABLE: [(Species, i32, &str); 7] = [
    (Species::KaonShort, 310, "K0Short"),
    (Species::Lambda, 3122, "Lambda"),
    (Species::AntiLambda, -3122, "AntiLambda"),
    (Species::XiMinus, 3312, "XiMinus"),
    (Species::XiPlus, -3312, "XiPlus"),
    (Species::OmegaMinus, 3334, "OmegaMinus"),
    (Species::OmegaPlus, -3334, "OmegaPlus"),
];

impl Species {
    /// All species in canonical order.
    pub const ALL: [Species; 7] = [
        Species::KaonShort,
        Species::Lambda,
        Species::AntiLambda,
        Species::XiMinus,
        Species::XiPlus,
        Species::OmegaMinus,
        Species::OmegaPlus,
    ];

    /// Map a signed PDG code to a species, or `None` for anything else.
    pub fn from_pdg(code: i32) -> Option<Self> {
        SPECIES_TABLE
            .iter()
            .find(|(_, pdg, _)| *pdg == code)
            .map(|(species, _, _)| *species)
    }

    /// The signed PDG code of this species.
    pub fn pdg_code(self) -> i32 {
        SPECIES_TABLE[self.index()].1
    }

    /// Name used to build histogram names (`"K0Short"`, `"XiPlus"`, ...).
    pub fn family_name(self) -> &'static str {
        SPECIES_TABLE[self.index()].2
    }

    /// Position of this species in [`Species::ALL`].
    pub fn index(self) -> usize {
        match self {
            Species::KaonShort => 0,
            Species::Lambda => 1,
            Species::AntiLambda => 2,
            Species::XiMinus => 3,
            Species::XiPlus => 4,
            Species::OmegaMinus => 5,
            Species::OmegaPlus => 6,
        }
    }

    /// Decay topology used to reconstruct this species.
    pub fn family(self) -> SpeciesFamily {
        match self {
            Species::KaonShort | Species::Lambda | Species::AntiLambda => SpeciesFamily::V0,
            Species::XiMinus | Species::XiPlus | Species::OmegaMinus | Species::OmegaPlus => {
                SpeciesFamily::Cascade
            }
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family_name())
    }
}
