//! Coefficient assembler: the seven harmonic coefficients c0..c3, s1..s3 of the
//! four-fold cross section for one fixed polarization state.

pub mod bethe_heitler;
pub mod curly_c;
pub mod dvcs;
pub mod interference;

use crate::cff::{CffInputs, effective_cffs};
use crate::common::constants::{ALPHFS, PI};
use crate::common::form_factors::dipole_form_factors;
use crate::domain::errors::Bkm10Error;
use crate::domain::polarization::PolarizationState;
use crate::kinematics::{DerivedKinematics, KinematicDomainError};
use crate::numerics::Real;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Harmonic {
    C0,
    C1,
    C2,
    C3,
    S1,
    S2,
    S3,
}

impl Harmonic {
    pub const ALL: [Self; 7] = [
        Self::C0,
        Self::C1,
        Self::C2,
        Self::C3,
        Self::S1,
        Self::S2,
        Self::S3,
    ];

    pub const fn order(self) -> usize {
        match self {
            Self::C0 => 0,
            Self::C1 | Self::S1 => 1,
            Self::C2 | Self::S2 => 2,
            Self::C3 | Self::S3 => 3,
        }
    }

    pub const fn is_sine(self) -> bool {
        matches!(self, Self::S1 | Self::S2 | Self::S3)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::C0 => "c0",
            Self::C1 => "c1",
            Self::C2 => "c2",
            Self::C3 => "c3",
            Self::S1 => "s1",
            Self::S2 => "s2",
            Self::S3 => "s3",
        }
    }

    /// cos(nφ) or sin(nφ) for this harmonic.
    pub fn basis<R: Real>(self, phi: R) -> R {
        let argument = R::from_f64(self.order() as f64) * phi;
        if self.is_sine() {
            argument.sin()
        } else {
            argument.cos()
        }
    }
}

impl Display for Harmonic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarmonicParseError {
    #[error("unrecognized harmonic '{name}', expected one of c0, c1, c2, c3, s1, s2, s3")]
    Unrecognized { name: String },
}

impl From<HarmonicParseError> for Bkm10Error {
    fn from(error: HarmonicParseError) -> Self {
        Bkm10Error::configuration("FORMALISM.HARMONIC", error.to_string())
    }
}

impl FromStr for Harmonic {
    type Err = HarmonicParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|harmonic| harmonic.as_str() == normalized)
            .ok_or_else(|| HarmonicParseError::Unrecognized {
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicNumerators<R> {
    /// c0..c3
    pub cosine: [R; 4],
    /// Index 0 is always zero; s1..s3 live at 1..=3.
    pub sine: [R; 4],
}

impl<R: Real> HarmonicNumerators<R> {
    pub fn zero() -> Self {
        Self {
            cosine: [R::zero(); 4],
            sine: [R::zero(); 4],
        }
    }

    pub fn get(&self, harmonic: Harmonic) -> R {
        if harmonic.is_sine() {
            self.sine[harmonic.order()]
        } else {
            self.cosine[harmonic.order()]
        }
    }

    pub fn fourier_sum(&self, phi: R) -> R {
        Harmonic::ALL
            .into_iter()
            .fold(R::zero(), |sum, harmonic| {
                sum + self.get(harmonic) * harmonic.basis(phi)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContributionToggles {
    pub bethe_heitler: bool,
    pub dvcs: bool,
    pub interference: bool,
}

impl Default for ContributionToggles {
    fn default() -> Self {
        Self {
            bethe_heitler: true,
            dvcs: true,
            interference: true,
        }
    }
}

impl ContributionToggles {
    fn needs_propagators(self) -> bool {
        self.bethe_heitler || self.interference
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormalismSettings {
    pub use_ww: bool,
    pub toggles: ContributionToggles,
}

/// Evaluator for one polarization state. All φ-independent numerators are
/// computed at construction; only the propagators are evaluated per angle.
#[derive(Debug, Clone)]
pub struct BkmFormalism<R> {
    kinematics: DerivedKinematics<R>,
    state: PolarizationState,
    settings: FormalismSettings,
    bethe_heitler: HarmonicNumerators<R>,
    dvcs: HarmonicNumerators<R>,
    interference: HarmonicNumerators<R>,
}

impl<R: Real> BkmFormalism<R> {
    pub fn new(
        kinematics: DerivedKinematics<R>,
        cffs: &CffInputs<R>,
        state: PolarizationState,
        settings: FormalismSettings,
    ) -> Self {
        debug!(
            %state,
            use_ww = settings.use_ww,
            bethe_heitler = settings.toggles.bethe_heitler,
            dvcs = settings.toggles.dvcs,
            interference = settings.toggles.interference,
            "building BKM10 formalism"
        );

        let form_factors = dipole_form_factors(kinematics.t);
        let effective = effective_cffs(cffs, kinematics.xi, settings.use_ww);
        let toggles = settings.toggles;

        let bethe_heitler = if toggles.bethe_heitler {
            bethe_heitler::numerators(&kinematics, &form_factors, state)
        } else {
            HarmonicNumerators::zero()
        };
        let dvcs = if toggles.dvcs {
            dvcs::numerators(&kinematics, cffs, &effective, state)
        } else {
            HarmonicNumerators::zero()
        };
        let interference = if toggles.interference {
            interference::numerators(&kinematics, &form_factors, cffs, &effective, state)
        } else {
            HarmonicNumerators::zero()
        };

        Self {
            kinematics,
            state,
            settings,
            bethe_heitler,
            dvcs,
            interference,
        }
    }

    pub fn kinematics(&self) -> &DerivedKinematics<R> {
        &self.kinematics
    }

    pub fn state(&self) -> PolarizationState {
        self.state
    }

    pub fn settings(&self) -> FormalismSettings {
        self.settings
    }

    /// α³·xB·y² / (8π·Q⁴·√(1 + ε²)), in GeV⁻⁴ before unit conversion.
    pub fn prefactor(&self) -> R {
        let kinematics = &self.kinematics;
        R::from_f64(ALPHFS.powi(3)) * kinematics.x_bjorken * kinematics.y * kinematics.y
            / (R::from_f64(8.0 * PI)
                * kinematics.q_squared
                * kinematics.q_squared
                * kinematics.root_one_plus_epsilon_squared)
    }

    /// Numerator sets for BH, DVCS and interference, in that order.
    pub fn numerators(&self) -> [&HarmonicNumerators<R>; 3] {
        [&self.bethe_heitler, &self.dvcs, &self.interference]
    }

    /// Value of one harmonic coefficient, denominators included, at each
    /// BKM-frame angle.
    pub fn coefficient(&self, harmonic: Harmonic, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        phi.iter()
            .map(|angle| {
                let weights = self.denominator_weights(*angle)?;
                Ok(weights.combine(|numerators| numerators.get(harmonic), self))
            })
            .collect()
    }

    pub fn c0(&self, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        self.coefficient(Harmonic::C0, phi)
    }

    pub fn c1(&self, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        self.coefficient(Harmonic::C1, phi)
    }

    pub fn c2(&self, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        self.coefficient(Harmonic::C2, phi)
    }

    pub fn c3(&self, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        self.coefficient(Harmonic::C3, phi)
    }

    pub fn s1(&self, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        self.coefficient(Harmonic::S1, phi)
    }

    pub fn s2(&self, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        self.coefficient(Harmonic::S2, phi)
    }

    pub fn s3(&self, phi: &[R]) -> Result<Vec<R>, KinematicDomainError> {
        self.coefficient(Harmonic::S3, phi)
    }

    /// Σ cₙcos(nφ) + sₙsin(nφ) at a BKM-frame angle, without the prefactor.
    pub fn harmonic_sum(&self, phi: R) -> Result<R, KinematicDomainError> {
        let weights = self.denominator_weights(phi)?;
        Ok(weights.combine(|numerators| numerators.fourier_sum(phi), self))
    }

    fn denominator_weights(&self, phi: R) -> Result<DenominatorWeights<R>, KinematicDomainError> {
        let one = R::one();
        let propagator_product = if self.settings.toggles.needs_propagators() {
            self.kinematics.lepton_propagators(phi)?.product()
        } else {
            one
        };

        Ok(DenominatorWeights {
            bethe_heitler: one
                / (bethe_heitler::denominator(&self.kinematics) * propagator_product),
            dvcs: one / dvcs::denominator(&self.kinematics),
            interference: one
                / (interference::denominator(&self.kinematics) * propagator_product),
        })
    }
}

struct DenominatorWeights<R> {
    bethe_heitler: R,
    dvcs: R,
    interference: R,
}

impl<R: Real> DenominatorWeights<R> {
    fn combine(
        &self,
        project: impl Fn(&HarmonicNumerators<R>) -> R,
        formalism: &BkmFormalism<R>,
    ) -> R {
        project(&formalism.bethe_heitler) * self.bethe_heitler
            + project(&formalism.dvcs) * self.dvcs
            + project(&formalism.interference) * self.interference
    }
}
