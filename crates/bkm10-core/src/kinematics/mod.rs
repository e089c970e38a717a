//! Kinematic derivation chain: ε → y → ξ → t_min → t′ → K̃ → K, plus the
//! φ-dependent lepton propagators.

use crate::common::constants::PROTON_MASS;
use crate::domain::errors::Bkm10Error;
use crate::numerics::Real;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest negative radicand that is treated as a kinematic boundary point
/// and clamped to zero instead of being reported.
pub const RADICAND_CLAMP_TOLERANCE: f64 = 1.0e-12;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct KinematicInputs {
    /// Beam energy k in the lab frame, GeV.
    #[serde(alias = "lab_kinematics_k")]
    pub lepton_energy: f64,
    #[serde(alias = "squared_Q_momentum_transfer")]
    pub q_squared: f64,
    #[serde(alias = "x_Bjorken")]
    pub x_bjorken: f64,
    #[serde(alias = "squared_hadronic_momentum_transfer_t")]
    pub t: f64,
}

impl KinematicInputs {
    pub fn new(lepton_energy: f64, q_squared: f64, x_bjorken: f64, t: f64) -> Self {
        Self {
            lepton_energy,
            q_squared,
            x_bjorken,
            t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedKinematics<R> {
    pub q_squared: R,
    pub x_bjorken: R,
    pub t: R,
    pub lepton_energy: R,
    pub epsilon: R,
    pub epsilon_squared: R,
    /// √(1 + ε²)
    pub root_one_plus_epsilon_squared: R,
    pub y: R,
    /// 1 − y − ε²y²/4
    pub lepton_factor: R,
    pub lepton_factor_root: R,
    pub xi: R,
    /// xB / (2 − xB + xB·t/Q²), the skewness entering the interference
    /// curly-C functions.
    pub xi_prime: R,
    pub t_min: R,
    pub t_prime: R,
    pub k_tilde: R,
    pub k: R,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeptonPropagators<R> {
    pub k_dot_delta: R,
    pub p1: R,
    pub p2: R,
}

impl<R: Real> LeptonPropagators<R> {
    pub fn product(&self) -> R {
        self.p1 * self.p2
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KinematicDomainError {
    #[error("photon virtuality Q^2 must be positive, got {q_squared}")]
    NonPositiveVirtuality { q_squared: f64 },
    #[error("beam energy k must be positive, got {lepton_energy}")]
    NonPositiveBeamEnergy { lepton_energy: f64 },
    #[error("epsilon vanished (x_B = {x_bjorken}), y = sqrt(Q^2)/(epsilon k) is undefined")]
    VanishingEpsilon { x_bjorken: f64 },
    #[error("skewness denominator 2 - x_B + x_B t/Q^2 vanished ({denominator})")]
    DegenerateSkewness { denominator: f64 },
    #[error("t = {t} lies above t_min = {t_min}; t' = t - t_min must be <= 0")]
    UnphysicalMomentumTransfer { t: f64, t_min: f64 },
    #[error("square root of negative {quantity} = {value}")]
    NegativeRadicand { quantity: &'static str, value: f64 },
    #[error("denominator of {quantity} vanished")]
    VanishingDenominator { quantity: &'static str },
}

impl KinematicDomainError {
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::NonPositiveVirtuality { .. } => "KINEMATICS.Q_SQUARED",
            Self::NonPositiveBeamEnergy { .. } => "KINEMATICS.BEAM_ENERGY",
            Self::VanishingEpsilon { .. } => "KINEMATICS.EPSILON",
            Self::DegenerateSkewness { .. } => "KINEMATICS.SKEWNESS",
            Self::UnphysicalMomentumTransfer { .. } => "KINEMATICS.T_PRIME",
            Self::NegativeRadicand { .. } => "KINEMATICS.RADICAND",
            Self::VanishingDenominator { .. } => "KINEMATICS.DENOMINATOR",
        }
    }
}

impl From<KinematicDomainError> for Bkm10Error {
    fn from(error: KinematicDomainError) -> Self {
        Bkm10Error::kinematic_domain(error.placeholder(), error.to_string())
    }
}

pub fn derive_kinematics<R: Real>(
    inputs: &KinematicInputs,
) -> Result<DerivedKinematics<R>, KinematicDomainError> {
    // Written as negated comparisons so that NaN inputs are rejected too.
    if !(inputs.q_squared > 0.0) {
        return Err(KinematicDomainError::NonPositiveVirtuality {
            q_squared: inputs.q_squared,
        });
    }
    if !(inputs.lepton_energy > 0.0) {
        return Err(KinematicDomainError::NonPositiveBeamEnergy {
            lepton_energy: inputs.lepton_energy,
        });
    }

    let c = R::from_f64;
    let one = R::one();
    let q_squared = c(inputs.q_squared);
    let x_bjorken = c(inputs.x_bjorken);
    let t = c(inputs.t);
    let lepton_energy = c(inputs.lepton_energy);
    let q = q_squared.sqrt();

    let epsilon = c(2.0 * PROTON_MASS) * x_bjorken / q;
    if epsilon.value() == 0.0 {
        return Err(KinematicDomainError::VanishingEpsilon {
            x_bjorken: inputs.x_bjorken,
        });
    }
    let epsilon_squared = epsilon * epsilon;
    let root_one_plus_epsilon_squared = (one + epsilon_squared).sqrt();

    let y = checked_div("lepton energy fraction y", q, epsilon * lepton_energy)?;
    let lepton_factor = one - y - epsilon_squared * y * y / c(4.0);
    let lepton_factor_root = checked_sqrt("1 - y - epsilon^2 y^2 / 4", lepton_factor)?;

    let skewness_denominator = c(2.0) - x_bjorken + x_bjorken * t / q_squared;
    if skewness_denominator.value() == 0.0 {
        return Err(KinematicDomainError::DegenerateSkewness {
            denominator: skewness_denominator.value(),
        });
    }
    let xi = x_bjorken * (one + t / (c(2.0) * q_squared)) / skewness_denominator;
    let xi_prime = x_bjorken / skewness_denominator;

    let t_min = -q_squared
        * checked_div(
            "t_min",
            c(2.0) * (one - x_bjorken) * (one - root_one_plus_epsilon_squared) + epsilon_squared,
            c(4.0) * x_bjorken * (one - x_bjorken) + epsilon_squared,
        )?;
    let t_prime = t - t_min;
    if t_prime.value() > RADICAND_CLAMP_TOLERANCE {
        return Err(KinematicDomainError::UnphysicalMomentumTransfer {
            t: inputs.t,
            t_min: t_min.value(),
        });
    }

    let distance_from_t_min = t_min - t;
    let k_tilde = checked_sqrt("t_min - t", distance_from_t_min)?
        * checked_sqrt(
            "K-tilde bracket",
            (one - x_bjorken) * root_one_plus_epsilon_squared
                + distance_from_t_min * (epsilon_squared + c(4.0) * (one - x_bjorken) * x_bjorken)
                    / (c(4.0) * q_squared),
        )?;
    let k = checked_sqrt(
        "(1 - y + epsilon^2 y^2 / 4) / Q^2",
        (one - y + epsilon_squared * y * y / c(4.0)) / q_squared,
    )? * k_tilde;

    Ok(DerivedKinematics {
        q_squared,
        x_bjorken,
        t,
        lepton_energy,
        epsilon,
        epsilon_squared,
        root_one_plus_epsilon_squared,
        y,
        lepton_factor,
        lepton_factor_root,
        xi,
        xi_prime,
        t_min,
        t_prime,
        k_tilde,
        k,
    })
}

impl<R: Real> DerivedKinematics<R> {
    /// k·Δ and the two BH lepton propagators at an azimuth already expressed
    /// in the BKM frame.
    pub fn lepton_propagators(&self, phi: R) -> Result<LeptonPropagators<R>, KinematicDomainError> {
        let c = R::from_f64;
        let one = R::one();
        let y_epsilon_term = self.y * self.epsilon_squared / c(2.0);

        let k_dot_delta = -(self.q_squared / (c(2.0) * self.y * (one + self.epsilon_squared)))
            * (one + c(2.0) * self.k * phi.cos()
                - self.t / self.q_squared
                    * (one - self.x_bjorken * (c(2.0) - self.y) + y_epsilon_term)
                + y_epsilon_term);

        let p1 = one + c(2.0) * k_dot_delta / self.q_squared;
        let p2 = self.t / self.q_squared - c(2.0) * k_dot_delta / self.q_squared;
        let propagators = LeptonPropagators { k_dot_delta, p1, p2 };
        let product = propagators.product().value();
        if product == 0.0 || !product.is_finite() {
            return Err(KinematicDomainError::VanishingDenominator {
                quantity: "lepton propagator product P1 P2",
            });
        }

        Ok(propagators)
    }
}

fn checked_div<R: Real>(
    quantity: &'static str,
    numerator: R,
    denominator: R,
) -> Result<R, KinematicDomainError> {
    let value = denominator.value();
    if value == 0.0 || !value.is_finite() {
        return Err(KinematicDomainError::VanishingDenominator { quantity });
    }
    Ok(numerator / denominator)
}

fn checked_sqrt<R: Real>(quantity: &'static str, radicand: R) -> Result<R, KinematicDomainError> {
    let value = radicand.value();
    if value >= 0.0 {
        return Ok(radicand.sqrt());
    }
    if value >= -RADICAND_CLAMP_TOLERANCE {
        warn!(quantity, value, "clamping negative radicand at kinematic boundary");
        return Ok(R::zero());
    }
    Err(KinematicDomainError::NegativeRadicand { quantity, value })
}
