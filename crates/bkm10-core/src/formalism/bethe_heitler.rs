//! Bethe-Heitler harmonic numerators.

use super::HarmonicNumerators;
use crate::common::constants::PROTON_MASS_SQUARED;
use crate::common::form_factors::ElasticFormFactors;
use crate::domain::polarization::PolarizationState;
use crate::kinematics::DerivedKinematics;
use crate::numerics::Real;

/// φ-independent part of the BH denominator; the full denominator also
/// carries the propagator product P1·P2.
pub fn denominator<R: Real>(kinematics: &DerivedKinematics<R>) -> R {
    let one_plus_epsilon_squared = R::one() + kinematics.epsilon_squared;
    kinematics.x_bjorken.powi(2)
        * kinematics.y.powi(2)
        * one_plus_epsilon_squared.powi(2)
        * kinematics.t
}

pub fn numerators<R: Real>(
    kinematics: &DerivedKinematics<R>,
    form_factors: &ElasticFormFactors<R>,
    state: PolarizationState,
) -> HarmonicNumerators<R> {
    let mut numerators = unpolarized_numerators(kinematics, form_factors);
    let polarized = longitudinally_polarized_numerators(kinematics, form_factors);
    let helicity_times_target =
        R::from_f64(state.helicity().value() * state.target().value());

    numerators.cosine[0] = numerators.cosine[0] + helicity_times_target * polarized[0];
    numerators.cosine[1] = numerators.cosine[1] + helicity_times_target * polarized[1];
    numerators
}

fn unpolarized_numerators<R: Real>(
    kinematics: &DerivedKinematics<R>,
    form_factors: &ElasticFormFactors<R>,
) -> HarmonicNumerators<R> {
    let c = R::from_f64;
    let one = R::one();
    let mass_squared = c(PROTON_MASS_SQUARED);
    let q_squared = kinematics.q_squared;
    let x = kinematics.x_bjorken;
    let t = kinematics.t;
    let y = kinematics.y;
    let epsilon_squared = kinematics.epsilon_squared;
    let k_squared = kinematics.k * kinematics.k;
    let t_ratio = t / q_squared;
    let two_minus_y_squared = (c(2.0) - y).powi(2);

    let dirac = form_factors.dirac;
    let pauli = form_factors.pauli;
    let electric_like = dirac * dirac - pauli * pauli * t / (c(4.0) * mass_squared);
    let magnetic_like = form_factors.dirac_plus_pauli().powi(2);

    let c0 = c(8.0)
        * k_squared
        * ((c(2.0) + c(3.0) * epsilon_squared) * (q_squared / t) * electric_like
            + c(2.0) * x * x * magnetic_like)
        + two_minus_y_squared
            * ((c(2.0) + epsilon_squared)
                * ((c(4.0) * x * x * mass_squared / t) * (one + t_ratio).powi(2)
                    + c(4.0) * (one - x) * (one + x * t_ratio))
                * electric_like
                + c(4.0)
                    * x
                    * x
                    * (x + (one - x + epsilon_squared / c(2.0)) * (one - t_ratio).powi(2)
                        - x * (one - c(2.0) * x) * t_ratio * t_ratio)
                    * magnetic_like)
        + c(8.0)
            * (one + epsilon_squared)
            * kinematics.lepton_factor
            * (c(2.0) * epsilon_squared * (one - t / (c(4.0) * mass_squared)) * electric_like
                - x * x * (one - t_ratio).powi(2) * magnetic_like);

    let c1 = c(8.0)
        * kinematics.k
        * (c(2.0) - y)
        * ((c(4.0) * x * x * mass_squared / t - c(2.0) * x - epsilon_squared) * electric_like
            + c(2.0) * x * x * (one - (one - c(2.0) * x) * t_ratio) * magnetic_like);

    let c2 = c(8.0)
        * x
        * x
        * k_squared
        * ((c(4.0) * mass_squared / t) * electric_like + c(2.0) * magnetic_like);

    let mut numerators = HarmonicNumerators::zero();
    numerators.cosine[0] = c0;
    numerators.cosine[1] = c1;
    numerators.cosine[2] = c2;
    numerators
}

/// Cosine numerators c0 and c1 proportional to λΛ, returned without the
/// polarization product.
fn longitudinally_polarized_numerators<R: Real>(
    kinematics: &DerivedKinematics<R>,
    form_factors: &ElasticFormFactors<R>,
) -> [R; 2] {
    let c = R::from_f64;
    let one = R::one();
    let mass_squared = c(PROTON_MASS_SQUARED);
    let q_squared = kinematics.q_squared;
    let x = kinematics.x_bjorken;
    let t = kinematics.t;
    let y = kinematics.y;
    let epsilon_squared = kinematics.epsilon_squared;
    let root = kinematics.root_one_plus_epsilon_squared;
    let t_ratio = t / q_squared;
    let mass_ratio = t / (c(4.0) * mass_squared);
    let tau = -mass_ratio;

    let sum = form_factors.dirac_plus_pauli();
    let shifted_dirac = form_factors.dirac + mass_ratio * form_factors.pauli;
    let normalization = (one + epsilon_squared) / (one + tau);

    let c0 = c(8.0) * x * (c(2.0) - y) * y / root
        * sum
        * (c(0.5)
            * (x / c(2.0) * (one - t_ratio) - mass_ratio)
            * (c(2.0) - x - c(2.0) * (one - x).powi(2) * t_ratio
                + epsilon_squared * (one - t_ratio)
                - x * (one - c(2.0) * x) * t_ratio * t_ratio)
            * sum
            + (one - (one - x) * t_ratio)
                * (x * x * mass_squared / t * (one + t_ratio).powi(2)
                    + (one - x) * (one + x * t_ratio))
                * shifted_dirac)
        * normalization;

    let c1 = -c(8.0) * x * y * kinematics.k / root
        * sum
        * ((t / (c(2.0) * mass_squared) - x * (one - t_ratio)) * (one - x + x * t_ratio) * sum
            + (one + x
                - (c(3.0) - c(2.0) * x) * (one + x * t_ratio)
                - c(4.0) * x * x * mass_squared / t * (one + t_ratio * t_ratio))
                * shifted_dirac)
        * normalization;

    [c0, c1]
}
