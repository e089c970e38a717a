//! Squared DVCS amplitude harmonics.

use super::HarmonicNumerators;
use super::curly_c::{dvcs_longitudinally_polarized, dvcs_unpolarized};
use crate::cff::CffInputs;
use crate::domain::polarization::PolarizationState;
use crate::kinematics::DerivedKinematics;
use crate::numerics::Real;

pub fn denominator<R: Real>(kinematics: &DerivedKinematics<R>) -> R {
    kinematics.y * kinematics.y * kinematics.q_squared
}

pub fn numerators<R: Real>(
    kinematics: &DerivedKinematics<R>,
    cffs: &CffInputs<R>,
    effective: &CffInputs<R>,
    state: PolarizationState,
) -> HarmonicNumerators<R> {
    let c = R::from_f64;
    let one = R::one();
    let helicity = c(state.helicity().value());
    let target = c(state.target().value());
    let y = kinematics.y;
    let k = kinematics.k;
    let x = kinematics.x_bjorken;
    let epsilon_squared = kinematics.epsilon_squared;
    let root = kinematics.root_one_plus_epsilon_squared;
    let one_plus_epsilon_squared = one + epsilon_squared;
    let twist_three_weight = c(8.0) * k / ((c(2.0) - x) * one_plus_epsilon_squared);

    let twist_two = dvcs_unpolarized(kinematics, cffs, cffs);
    let twist_three = dvcs_unpolarized(kinematics, effective, effective);
    let mixed = dvcs_unpolarized(kinematics, effective, cffs);
    let polarized_twist_two = dvcs_longitudinally_polarized(kinematics, cffs, cffs);
    let polarized_mixed = dvcs_longitudinally_polarized(kinematics, effective, cffs);

    let c0_unpolarized = c(2.0)
        * (c(2.0) - c(2.0) * y + y * y + epsilon_squared * y * y / c(2.0))
        / one_plus_epsilon_squared
        * twist_two.re
        + c(16.0) * k * k / ((c(2.0) - x).powi(2) * one_plus_epsilon_squared)
            * twist_three.re;
    let c0_polarized =
        c(2.0) * y * (c(2.0) - y) / root * polarized_twist_two.re;

    let c1_unpolarized = twist_three_weight * (c(2.0) - y) * mixed.re;
    let c1_polarized = -twist_three_weight * y * root * polarized_mixed.re;

    let s1_unpolarized = -twist_three_weight * y * root * mixed.im;
    let s1_polarized = twist_three_weight * (c(2.0) - y) * polarized_mixed.im;

    let mut numerators = HarmonicNumerators::zero();
    numerators.cosine[0] = c0_unpolarized + helicity * target * c0_polarized;
    numerators.cosine[1] = c1_unpolarized + helicity * target * c1_polarized;
    numerators.sine[1] = helicity * s1_unpolarized + target * s1_polarized;
    numerators
}
