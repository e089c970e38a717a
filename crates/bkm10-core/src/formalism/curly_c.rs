//! Bilinear ("curly C") combinations of Compton form factors.
//!
//! The DVCS functions take two CFF sets and conjugate the second one. The
//! interference functions are linear in a single CFF set, weighted by the
//! elastic form factors.

use crate::cff::CffInputs;
use crate::common::constants::PROTON_MASS_SQUARED;
use crate::common::form_factors::ElasticFormFactors;
use crate::kinematics::DerivedKinematics;
use crate::numerics::Real;
use num_complex::Complex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterferenceCurlyC<R> {
    pub standard: Complex<R>,
    pub vector: Complex<R>,
    pub axial: Complex<R>,
}

fn dvcs_prefactor<R: Real>(kinematics: &DerivedKinematics<R>) -> R {
    let q_squared = kinematics.q_squared;
    let x_bjorken = kinematics.x_bjorken;
    let skewed = (R::from_f64(2.0) - x_bjorken) * q_squared + x_bjorken * kinematics.t;

    q_squared * (q_squared + x_bjorken * kinematics.t) / (skewed * skewed)
}

/// C^DVCS(F, G*) for an unpolarized target.
pub fn dvcs_unpolarized<R: Real>(
    kinematics: &DerivedKinematics<R>,
    first: &CffInputs<R>,
    second: &CffInputs<R>,
) -> Complex<R> {
    let c = R::from_f64;
    let one = R::one();
    let q_squared = kinematics.q_squared;
    let x_bjorken = kinematics.x_bjorken;
    let t = kinematics.t;
    let star = second.conjugated();

    let q_squared_plus_xt = q_squared + x_bjorken * t;
    let skewed = (c(2.0) - x_bjorken) * q_squared + x_bjorken * t;
    let mass_ratio = t / c(4.0 * PROTON_MASS_SQUARED);
    let helicity_flip_weight =
        x_bjorken * x_bjorken * (q_squared + t) * (q_squared + t) / (q_squared * q_squared_plus_xt);
    let axial_flip_weight = x_bjorken * x_bjorken * q_squared / q_squared_plus_xt;

    let h_h = first.h * star.h * (c(4.0) * (one - x_bjorken));
    let ht_ht = first.h_tilde
        * star.h_tilde
        * (c(4.0)
            * (one - x_bjorken
                + (c(2.0) * q_squared + t) / q_squared_plus_xt * kinematics.epsilon_squared
                    / c(4.0)));
    let h_e = (first.h * star.e + first.e * star.h) * helicity_flip_weight;
    let ht_et = (first.h_tilde * star.e_tilde + first.e_tilde * star.h_tilde) * axial_flip_weight;
    let e_e = first.e
        * star.e
        * (helicity_flip_weight + skewed * skewed / (q_squared * q_squared_plus_xt) * mass_ratio);
    let et_et = first.e_tilde * star.e_tilde * (axial_flip_weight * mass_ratio);

    (h_h + ht_ht - h_e - ht_et - e_e - et_et) * dvcs_prefactor(kinematics)
}

/// C^DVCS_LP(F, G*) for a longitudinally polarized target.
pub fn dvcs_longitudinally_polarized<R: Real>(
    kinematics: &DerivedKinematics<R>,
    first: &CffInputs<R>,
    second: &CffInputs<R>,
) -> Complex<R> {
    let c = R::from_f64;
    let one = R::one();
    let q_squared = kinematics.q_squared;
    let x_bjorken = kinematics.x_bjorken;
    let t = kinematics.t;
    let star = second.conjugated();

    let h_ht = (first.h * star.h_tilde + first.h_tilde * star.h)
        * (c(4.0)
            * (one - x_bjorken
                + ((c(3.0) - c(2.0) * x_bjorken) * q_squared + t) / (q_squared + x_bjorken * t)
                    * kinematics.epsilon_squared
                    / c(4.0)));
    let h_et = (first.h * star.e_tilde + first.e_tilde * star.h) * (x_bjorken * x_bjorken);
    let e_ht = (first.e * star.h_tilde + first.h_tilde * star.e) * (x_bjorken * x_bjorken);
    let e_et = (first.e * star.e_tilde + first.e_tilde * star.e)
        * (x_bjorken
            * (x_bjorken * x_bjorken / c(2.0)
                + (c(2.0) - x_bjorken) * t / c(4.0 * PROTON_MASS_SQUARED)));

    (h_ht - h_et - e_ht - e_et) * dvcs_prefactor(kinematics)
}

pub fn interference_unpolarized<R: Real>(
    kinematics: &DerivedKinematics<R>,
    form_factors: &ElasticFormFactors<R>,
    cffs: &CffInputs<R>,
) -> InterferenceCurlyC<R> {
    let mass_ratio = kinematics.t / R::from_f64(4.0 * PROTON_MASS_SQUARED);
    let weight = kinematics.xi_prime * form_factors.dirac_plus_pauli();

    InterferenceCurlyC {
        standard: cffs.h * form_factors.dirac - cffs.e * (mass_ratio * form_factors.pauli)
            + cffs.h_tilde * weight,
        vector: (cffs.h + cffs.e) * weight,
        axial: cffs.h_tilde * weight,
    }
}

pub fn interference_longitudinally_polarized<R: Real>(
    kinematics: &DerivedKinematics<R>,
    form_factors: &ElasticFormFactors<R>,
    cffs: &CffInputs<R>,
) -> InterferenceCurlyC<R> {
    let half_x = kinematics.x_bjorken / R::from_f64(2.0);
    let mass_ratio = kinematics.t / R::from_f64(4.0 * PROTON_MASS_SQUARED);
    let weight = kinematics.xi_prime * form_factors.dirac_plus_pauli();
    let vector = (cffs.h + cffs.e * half_x) * weight;

    InterferenceCurlyC {
        standard: vector + cffs.h_tilde * form_factors.dirac
            - cffs.e_tilde
                * (kinematics.xi_prime
                    * (half_x * form_factors.dirac + mass_ratio * form_factors.pauli)),
        vector,
        axial: (cffs.h_tilde + cffs.e_tilde * half_x) * weight,
    }
}
