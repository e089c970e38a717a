//! Elastic nucleon form factors in the dipole parameterization.

use super::constants::{DIPOLE_MASS_SQUARED, PROTON_MAGNETIC_MOMENT, PROTON_MASS_SQUARED};
use crate::numerics::Real;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticFormFactors<R> {
    pub electric: R,
    pub magnetic: R,
    pub dirac: R,
    pub pauli: R,
}

impl<R: Real> ElasticFormFactors<R> {
    /// F1 + F2, the combination that appears throughout the BH and
    /// interference amplitudes.
    pub fn dirac_plus_pauli(&self) -> R {
        self.dirac + self.pauli
    }
}

pub fn dipole_form_factors<R: Real>(t: R) -> ElasticFormFactors<R> {
    let one = R::one();
    let electric = one / (one - t / R::from_f64(DIPOLE_MASS_SQUARED)).powi(2);
    let magnetic = R::from_f64(PROTON_MAGNETIC_MOMENT) * electric;
    let tau = -t / R::from_f64(4.0 * PROTON_MASS_SQUARED);

    ElasticFormFactors {
        electric,
        magnetic,
        dirac: (electric + tau * magnetic) / (one + tau),
        pauli: (magnetic - electric) / (one + tau),
    }
}
