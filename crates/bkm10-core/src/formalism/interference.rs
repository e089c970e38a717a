//! BH-DVCS interference harmonics.
//!
//! Each harmonic contracts the helicity-conserving (++) and longitudinal (0+)
//! angular weights against the interference curly-C functions. The 0+ part is
//! evaluated with the effective CFFs and carries the factor ζ.

use super::HarmonicNumerators;
use super::curly_c::{InterferenceCurlyC, interference_longitudinally_polarized, interference_unpolarized};
use crate::cff::CffInputs;
use crate::common::constants::SQRT_TWO;
use crate::common::form_factors::ElasticFormFactors;
use crate::domain::polarization::PolarizationState;
use crate::kinematics::DerivedKinematics;
use crate::numerics::Real;
use num_complex::Complex;

#[derive(Debug, Clone, Copy, PartialEq)]
struct AngularWeights<R> {
    standard: R,
    vector: R,
    axial: R,
}

impl<R: Real> AngularWeights<R> {
    fn new(standard: R, vector: R, axial: R) -> Self {
        Self {
            standard,
            vector,
            axial,
        }
    }

    fn zero() -> Self {
        Self::new(R::zero(), R::zero(), R::zero())
    }

    fn contract(&self, curly_c: &InterferenceCurlyC<R>) -> Complex<R> {
        curly_c.standard * self.standard + curly_c.vector * self.vector + curly_c.axial * self.axial
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HarmonicWeights<R> {
    conserving: AngularWeights<R>,
    longitudinal: AngularWeights<R>,
}

impl<R: Real> HarmonicWeights<R> {
    fn zero() -> Self {
        Self {
            conserving: AngularWeights::zero(),
            longitudinal: AngularWeights::zero(),
        }
    }

    fn contract(
        &self,
        raw: &InterferenceCurlyC<R>,
        effective: &InterferenceCurlyC<R>,
        zeta: R,
    ) -> Complex<R> {
        self.conserving.contract(raw) + self.longitudinal.contract(effective) * zeta
    }
}

/// Kinematic shorthands shared by every weight.
struct Shorthand<R> {
    x: R,
    y: R,
    k: R,
    ee: R,
    root: R,
    lepton_factor: R,
    lepton_factor_root: R,
    t_ratio: R,
    t_prime_ratio: R,
    k_tilde_ratio: R,
    two_minus_y: R,
    weight_squared: R,
    weight_five_halves: R,
}

impl<R: Real> Shorthand<R> {
    fn new(kinematics: &DerivedKinematics<R>) -> Self {
        let one_plus_ee = R::one() + kinematics.epsilon_squared;
        Self {
            x: kinematics.x_bjorken,
            y: kinematics.y,
            k: kinematics.k,
            ee: kinematics.epsilon_squared,
            root: kinematics.root_one_plus_epsilon_squared,
            lepton_factor: kinematics.lepton_factor,
            lepton_factor_root: kinematics.lepton_factor_root,
            t_ratio: kinematics.t / kinematics.q_squared,
            t_prime_ratio: kinematics.t_prime / kinematics.q_squared,
            k_tilde_ratio: kinematics.k_tilde * kinematics.k_tilde / kinematics.q_squared,
            two_minus_y: R::from_f64(2.0) - kinematics.y,
            weight_squared: one_plus_ee.powi(2),
            weight_five_halves: one_plus_ee.powf(2.5),
        }
    }
}

pub fn denominator<R: Real>(kinematics: &DerivedKinematics<R>) -> R {
    kinematics.x_bjorken * kinematics.y.powi(3) * kinematics.t
}

/// ζ = √2·K̃ / ((2 − xB)·√Q²), the relative weight of the longitudinal
/// photon amplitudes.
pub fn longitudinal_weight<R: Real>(kinematics: &DerivedKinematics<R>) -> R {
    R::from_f64(SQRT_TWO) / (R::from_f64(2.0) - kinematics.x_bjorken) * kinematics.k_tilde
        / kinematics.q_squared.sqrt()
}

pub fn numerators<R: Real>(
    kinematics: &DerivedKinematics<R>,
    form_factors: &ElasticFormFactors<R>,
    cffs: &CffInputs<R>,
    effective: &CffInputs<R>,
    state: PolarizationState,
) -> HarmonicNumerators<R> {
    let c = R::from_f64;
    let one = R::one();
    let helicity = c(state.helicity().value());
    let target = c(state.target().value());
    let zeta = longitudinal_weight(kinematics);

    let raw = interference_unpolarized(kinematics, form_factors, cffs);
    let raw_effective = interference_unpolarized(kinematics, form_factors, effective);
    let cosine = cosine_weights(kinematics);
    let sine = sine_weights(kinematics);

    let mut numerators = HarmonicNumerators::zero();
    for order in 0..4 {
        numerators.cosine[order] = cosine[order].contract(&raw, &raw_effective, zeta).re;
        numerators.sine[order] = helicity * sine[order].contract(&raw, &raw_effective, zeta).im;
    }

    let polarized = interference_longitudinally_polarized(kinematics, form_factors, cffs).standard;
    let polarized_effective =
        interference_longitudinally_polarized(kinematics, form_factors, effective).standard;

    let x = kinematics.x_bjorken;
    let y = kinematics.y;
    let k = kinematics.k;
    let t_ratio = kinematics.t / kinematics.q_squared;
    let two_minus_y = c(2.0) - y;
    let double_polarization = helicity * target;

    numerators.cosine[0] = numerators.cosine[0]
        - c(8.0)
            * double_polarization
            * y
            * ((two_minus_y * two_minus_y / (one - y) + c(2.0)) * k * k
                + (one - y) * (c(2.0) - x) * t_ratio)
            * polarized.re;
    numerators.cosine[1] = numerators.cosine[1]
        - c(8.0) * double_polarization * k * y * two_minus_y * polarized.re;
    numerators.cosine[2] = numerators.cosine[2]
        - c(16.0) * double_polarization * k * k * y / (c(2.0) - x)
            * polarized_effective.re;
    numerators.sine[1] = numerators.sine[1]
        + c(8.0) * target * k * (c(2.0) - c(2.0) * y + y * y) * polarized.im;
    numerators.sine[2] = numerators.sine[2]
        + c(16.0) * target * k * k * two_minus_y / (c(2.0) - x)
            * polarized_effective.im;

    numerators
}

fn cosine_weights<R: Real>(kinematics: &DerivedKinematics<R>) -> [HarmonicWeights<R>; 4] {
    let c = R::from_f64;
    let one = R::one();
    let s = Shorthand::new(kinematics);
    let Shorthand {
        x,
        y,
        k,
        ee,
        root,
        lepton_factor: yy,
        lepton_factor_root: root_yy,
        t_ratio: tq,
        t_prime_ratio: tpq,
        k_tilde_ratio: ktq,
        two_minus_y: ty,
        weight_squared: w2,
        weight_five_halves: w25,
    } = s;
    let sqrt_two = c(SQRT_TWO);
    let two = c(2.0);
    let recoil = one - (one - two * x) * tq;
    let mixing = c(4.0) * x * (one - x) + ee;

    let zeroth = HarmonicWeights {
        conserving: AngularWeights::new(
            -c(4.0) * ty * (one + root) / w2
                * (ktq * ty * ty / root
                    + tq * yy
                        * (two - x)
                        * (one
                            + (two * x * (two - x + (root - one) / two + ee / (two * x)) * tq + ee)
                                / ((two - x) * (one + root)))),
            c(8.0) * ty / w2
                * x
                * tq
                * (ty * ty / root * ktq
                    + yy * (one + root) / two
                        * (one + tq)
                        * (one + (root - one + two * x) / (one + root) * tq)),
            c(8.0) * ty / w2
                * tq
                * (ty * ty / root * ktq * (one + root - two * x) / two
                    + yy * ((one + root) / two
                        * (one + root - x
                            + (root - one + x * (c(3.0) + root - two * x) / (one + root)) * tq)
                        - two * ktq)),
        ),
        longitudinal: AngularWeights::new(
            c(12.0) * sqrt_two * k * ty * root_yy / w25
                * (ee + (two - c(6.0) * x - ee) / c(3.0) * tq),
            c(24.0) * sqrt_two * k * ty * root_yy / w25 * x * tq * recoil,
            c(4.0) * sqrt_two * k * ty * root_yy / w25
                * tq
                * (c(8.0) - c(6.0) * x + c(5.0) * ee)
                * (one
                    - tq * (two - c(12.0) * x * (one - x) - ee)
                        / (c(8.0) - c(6.0) * x + c(5.0) * ee)),
        ),
    };

    let first = HarmonicWeights {
        conserving: AngularWeights::new(
            -c(16.0) * k * yy / w25
                * ((one + (one - x) * (root - one) / (two * x) + ee / (c(4.0) * x)) * x * tq
                    - c(3.0) * ee / c(4.0))
                - c(4.0) * k * (two - two * y + y * y + ee / two * y * y) * (one + root - ee)
                    / w25
                    * (one - (one - c(3.0) * x) * tq
                        + (one - root + c(3.0) * ee) / (one + root - ee) * x * tq),
            c(16.0) * k / w25
                * x
                * tq
                * (ty * ty * recoil + yy * (one + root - two * x) / two * tpq),
            -c(16.0) * k / w2
                * tq
                * (yy * (recoil + mixing / (c(4.0) * root) * tpq)
                    - ty * ty
                        * (one - x / two
                            + (one + root - two * x) / c(4.0) * (one - tq)
                            + mixing / (two * root) * tpq)),
        ),
        longitudinal: AngularWeights::new(
            c(8.0) * sqrt_two * root_yy / w2
                * (ty * ty * tpq * (one - x + ((one - x) * x + ee / c(4.0)) / root * tpq)
                    + yy / root * recoil * (ee - two * (one + ee / (two * x)) * x * tq)),
            c(16.0) * sqrt_two * root_yy / w25
                * x
                * tq
                * (ktq * ty * ty + recoil * recoil * yy),
            c(8.0) * sqrt_two * root_yy / w25
                * tq
                * (ktq * ty * ty * (one - two * x)
                    + recoil * yy * (c(4.0) - two * x + c(3.0) * ee + tq * mixing)),
        ),
    };

    let second = HarmonicWeights {
        conserving: AngularWeights::new(
            c(8.0) * ty * yy / w2
                * (two * ee / root / (one + root) * ktq
                    + x * tq * tpq * (one - x - (root - one) / two + ee / (two * x))),
            c(8.0) * ty * yy / w2
                * x
                * tq
                * (c(4.0) * ktq / root + (one + root - two * x) / two * (one + tq) * tpq),
            c(4.0) * ty * yy / w2
                * tq
                * (c(4.0) * (one - two * x) * ktq / root
                    - (c(3.0) - root - two * x + ee / x) * x * tpq),
        ),
        longitudinal: AngularWeights::new(
            -c(8.0) * sqrt_two * k * ty * root_yy / w25
                * (one + ee / two)
                * (one + (one + ee / (two * x)) / (one + ee / two) * x * tq),
            c(8.0) * sqrt_two * k * ty * root_yy / w25 * x * tq * recoil,
            c(8.0) * sqrt_two * k * ty * root_yy / w2
                * tq
                * (one - x + tpq / two * mixing / root),
        ),
    };

    let third = HarmonicWeights {
        conserving: AngularWeights::new(
            -c(8.0) * k * yy * (root - one) / w25
                * ((one - x) * tq + (root - one) / two * (one + tq)),
            -c(8.0) * k * yy / w25 * x * tq * (root - one + (one + root - two * x) * tq),
            c(16.0) * k * yy / w25 * tq * tpq * (x * (one - x) + ee / c(4.0)),
        ),
        longitudinal: AngularWeights::zero(),
    };

    [zeroth, first, second, third]
}

/// Beam-odd sine weights, returned without the helicity factor.
fn sine_weights<R: Real>(kinematics: &DerivedKinematics<R>) -> [HarmonicWeights<R>; 4] {
    let c = R::from_f64;
    let one = R::one();
    let s = Shorthand::new(kinematics);
    let two = c(2.0);
    let sqrt_two = c(SQRT_TWO);
    let one_plus_ee = one + s.ee;
    let (x, y, k, root, tq, tpq, ty) = (s.x, s.y, s.k, s.root, s.t_ratio, s.t_prime_ratio, s.two_minus_y);

    let longitudinal_first = c(8.0) * sqrt_two * ty * y * s.lepton_factor_root / s.weight_five_halves
        * s.k_tilde_ratio;

    let first = HarmonicWeights {
        conserving: AngularWeights::new(
            c(8.0) * k * ty * y / one_plus_ee
                * (one + (one - x + (root - one) / two) / one_plus_ee * tpq),
            -c(8.0) * k * ty * y / s.weight_squared
                * x
                * tq
                * (root - one + (one + root - two * x) * tpq),
            c(8.0) * k * ty * y / one_plus_ee
                * tq
                * (one - (one - two * x) * (one + root - two * x) / (two * one_plus_ee) * tpq),
        ),
        longitudinal: AngularWeights::new(longitudinal_first, longitudinal_first * x * tq, R::zero()),
    };

    let second = HarmonicWeights {
        conserving: AngularWeights::new(
            -c(4.0) * y * s.lepton_factor / one_plus_ee.powf(1.5) * (one + root - two * x) / two
                * tpq,
            R::zero(),
            R::zero(),
        ),
        longitudinal: AngularWeights::new(
            c(8.0) * sqrt_two * k * y * s.lepton_factor_root / s.weight_five_halves
                * (one + x * tq),
            R::zero(),
            R::zero(),
        ),
    };

    [HarmonicWeights::zero(), first, second, HarmonicWeights::zero()]
}
