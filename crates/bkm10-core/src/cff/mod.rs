//! Compton form factor inputs and the effective (twist-three) substitution.

use crate::numerics::{Real, lift_complex};
use num_complex::{Complex, Complex64};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CffInputs<R = f64> {
    #[serde(alias = "compton_form_factor_h")]
    pub h: Complex<R>,
    #[serde(alias = "compton_form_factor_h_tilde")]
    pub h_tilde: Complex<R>,
    #[serde(alias = "compton_form_factor_e")]
    pub e: Complex<R>,
    #[serde(alias = "compton_form_factor_e_tilde")]
    pub e_tilde: Complex<R>,
}

impl<R: Real> CffInputs<R> {
    pub fn new(h: Complex<R>, h_tilde: Complex<R>, e: Complex<R>, e_tilde: Complex<R>) -> Self {
        Self {
            h,
            h_tilde,
            e,
            e_tilde,
        }
    }

    pub fn zero() -> Self {
        let zero = Complex::new(R::zero(), R::zero());
        Self::new(zero, zero, zero, zero)
    }

    pub fn map(&self, transform: impl Fn(Complex<R>) -> Complex<R>) -> Self {
        Self::new(
            transform(self.h),
            transform(self.h_tilde),
            transform(self.e),
            transform(self.e_tilde),
        )
    }

    pub fn conjugated(&self) -> Self {
        self.map(|value| value.conj())
    }
}

impl CffInputs<f64> {
    /// Converts plain complex inputs into any numeric backend as constants.
    pub fn lift<R: Real>(&self) -> CffInputs<R> {
        CffInputs::new(
            lift_complex::<R>(self.h),
            lift_complex::<R>(self.h_tilde),
            lift_complex::<R>(self.e),
            lift_complex::<R>(self.e_tilde),
        )
    }

    pub fn from_pairs(h: (f64, f64), h_tilde: (f64, f64), e: (f64, f64), e_tilde: (f64, f64)) -> Self {
        Self::new(
            Complex64::new(h.0, h.1),
            Complex64::new(h_tilde.0, h_tilde.1),
            Complex64::new(e.0, e.1),
            Complex64::new(e_tilde.0, e_tilde.1),
        )
    }
}

/// Effective CFFs entering the longitudinal-photon amplitudes.
///
/// With the Wandzura-Wilczek relation each CFF is rescaled by 2/(1 + ξ);
/// otherwise the substitution is -2ξ/(1 + ξ).
pub fn effective_cffs<R: Real>(cffs: &CffInputs<R>, xi: R, use_ww: bool) -> CffInputs<R> {
    let one = R::one();
    let two = R::from_f64(2.0);
    let factor = if use_ww {
        two / (one + xi)
    } else {
        -two * xi / (one + xi)
    };

    cffs.map(|value| value.scale(factor))
}

#[cfg(test)]
mod tests {
    use super::{CffInputs, effective_cffs};
    use crate::numerics::Dual;
    use num_complex::Complex64;

    const XI: f64 = 0.19906188837146524;

    fn reference_cffs() -> CffInputs {
        CffInputs::from_pairs((-0.897, 2.421), (2.444, 1.131), (-0.541, 0.903), (2.207, 5.383))
    }

    #[test]
    fn wandzura_wilczek_effective_cffs_match_reference_values() {
        let effective = effective_cffs(&reference_cffs(), XI, true);

        let cases = [
            ("H_eff", Complex64::new(-1.4961696451186222, 4.038156868263304), effective.h),
            ("E_eff", Complex64::new(-0.9023721048039851, 1.5061774688317902), effective.e),
            (
                "Ht_eff",
                Complex64::new(4.0765201924971155, 1.8864747699321758),
                effective.h_tilde,
            ),
            (
                "Et_eff",
                Complex64::new(3.6812111558269773, 8.978685841330593),
                effective.e_tilde,
            ),
        ];
        for (label, expected, actual) in cases {
            assert_complex_close(label, expected, actual, 1.0e-7, 1.0e-7);
        }
    }

    #[test]
    fn non_ww_substitution_scales_by_minus_xi() {
        let cffs = reference_cffs();
        let with_ww = effective_cffs(&cffs, XI, true);
        let without_ww = effective_cffs(&cffs, XI, false);

        assert_complex_close("H ratio", with_ww.h * -XI, without_ww.h, 1.0e-14, 1.0e-14);
        assert_complex_close(
            "Et ratio",
            with_ww.e_tilde * -XI,
            without_ww.e_tilde,
            1.0e-14,
            1.0e-14,
        );
    }

    #[test]
    fn conjugation_flips_imaginary_parts_only() {
        let conjugated = reference_cffs().conjugated();
        assert_eq!(conjugated.h, Complex64::new(-0.897, -2.421));
        assert_eq!(conjugated.e_tilde, Complex64::new(2.207, -5.383));
    }

    #[test]
    fn deserializes_pairs_under_long_and_short_names() {
        let short: CffInputs = serde_json::from_str(
            r#"{"h": [-0.897, 2.421], "h_tilde": [2.444, 1.131], "e": [-0.541, 0.903], "e_tilde": [2.207, 5.383]}"#,
        )
        .expect("short names should parse");
        let long: CffInputs = serde_json::from_str(
            r#"{
                "compton_form_factor_h": [-0.897, 2.421],
                "compton_form_factor_h_tilde": [2.444, 1.131],
                "compton_form_factor_e": [-0.541, 0.903],
                "compton_form_factor_e_tilde": [2.207, 5.383]
            }"#,
        )
        .expect("long names should parse");

        assert_eq!(short, reference_cffs());
        assert_eq!(long, reference_cffs());
    }

    #[test]
    fn lifted_inputs_carry_zero_derivatives() {
        let lifted = reference_cffs().lift::<Dual>();
        assert_eq!(lifted.h.re, Dual::constant(-0.897));
        assert_eq!(lifted.e_tilde.im.derivative, 0.0);
    }

    fn assert_complex_close(
        label: &str,
        expected: Complex64,
        actual: Complex64,
        abs_tol: f64,
        rel_tol: f64,
    ) {
        let abs_diff = (actual - expected).norm();
        let rel_diff = abs_diff / expected.norm().max(1.0);
        assert!(
            abs_diff <= abs_tol || rel_diff <= rel_tol,
            "{label} expected=({:.15e},{:.15e}) actual=({:.15e},{:.15e}) abs_diff={:.15e} rel_diff={:.15e}",
            expected.re,
            expected.im,
            actual.re,
            actual.im,
            abs_diff,
            rel_diff,
        );
    }
}
