//! Physical constants shared by the BKM10 kernels.
//!
//! Values follow the conventions of the reference Mathematica notebook so that
//! literal cross-checks agree to the last printed digit.

pub const PI: f64 = std::f64::consts::PI;
pub const PI2: f64 = 2.0 * PI;
pub const SQRT_TWO: f64 = std::f64::consts::SQRT_2;

/// Proton mass in GeV.
pub const PROTON_MASS: f64 = 0.938_272_088_16_f64;
pub const PROTON_MASS_SQUARED: f64 = PROTON_MASS * PROTON_MASS;

pub const ALPINV: f64 = 137.035_999_177_f64;
pub const ALPHFS: f64 = 1.0 / ALPINV;

/// (ħc)² converting GeV⁻² into nb.
pub const GEV2_TO_NANOBARN: f64 = 0.389_379e6_f64;

/// Dipole mass squared in GeV² for the Sachs form factors.
pub const DIPOLE_MASS_SQUARED: f64 = 0.710_649_f64;
/// μp in nuclear magnetons (CODATA 2018).
pub const PROTON_MAGNETIC_MOMENT: f64 = 2.792_847_344_62_f64;

#[cfg(test)]
mod tests {
    use super::{
        ALPHFS, ALPINV, DIPOLE_MASS_SQUARED, GEV2_TO_NANOBARN, PI, PI2, PROTON_MAGNETIC_MOMENT,
        PROTON_MASS, PROTON_MASS_SQUARED, SQRT_TWO,
    };

    #[test]
    fn constants_match_expected_relationships() {
        assert!((PI2 - 2.0 * PI).abs() <= 1.0e-15);
        assert!((SQRT_TWO * SQRT_TWO - 2.0).abs() <= 1.0e-15);
        assert!((ALPHFS - 1.0 / ALPINV).abs() <= f64::EPSILON);
        assert!((PROTON_MASS_SQUARED - PROTON_MASS * PROTON_MASS).abs() <= f64::EPSILON);
    }

    #[test]
    fn magnetic_moment_carries_codata_digits() {
        assert_eq!(PROTON_MAGNETIC_MOMENT, 2.79284734462);
    }

    #[test]
    fn physics_constants_remain_finite_and_positive() {
        for value in [
            PROTON_MASS,
            ALPINV,
            GEV2_TO_NANOBARN,
            DIPOLE_MASS_SQUARED,
            PROTON_MAGNETIC_MOMENT,
        ] {
            assert!(value.is_finite());
            assert!(value > 0.0);
        }
    }
}
