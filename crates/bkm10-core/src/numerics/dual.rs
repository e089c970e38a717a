//! Forward-mode automatic differentiation scalar.
//!
//! A [`Dual`] carries a value and its derivative with respect to one seeded
//! input. Running the cross-section pipeline on `Dual` yields the observable
//! together with its sensitivity to that input, which is what a trainable CFF
//! model needs.

use super::backend::Real;
use num_traits::{Num, One, Zero};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual {
    pub value: f64,
    pub derivative: f64,
}

impl Dual {
    pub const fn new(value: f64, derivative: f64) -> Self {
        Self { value, derivative }
    }

    pub const fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Seeds `value` as the differentiation variable.
    pub const fn variable(value: f64) -> Self {
        Self::new(value, 1.0)
    }
}

impl Add for Dual {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value, self.derivative + rhs.derivative)
    }
}

impl Sub for Dual {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value, self.derivative - rhs.derivative)
    }
}

impl Mul for Dual {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.derivative * rhs.value + self.value * rhs.derivative,
        )
    }
}

impl Div for Dual {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let denominator = rhs.value * rhs.value;
        Self::new(
            self.value / rhs.value,
            (self.derivative * rhs.value - self.value * rhs.derivative) / denominator,
        )
    }
}

impl Neg for Dual {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value, -self.derivative)
    }
}

impl Rem for Dual {
    type Output = Self;

    /// `a % b = a - b·trunc(a/b)`; the truncated quotient is locally constant.
    fn rem(self, rhs: Self) -> Self {
        let quotient = (self.value / rhs.value).trunc();
        Self::new(
            self.value % rhs.value,
            self.derivative - quotient * rhs.derivative,
        )
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Self::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0.0 && self.derivative == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Self::constant(1.0)
    }
}

impl Num for Dual {
    type FromStrRadixErr = <f64 as Num>::FromStrRadixErr;

    fn from_str_radix(source: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        f64::from_str_radix(source, radix).map(Self::constant)
    }
}

impl Real for Dual {
    fn from_f64(value: f64) -> Self {
        Self::constant(value)
    }

    fn value(self) -> f64 {
        self.value
    }

    fn sin(self) -> Self {
        Self::new(self.value.sin(), self.value.cos() * self.derivative)
    }

    fn cos(self) -> Self {
        Self::new(self.value.cos(), -self.value.sin() * self.derivative)
    }

    fn sqrt(self) -> Self {
        let root = self.value.sqrt();
        // d/dx sqrt(x) diverges at x = 0; a constant there stays a constant.
        let derivative = if self.derivative == 0.0 {
            0.0
        } else {
            self.derivative / (2.0 * root)
        };
        Self::new(root, derivative)
    }

    fn powi(self, exponent: i32) -> Self {
        if exponent == 0 {
            return Self::constant(1.0);
        }
        let lowered = self.value.powi(exponent - 1);
        Self::new(
            lowered * self.value,
            f64::from(exponent) * lowered * self.derivative,
        )
    }

    fn powf(self, exponent: f64) -> Self {
        if exponent == 0.0 {
            return Self::constant(1.0);
        }
        Self::new(
            self.value.powf(exponent),
            exponent * self.value.powf(exponent - 1.0) * self.derivative,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Dual;
    use crate::numerics::backend::Real;
    use num_complex::Complex;
    use num_traits::{Num, One, Zero};

    #[test]
    fn arithmetic_follows_product_and_quotient_rules() {
        let x = Dual::variable(1.5);
        let c = Dual::constant(4.0);

        let product = x * x * c;
        assert_scalar_close("x^2 c", 9.0, product.value, 1.0e-15, 1.0e-15);
        assert_scalar_close("d(x^2 c)", 12.0, product.derivative, 1.0e-15, 1.0e-15);

        let quotient = c / x;
        assert_scalar_close("c/x", 4.0 / 1.5, quotient.value, 1.0e-15, 1.0e-15);
        assert_scalar_close(
            "d(c/x)",
            -4.0 / (1.5 * 1.5),
            quotient.derivative,
            1.0e-15,
            1.0e-15,
        );

        let negated = -(x - c);
        assert_eq!(negated, Dual::new(2.5, -1.0));
    }

    #[test]
    fn elementary_functions_match_analytic_derivatives() {
        let x = Dual::variable(0.8);

        let sine = x.sin();
        assert_scalar_close("d sin", 0.8_f64.cos(), sine.derivative, 1.0e-15, 1.0e-15);

        let cosine = x.cos();
        assert_scalar_close("d cos", -0.8_f64.sin(), cosine.derivative, 1.0e-15, 1.0e-15);

        let root = x.sqrt();
        assert_scalar_close(
            "d sqrt",
            0.5 / 0.8_f64.sqrt(),
            root.derivative,
            1.0e-15,
            1.0e-15,
        );

        let cube = x.powi(3);
        assert_scalar_close("x^3", 0.512, cube.value, 1.0e-15, 1.0e-15);
        assert_scalar_close("d x^3", 3.0 * 0.64, cube.derivative, 1.0e-15, 1.0e-14);

        let inverse_square = x.powi(-2);
        assert_scalar_close(
            "d x^-2",
            -2.0 / 0.8_f64.powi(3),
            inverse_square.derivative,
            1.0e-14,
            1.0e-14,
        );

        let fractional = x.powf(2.5);
        assert_scalar_close(
            "d x^2.5",
            2.5 * 0.8_f64.powf(1.5),
            fractional.derivative,
            1.0e-15,
            1.0e-14,
        );
    }

    #[test]
    fn constants_carry_no_derivative_through_sqrt_of_zero() {
        let root = Dual::constant(0.0).sqrt();
        assert_eq!(root, Dual::constant(0.0));
        assert_eq!(Dual::constant(3.0).powi(0), Dual::constant(1.0));
    }

    #[test]
    fn num_traits_identities_are_constants() {
        assert_eq!(Dual::zero(), Dual::constant(0.0));
        assert_eq!(Dual::one(), Dual::constant(1.0));
        assert!(Dual::zero().is_zero());
        assert!(!Dual::variable(0.0).is_zero());
        assert_eq!(
            Dual::from_str_radix("2.5", 10).expect("decimal literal"),
            Dual::constant(2.5)
        );
        assert!(Dual::from_str_radix("not a number", 10).is_err());

        let remainder = Dual::variable(7.5) % Dual::constant(2.0);
        assert_eq!(remainder, Dual::new(1.5, 1.0));
    }

    #[test]
    fn complex_arithmetic_propagates_derivatives() {
        let x = Dual::variable(0.5);
        let a = Complex::new(x, Dual::constant(2.0));
        let b = Complex::new(Dual::constant(3.0), x);

        // (x + 2i)(3 + xi) = (3x - 2x) + (x² + 6)i
        let product = a * b;
        assert_eq!(product.re, Dual::new(0.5, 1.0));
        assert_scalar_close("Im", 6.25, product.im.value, 1.0e-15, 1.0e-15);
        assert_scalar_close("d Im", 1.0, product.im.derivative, 1.0e-15, 1.0e-15);

        let conjugated = a.conj().scale(Dual::constant(2.0));
        assert_eq!(conjugated.im, Dual::constant(-4.0));
        assert_eq!(conjugated.re, Dual::new(1.0, 2.0));
    }

    fn assert_scalar_close(label: &str, expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) {
        let abs_diff = (actual - expected).abs();
        let rel_diff = abs_diff / expected.abs().max(1.0);
        assert!(
            abs_diff <= abs_tol || rel_diff <= rel_tol,
            "{label} expected={expected:.15e} actual={actual:.15e} abs_diff={abs_diff:.15e} rel_diff={rel_diff:.15e} abs_tol={abs_tol:.15e} rel_tol={rel_tol:.15e}"
        );
    }
}
