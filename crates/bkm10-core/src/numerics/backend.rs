//! Scalar abstraction over the two numeric backends.
//!
//! Every kernel in this crate is generic over [`Real`], so the same derivation
//! runs on plain `f64` and on the forward-mode [`Dual`](super::dual::Dual)
//! type without any process-wide switch.

use crate::domain::errors::Bkm10Error;
use num_complex::{Complex, Complex64};
use num_traits::Num;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Neg;
use std::str::FromStr;

/// `Num` brings `zero`/`one` and the operator set `Complex<R>` needs for its
/// own arithmetic, so kernels use `num-complex` operators directly.
pub trait Real: Num + Copy + Debug + Neg<Output = Self> {
    fn from_f64(value: f64) -> Self;

    /// Primal value, used for domain checks and branch decisions.
    fn value(self) -> f64;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn sqrt(self) -> Self;
    fn powi(self, exponent: i32) -> Self;
    fn powf(self, exponent: f64) -> Self;
}

impl Real for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn value(self) -> f64 {
        self
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn powi(self, exponent: i32) -> Self {
        f64::powi(self, exponent)
    }

    fn powf(self, exponent: f64) -> Self {
        f64::powf(self, exponent)
    }
}

pub fn lift_complex<R: Real>(value: Complex64) -> Complex<R> {
    Complex::new(R::from_f64(value.re), R::from_f64(value.im))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumericBackend {
    #[default]
    Standard,
    Differentiable,
}

impl NumericBackend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Differentiable => "differentiable",
        }
    }
}

impl Display for NumericBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for NumericBackend {
    type Err = NumericBackendError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "numpy" => Ok(Self::Standard),
            "differentiable" | "tensorflow" => Ok(Self::Differentiable),
            _ => Err(NumericBackendError::Unrecognized {
                name: name.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericBackendError {
    #[error("unrecognized numeric backend '{name}' (expected 'standard' or 'differentiable')")]
    Unrecognized { name: String },
}

impl From<NumericBackendError> for Bkm10Error {
    fn from(error: NumericBackendError) -> Self {
        Bkm10Error::numeric_backend("BACKEND.NAME", error.to_string())
    }
}
