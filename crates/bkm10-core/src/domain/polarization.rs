//! Beam helicity and target polarization settings.
//!
//! The coefficient assembler only ever sees the four fully polarized states in
//! [`PolarizationState`]. The unpolarized settings live one level up in
//! [`BeamSetting`] and [`TargetSetting`] and are resolved by averaging.

use super::errors::Bkm10Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeptonHelicity {
    Positive,
    Negative,
}

impl LeptonHelicity {
    pub const fn value(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPolarization {
    Positive,
    Negative,
}

impl TargetPolarization {
    pub const fn value(self) -> f64 {
        match self {
            Self::Positive => 0.5,
            Self::Negative => -0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarizationState {
    PlusPlus,
    MinusPlus,
    PlusMinus,
    MinusMinus,
}

impl PolarizationState {
    pub const ALL: [Self; 4] = [
        Self::PlusPlus,
        Self::MinusPlus,
        Self::PlusMinus,
        Self::MinusMinus,
    ];

    pub const fn new(helicity: LeptonHelicity, target: TargetPolarization) -> Self {
        match (helicity, target) {
            (LeptonHelicity::Positive, TargetPolarization::Positive) => Self::PlusPlus,
            (LeptonHelicity::Negative, TargetPolarization::Positive) => Self::MinusPlus,
            (LeptonHelicity::Positive, TargetPolarization::Negative) => Self::PlusMinus,
            (LeptonHelicity::Negative, TargetPolarization::Negative) => Self::MinusMinus,
        }
    }

    pub const fn helicity(self) -> LeptonHelicity {
        match self {
            Self::PlusPlus | Self::PlusMinus => LeptonHelicity::Positive,
            Self::MinusPlus | Self::MinusMinus => LeptonHelicity::Negative,
        }
    }

    pub const fn target(self) -> TargetPolarization {
        match self {
            Self::PlusPlus | Self::MinusPlus => TargetPolarization::Positive,
            Self::PlusMinus | Self::MinusMinus => TargetPolarization::Negative,
        }
    }

    /// Position of this state in [`Self::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::PlusPlus => 0,
            Self::MinusPlus => 1,
            Self::PlusMinus => 2,
            Self::MinusMinus => 3,
        }
    }
}

impl Display for PolarizationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(lambda={:+}, Lambda={:+})",
            self.helicity().value(),
            self.target().value()
        )
    }
}

/// Beam helicity as requested by an observable, including the unpolarized case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeamSetting {
    Polarized(LeptonHelicity),
    Unpolarized,
}

impl BeamSetting {
    pub const POSITIVE: Self = Self::Polarized(LeptonHelicity::Positive);
    pub const NEGATIVE: Self = Self::Polarized(LeptonHelicity::Negative);

    pub const fn value(self) -> f64 {
        match self {
            Self::Polarized(helicity) => helicity.value(),
            Self::Unpolarized => 0.0,
        }
    }
}

impl TryFrom<f64> for BeamSetting {
    type Error = PolarizationConfigurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 1.0 {
            Ok(Self::POSITIVE)
        } else if value == -1.0 {
            Ok(Self::NEGATIVE)
        } else if value == 0.0 {
            Ok(Self::Unpolarized)
        } else {
            Err(PolarizationConfigurationError::LeptonHelicity { value })
        }
    }
}

/// Target polarization as requested by an observable, including the
/// unpolarized case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSetting {
    Polarized(TargetPolarization),
    Unpolarized,
}

impl TargetSetting {
    pub const POSITIVE: Self = Self::Polarized(TargetPolarization::Positive);
    pub const NEGATIVE: Self = Self::Polarized(TargetPolarization::Negative);

    pub const fn value(self) -> f64 {
        match self {
            Self::Polarized(target) => target.value(),
            Self::Unpolarized => 0.0,
        }
    }
}

impl TryFrom<f64> for TargetSetting {
    type Error = PolarizationConfigurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.5 {
            Ok(Self::POSITIVE)
        } else if value == -0.5 {
            Ok(Self::NEGATIVE)
        } else if value == 0.0 {
            Ok(Self::Unpolarized)
        } else {
            Err(PolarizationConfigurationError::TargetPolarization { value })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PolarizationConfigurationError {
    #[error("lepton helicity {value} is not one of -1, 0, +1")]
    LeptonHelicity { value: f64 },
    #[error("target polarization {value} is not one of -0.5, 0, +0.5")]
    TargetPolarization { value: f64 },
}

impl PolarizationConfigurationError {
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::LeptonHelicity { .. } => "POLARIZATION.LEPTON_HELICITY",
            Self::TargetPolarization { .. } => "POLARIZATION.TARGET",
        }
    }
}

impl From<PolarizationConfigurationError> for Bkm10Error {
    fn from(error: PolarizationConfigurationError) -> Self {
        Bkm10Error::polarization(error.placeholder(), error.to_string())
    }
}
