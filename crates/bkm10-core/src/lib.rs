//! BKM10 four-fold DVCS cross section.
//!
//! Kinematics and CFFs flow through [`kinematics::derive_kinematics`] and
//! [`formalism::BkmFormalism`] into the polarization-combined observables of
//! [`observables::CrossSection`]. Every kernel is generic over
//! [`numerics::Real`], so the same code runs on `f64` and on the
//! forward-mode [`numerics::Dual`].

pub mod cff;
pub mod common;
pub mod config;
pub mod domain;
pub mod formalism;
pub mod kinematics;
pub mod numerics;
pub mod observables;

pub use cff::{CffInputs, effective_cffs};
pub use config::{
    BackendComposer, Bkm10Configuration, ConfigurationError, ConfigurationLoadError,
    load_configuration, validate_configuration,
};
pub use domain::{
    BeamSetting, Bkm10Error, Bkm10ErrorCategory, PolarizationState, TargetSetting,
};
pub use formalism::{BkmFormalism, ContributionToggles, FormalismSettings, Harmonic};
pub use kinematics::{DerivedKinematics, KinematicDomainError, KinematicInputs, derive_kinematics};
pub use numerics::{Dual, NumericBackend, Real};
pub use observables::{
    AngleConvention, AngleConventionParseError, BatchPoint, CrossSection, ObservableError,
    ObservableSettings, evaluate_batch,
};
