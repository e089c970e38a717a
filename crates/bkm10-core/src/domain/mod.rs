pub mod errors;
pub mod polarization;

pub use errors::{Bkm10Error, Bkm10ErrorCategory, ExitClassification};
pub use polarization::{
    BeamSetting, LeptonHelicity, PolarizationConfigurationError, PolarizationState,
    TargetPolarization, TargetSetting,
};
