//! Cross section composer: four polarized formalisms combined into the cross
//! section and the beam-spin, target-spin and double-spin asymmetries.
//!
//! Azimuthal angles are in radians. The Trento shift φ → π − φ is applied
//! once, here, before any coefficient is evaluated.

pub mod combine;

pub use combine::{BaseSigmas, combine};

use crate::cff::CffInputs;
use crate::common::constants::{GEV2_TO_NANOBARN, PI};
use crate::domain::errors::Bkm10Error;
use crate::domain::polarization::{
    BeamSetting, PolarizationConfigurationError, PolarizationState, TargetSetting,
};
use crate::formalism::{BkmFormalism, ContributionToggles, FormalismSettings};
use crate::kinematics::{KinematicDomainError, KinematicInputs, derive_kinematics};
use crate::numerics::Real;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleConvention {
    /// Experimental frame; φ is mapped to π − φ before evaluation.
    #[default]
    Trento,
    /// φ is already the BKM azimuth.
    Bkm,
}

impl AngleConvention {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trento => "trento",
            Self::Bkm => "bkm",
        }
    }

    pub fn to_bkm_frame<R: Real>(self, phi: R) -> R {
        match self {
            Self::Trento => R::from_f64(PI) - phi,
            Self::Bkm => phi,
        }
    }
}

impl FromStr for AngleConvention {
    type Err = AngleConventionParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trento" => Ok(Self::Trento),
            "bkm" => Ok(Self::Bkm),
            _ => Err(AngleConventionParseError::Unrecognized {
                name: name.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AngleConventionParseError {
    #[error("unrecognized angle convention '{name}', expected 'trento' or 'bkm'")]
    Unrecognized { name: String },
}

impl From<AngleConventionParseError> for Bkm10Error {
    fn from(error: AngleConventionParseError) -> Self {
        Bkm10Error::configuration("OBSERVABLE.ANGLE_CONVENTION", error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObservableSettings {
    pub use_ww: bool,
    pub toggles: ContributionToggles,
    pub angle_convention: AngleConvention,
}

impl ObservableSettings {
    fn formalism_settings(self) -> FormalismSettings {
        FormalismSettings {
            use_ww: self.use_ww,
            toggles: self.toggles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObservableError {
    #[error(transparent)]
    Kinematics(#[from] KinematicDomainError),
    #[error(transparent)]
    Polarization(#[from] PolarizationConfigurationError),
    #[error("{observable} denominator vanished at phi = {phi}")]
    VanishingDenominator { observable: &'static str, phi: f64 },
    #[error("batch point {index} failed: {source}")]
    BatchPoint {
        index: usize,
        #[source]
        source: Box<ObservableError>,
    },
}

impl From<ObservableError> for Bkm10Error {
    fn from(error: ObservableError) -> Self {
        match error {
            ObservableError::Kinematics(source) => source.into(),
            ObservableError::Polarization(source) => source.into(),
            ObservableError::VanishingDenominator { .. } => {
                Bkm10Error::kinematic_domain("OBSERVABLE.DENOMINATOR", error.to_string())
            }
            ObservableError::BatchPoint { index, source } => {
                let inner = Bkm10Error::from(*source);
                Bkm10Error::new(
                    inner.category(),
                    inner.placeholder(),
                    format!("batch point {index}: {}", inner.message()),
                )
            }
        }
    }
}

/// Four coefficient assemblers, one per polarization state, sharing the same
/// kinematics and CFFs.
#[derive(Debug, Clone)]
pub struct CrossSection<R> {
    formalisms: [BkmFormalism<R>; 4],
    angle_convention: AngleConvention,
}

impl<R: Real> CrossSection<R> {
    pub fn new(
        inputs: &KinematicInputs,
        cffs: &CffInputs<R>,
        settings: ObservableSettings,
    ) -> Result<Self, KinematicDomainError> {
        let kinematics = derive_kinematics::<R>(inputs)?;
        debug!(
            q_squared = inputs.q_squared,
            x_bjorken = inputs.x_bjorken,
            t = inputs.t,
            lepton_energy = inputs.lepton_energy,
            angle_convention = settings.angle_convention.as_str(),
            "building cross section composer"
        );

        let formalism_settings = settings.formalism_settings();
        let formalisms = PolarizationState::ALL
            .map(|state| BkmFormalism::new(kinematics, cffs, state, formalism_settings));

        Ok(Self {
            formalisms,
            angle_convention: settings.angle_convention,
        })
    }

    pub fn formalism(&self, state: PolarizationState) -> &BkmFormalism<R> {
        &self.formalisms[state.index()]
    }

    pub fn angle_convention(&self) -> AngleConvention {
        self.angle_convention
    }

    pub fn prefactor(&self) -> R {
        self.formalism(PolarizationState::PlusPlus).prefactor()
    }

    /// Harmonic sums of the four states at one input angle, without the
    /// prefactor or unit conversion.
    pub fn base_sigmas(&self, phi: R) -> Result<BaseSigmas<R>, KinematicDomainError> {
        let bkm_phi = self.angle_convention.to_bkm_frame(phi);
        BaseSigmas::try_from_fn(|state| self.formalism(state).harmonic_sum(bkm_phi))
    }

    /// Cross section in nb/GeV⁴ at each angle.
    pub fn cross_section(
        &self,
        phi: &[R],
        beam: BeamSetting,
        target: TargetSetting,
    ) -> Result<Vec<R>, ObservableError> {
        trace!(points = phi.len(), beam = beam.value(), target = target.value(), "cross section grid");
        let scale = R::from_f64(GEV2_TO_NANOBARN) * self.prefactor();

        phi.iter()
            .map(|angle| {
                let sigmas = self.base_sigmas(*angle)?;
                Ok(scale * combine(beam, target, &sigmas))
            })
            .collect()
    }

    /// Same as [`Self::cross_section`] with raw λ ∈ {−1, 0, +1} and
    /// Λ ∈ {−0.5, 0, +0.5}.
    pub fn cross_section_from_values(
        &self,
        phi: &[R],
        helicity: f64,
        polarization: f64,
    ) -> Result<Vec<R>, ObservableError> {
        let beam = BeamSetting::try_from(helicity)?;
        let target = TargetSetting::try_from(polarization)?;
        self.cross_section(phi, beam, target)
    }

    pub fn bsa(&self, phi: &[R], target: TargetSetting) -> Result<Vec<R>, ObservableError> {
        trace!(points = phi.len(), target = target.value(), "beam-spin asymmetry grid");
        self.asymmetry(phi, "beam-spin asymmetry", |sigmas| {
            let positive = combine(BeamSetting::POSITIVE, target, sigmas);
            let negative = combine(BeamSetting::NEGATIVE, target, sigmas);
            (positive - negative, positive + negative)
        })
    }

    pub fn tsa(&self, phi: &[R], beam: BeamSetting) -> Result<Vec<R>, ObservableError> {
        trace!(points = phi.len(), beam = beam.value(), "target-spin asymmetry grid");
        self.asymmetry(phi, "target-spin asymmetry", |sigmas| {
            let positive = combine(beam, TargetSetting::POSITIVE, sigmas);
            let negative = combine(beam, TargetSetting::NEGATIVE, sigmas);
            (positive - negative, positive + negative)
        })
    }

    pub fn dsa(&self, phi: &[R]) -> Result<Vec<R>, ObservableError> {
        trace!(points = phi.len(), "double-spin asymmetry grid");
        self.asymmetry(phi, "double-spin asymmetry", |sigmas| {
            let numerator = (sigmas.get(PolarizationState::PlusPlus)
                - sigmas.get(PolarizationState::PlusMinus))
                - (sigmas.get(PolarizationState::MinusPlus)
                    - sigmas.get(PolarizationState::MinusMinus));
            (numerator, sigmas.total())
        })
    }

    fn asymmetry(
        &self,
        phi: &[R],
        observable: &'static str,
        ratio: impl Fn(&BaseSigmas<R>) -> (R, R),
    ) -> Result<Vec<R>, ObservableError> {
        phi.iter()
            .map(|angle| {
                let sigmas = self.base_sigmas(*angle)?;
                let (numerator, denominator) = ratio(&sigmas);
                let value = denominator.value();
                if value == 0.0 || !value.is_finite() {
                    return Err(ObservableError::VanishingDenominator {
                        observable,
                        phi: angle.value(),
                    });
                }
                Ok(numerator / denominator)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchPoint<R = f64> {
    pub kinematics: KinematicInputs,
    pub cffs: CffInputs<R>,
}

/// Cross sections for many kinematic/CFF points over one shared φ grid. Any
/// failing point fails the whole batch.
pub fn evaluate_batch<R: Real>(
    points: &[BatchPoint<R>],
    phi: &[R],
    beam: BeamSetting,
    target: TargetSetting,
    settings: ObservableSettings,
) -> Result<Vec<Vec<R>>, ObservableError> {
    debug!(points = points.len(), angles = phi.len(), "evaluating batch");

    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            CrossSection::new(&point.kinematics, &point.cffs, settings)
                .map_err(ObservableError::from)
                .and_then(|cross_section| cross_section.cross_section(phi, beam, target))
                .map_err(|source| ObservableError::BatchPoint {
                    index,
                    source: Box::new(source),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        AngleConvention, AngleConventionParseError, BatchPoint, CrossSection, ObservableError,
        ObservableSettings, evaluate_batch,
    };
    use crate::cff::CffInputs;
    use crate::common::constants::PI;
    use crate::domain::errors::{Bkm10Error, Bkm10ErrorCategory};
    use crate::domain::polarization::{BeamSetting, PolarizationConfigurationError, TargetSetting};
    use crate::kinematics::{KinematicDomainError, KinematicInputs};

    fn reference_cffs() -> CffInputs {
        CffInputs::from_pairs((-0.897, 2.421), (2.444, 1.131), (-0.541, 0.903), (2.207, 5.383))
    }

    fn reference_cross_section(angle_convention: AngleConvention) -> CrossSection<f64> {
        CrossSection::new(
            &KinematicInputs::new(5.75, 1.82, 0.34, -0.17),
            &reference_cffs(),
            ObservableSettings {
                use_ww: true,
                angle_convention,
                ..ObservableSettings::default()
            },
        )
        .expect("composer")
    }

    #[test]
    fn angle_conventions_differ_by_the_trento_shift() {
        let trento = reference_cross_section(AngleConvention::Trento);
        let bkm = reference_cross_section(AngleConvention::Bkm);

        let angles = [0.25, 1.4];
        let shifted: Vec<f64> = angles.iter().map(|angle| PI - angle).collect();
        assert_eq!(
            trento
                .cross_section(&angles, BeamSetting::POSITIVE, TargetSetting::NEGATIVE)
                .expect("trento"),
            bkm.cross_section(&shifted, BeamSetting::POSITIVE, TargetSetting::NEGATIVE)
                .expect("bkm")
        );
        assert_eq!("BKM".parse::<AngleConvention>(), Ok(AngleConvention::Bkm));
    }

    #[test]
    fn unknown_angle_convention_is_a_configuration_error() {
        let error = "lab".parse::<AngleConvention>().unwrap_err();
        assert_eq!(
            error,
            AngleConventionParseError::Unrecognized {
                name: "lab".to_string()
            }
        );
        assert!(error.to_string().contains("'lab'"));

        let converted: Bkm10Error = error.into();
        assert_eq!(converted.exit_code(), 2);
        assert_eq!(converted.placeholder(), "OBSERVABLE.ANGLE_CONVENTION");
    }

    #[test]
    fn raw_polarization_values_are_validated() {
        let cross_section = reference_cross_section(AngleConvention::Trento);
        let angles = [0.0, 1.0];

        assert_eq!(
            cross_section.cross_section_from_values(&angles, 0.0, 0.0),
            cross_section.cross_section(&angles, BeamSetting::Unpolarized, TargetSetting::Unpolarized)
        );
        assert_eq!(
            cross_section.cross_section_from_values(&angles, 0.5, 0.0),
            Err(ObservableError::Polarization(
                PolarizationConfigurationError::LeptonHelicity { value: 0.5 }
            ))
        );

        let error: Bkm10Error = cross_section
            .cross_section_from_values(&angles, 1.0, 1.0)
            .expect_err("target polarization 1.0 is illegal")
            .into();
        assert_eq!(error.category(), Bkm10ErrorCategory::PolarizationConfigurationError);
        assert_eq!(error.exit_code(), 4);
    }

    #[test]
    fn prefactor_is_shared_by_all_states() {
        let cross_section = reference_cross_section(AngleConvention::Trento);
        let reference = cross_section.prefactor();
        for state in crate::domain::polarization::PolarizationState::ALL {
            let prefactor = cross_section.formalism(state).prefactor();
            assert!(((prefactor - reference) / reference).abs() <= 1.0e-9);
        }
    }

    #[test]
    fn batch_failure_reports_the_offending_point() {
        let good = BatchPoint {
            kinematics: KinematicInputs::new(5.75, 1.82, 0.34, -0.17),
            cffs: reference_cffs(),
        };
        let bad = BatchPoint {
            kinematics: KinematicInputs::new(5.75, -1.0, 0.34, -0.17),
            cffs: reference_cffs(),
        };

        let angles = [0.0, PI];
        let values = evaluate_batch(
            &[good, good],
            &angles,
            BeamSetting::Unpolarized,
            TargetSetting::Unpolarized,
            ObservableSettings::default(),
        )
        .expect("batch");
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], values[1]);

        let error = evaluate_batch(
            &[good, bad],
            &angles,
            BeamSetting::Unpolarized,
            TargetSetting::Unpolarized,
            ObservableSettings::default(),
        )
        .expect_err("negative Q^2 should fail the batch");
        assert_eq!(
            error,
            ObservableError::BatchPoint {
                index: 1,
                source: Box::new(ObservableError::Kinematics(
                    KinematicDomainError::NonPositiveVirtuality { q_squared: -1.0 }
                )),
            }
        );

        let converted: Bkm10Error = error.into();
        assert_eq!(converted.category(), Bkm10ErrorCategory::KinematicDomainError);
        assert_eq!(converted.placeholder(), "KINEMATICS.Q_SQUARED");
        assert!(converted.message().starts_with("batch point 1:"));
    }

    #[test]
    fn asymmetry_with_all_contributions_disabled_reports_vanishing_denominator() {
        let cross_section = CrossSection::new(
            &KinematicInputs::new(5.75, 1.82, 0.34, -0.17),
            &reference_cffs(),
            ObservableSettings {
                toggles: crate::formalism::ContributionToggles {
                    bethe_heitler: false,
                    dvcs: false,
                    interference: false,
                },
                ..ObservableSettings::default()
            },
        )
        .expect("composer");

        let error = cross_section.dsa(&[0.4]).expect_err("zero cross section");
        assert!(matches!(
            error,
            ObservableError::VanishingDenominator {
                observable: "double-spin asymmetry",
                ..
            }
        ));
    }
}
