//! Configuration validation and JSON configuration files.
//!
//! A configuration is a JSON object with a `kinematics` object and a
//! `cff_inputs` object (each CFF as `[re, im]`), plus optional flags.
//! Validation returns a typed error for every expected mistake.

use crate::cff::CffInputs;
use crate::domain::errors::Bkm10Error;
use crate::domain::polarization::{BeamSetting, TargetSetting};
use crate::formalism::ContributionToggles;
use crate::kinematics::{KinematicDomainError, KinematicInputs};
use crate::numerics::{Dual, NumericBackend, NumericBackendError, Real};
use crate::observables::{
    AngleConvention, AngleConventionParseError, CrossSection, ObservableError, ObservableSettings,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const KINEMATICS_KEY: &str = "kinematics";
pub const CFF_INPUTS_KEY: &str = "cff_inputs";
pub const USING_WW_KEY: &str = "using_ww";
pub const BH_SETTING_KEY: &str = "bh_setting";
pub const DVCS_SETTING_KEY: &str = "dvcs_setting";
pub const INTERFERENCE_SETTING_KEY: &str = "interference_setting";
pub const ANGLE_CONVENTION_KEY: &str = "angle_convention";
pub const BACKEND_KEY: &str = "backend";

#[derive(Debug, Clone, PartialEq)]
pub struct Bkm10Configuration {
    pub kinematics: KinematicInputs,
    pub cff_inputs: CffInputs,
    pub using_ww: bool,
    pub toggles: ContributionToggles,
    pub angle_convention: AngleConvention,
    pub backend: NumericBackend,
}

impl Bkm10Configuration {
    pub fn new(kinematics: KinematicInputs, cff_inputs: CffInputs) -> Self {
        Self {
            kinematics,
            cff_inputs,
            using_ww: false,
            toggles: ContributionToggles::default(),
            angle_convention: AngleConvention::default(),
            backend: NumericBackend::default(),
        }
    }

    pub fn observable_settings(&self) -> ObservableSettings {
        ObservableSettings {
            use_ww: self.using_ww,
            toggles: self.toggles,
            angle_convention: self.angle_convention,
        }
    }

    /// Builds the composer with the CFFs lifted into the requested backend.
    pub fn cross_section<R: Real>(&self) -> Result<CrossSection<R>, KinematicDomainError> {
        CrossSection::new(
            &self.kinematics,
            &self.cff_inputs.lift::<R>(),
            self.observable_settings(),
        )
    }

    /// Builds the composer on the backend named by the `backend` key.
    pub fn composer(&self) -> Result<BackendComposer, KinematicDomainError> {
        debug!(backend = %self.backend, "building composer");
        Ok(match self.backend {
            NumericBackend::Standard => BackendComposer::Standard(self.cross_section::<f64>()?),
            NumericBackend::Differentiable => {
                BackendComposer::Differentiable(self.cross_section::<Dual>()?)
            }
        })
    }
}

/// A composer on whichever backend the configuration selected. Results are
/// reported as primal `f64` values on both.
#[derive(Debug, Clone)]
pub enum BackendComposer {
    Standard(CrossSection<f64>),
    Differentiable(CrossSection<Dual>),
}

impl BackendComposer {
    pub const fn backend(&self) -> NumericBackend {
        match self {
            Self::Standard(_) => NumericBackend::Standard,
            Self::Differentiable(_) => NumericBackend::Differentiable,
        }
    }

    pub fn cross_section(
        &self,
        phi: &[f64],
        beam: BeamSetting,
        target: TargetSetting,
    ) -> Result<Vec<f64>, ObservableError> {
        match self {
            Self::Standard(composer) => composer.cross_section(phi, beam, target),
            Self::Differentiable(composer) => composer
                .cross_section(&constants(phi), beam, target)
                .map(primal),
        }
    }

    pub fn bsa(&self, phi: &[f64], target: TargetSetting) -> Result<Vec<f64>, ObservableError> {
        match self {
            Self::Standard(composer) => composer.bsa(phi, target),
            Self::Differentiable(composer) => composer.bsa(&constants(phi), target).map(primal),
        }
    }

    pub fn tsa(&self, phi: &[f64], beam: BeamSetting) -> Result<Vec<f64>, ObservableError> {
        match self {
            Self::Standard(composer) => composer.tsa(phi, beam),
            Self::Differentiable(composer) => composer.tsa(&constants(phi), beam).map(primal),
        }
    }

    pub fn dsa(&self, phi: &[f64]) -> Result<Vec<f64>, ObservableError> {
        match self {
            Self::Standard(composer) => composer.dsa(phi),
            Self::Differentiable(composer) => composer.dsa(&constants(phi)).map(primal),
        }
    }
}

fn constants(phi: &[f64]) -> Vec<Dual> {
    phi.iter().copied().map(Dual::constant).collect()
}

fn primal(values: Vec<Dual>) -> Vec<f64> {
    values.into_iter().map(|value| value.value).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("configuration must be a JSON object")]
    NotAnObject,
    #[error("configuration is missing required key '{key}'")]
    MissingKey { key: &'static str },
    #[error("configuration key '{key}' is not a valid {expected}: {source}")]
    MistypedKey {
        key: &'static str,
        expected: &'static str,
        source: serde_json::Error,
    },
    #[error("configuration key '{key}' = {value} violates {constraint}")]
    OutOfRange {
        key: &'static str,
        value: f64,
        constraint: &'static str,
    },
    #[error(transparent)]
    Backend(#[from] NumericBackendError),
    #[error(transparent)]
    AngleConvention(#[from] AngleConventionParseError),
}

impl ConfigurationError {
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::NotAnObject => "CONFIG.ROOT",
            Self::MissingKey { .. } => "CONFIG.MISSING_KEY",
            Self::MistypedKey { .. } => "CONFIG.MISTYPED_KEY",
            Self::OutOfRange { .. } => "CONFIG.OUT_OF_RANGE",
            Self::Backend(_) => "BACKEND.NAME",
            Self::AngleConvention(_) => "OBSERVABLE.ANGLE_CONVENTION",
        }
    }
}

impl From<ConfigurationError> for Bkm10Error {
    fn from(error: ConfigurationError) -> Self {
        match error {
            ConfigurationError::Backend(source) => source.into(),
            ConfigurationError::AngleConvention(source) => source.into(),
            other => Bkm10Error::configuration(other.placeholder(), other.to_string()),
        }
    }
}

pub fn validate_configuration(
    configuration: &Value,
) -> Result<Bkm10Configuration, ConfigurationError> {
    let object = configuration
        .as_object()
        .ok_or(ConfigurationError::NotAnObject)?;

    let kinematics: KinematicInputs = required(object, KINEMATICS_KEY, "kinematics object")?;
    check_kinematic_ranges(&kinematics)?;
    let cff_inputs: CffInputs = required(object, CFF_INPUTS_KEY, "CFF object of [re, im] pairs")?;

    let toggles = ContributionToggles {
        bethe_heitler: optional(object, BH_SETTING_KEY, "boolean")?.unwrap_or(true),
        dvcs: optional(object, DVCS_SETTING_KEY, "boolean")?.unwrap_or(true),
        interference: optional(object, INTERFERENCE_SETTING_KEY, "boolean")?.unwrap_or(true),
    };
    let backend = match optional::<String>(object, BACKEND_KEY, "backend name")? {
        Some(name) => name.parse::<NumericBackend>()?,
        None => NumericBackend::default(),
    };
    let angle_convention = match optional::<String>(object, ANGLE_CONVENTION_KEY, "angle convention name")? {
        Some(name) => name.parse::<AngleConvention>()?,
        None => AngleConvention::default(),
    };

    let configuration = Bkm10Configuration {
        kinematics,
        cff_inputs,
        using_ww: optional(object, USING_WW_KEY, "boolean")?.unwrap_or(false),
        toggles,
        angle_convention,
        backend,
    };
    debug!(
        using_ww = configuration.using_ww,
        backend = %configuration.backend,
        "validated configuration"
    );

    Ok(configuration)
}

fn required<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &'static str,
    expected: &'static str,
) -> Result<T, ConfigurationError> {
    optional(object, key, expected)?.ok_or(ConfigurationError::MissingKey { key })
}

fn optional<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigurationError> {
    object
        .get(key)
        .map(|value| {
            T::deserialize(value).map_err(|source| ConfigurationError::MistypedKey {
                key,
                expected,
                source,
            })
        })
        .transpose()
}

fn check_kinematic_ranges(kinematics: &KinematicInputs) -> Result<(), ConfigurationError> {
    let checks = [
        (
            "kinematics.q_squared",
            kinematics.q_squared,
            kinematics.q_squared > 0.0,
            "Q^2 > 0",
        ),
        (
            "kinematics.x_bjorken",
            kinematics.x_bjorken,
            kinematics.x_bjorken > 0.0 && kinematics.x_bjorken < 1.0,
            "0 < x_B < 1",
        ),
        (
            "kinematics.lepton_energy",
            kinematics.lepton_energy,
            kinematics.lepton_energy > 0.0,
            "k > 0",
        ),
        ("kinematics.t", kinematics.t, kinematics.t < 0.0, "t < 0"),
    ];

    for (key, value, passes, constraint) in checks {
        if !passes {
            return Err(ConfigurationError::OutOfRange {
                key,
                value,
                constraint,
            });
        }
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationLoadError {
    #[error("failed to read configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid configuration '{}': {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: ConfigurationError,
    },
}

impl From<ConfigurationLoadError> for Bkm10Error {
    fn from(error: ConfigurationLoadError) -> Self {
        match error {
            ConfigurationLoadError::Invalid { source, .. } => source.into(),
            ConfigurationLoadError::Read { .. } => {
                Bkm10Error::configuration("CONFIG.READ", error.to_string())
            }
            ConfigurationLoadError::Parse { .. } => {
                Bkm10Error::configuration("CONFIG.PARSE", error.to_string())
            }
        }
    }
}

pub fn load_configuration(
    configuration_path: impl AsRef<Path>,
) -> Result<Bkm10Configuration, ConfigurationLoadError> {
    let configuration_path = configuration_path.as_ref();
    let source = fs::read_to_string(configuration_path).map_err(|source| {
        ConfigurationLoadError::Read {
            path: configuration_path.to_path_buf(),
            source,
        }
    })?;
    let value: Value =
        serde_json::from_str(&source).map_err(|source| ConfigurationLoadError::Parse {
            path: configuration_path.to_path_buf(),
            source,
        })?;

    validate_configuration(&value).map_err(|source| ConfigurationLoadError::Invalid {
        path: configuration_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigurationError, validate_configuration};
    use crate::cff::CffInputs;
    use crate::domain::errors::{Bkm10Error, Bkm10ErrorCategory};
    use crate::numerics::NumericBackend;
    use crate::observables::AngleConvention;
    use serde_json::json;

    fn reference_json() -> serde_json::Value {
        json!({
            "kinematics": {
                "lepton_energy": 5.75,
                "q_squared": 1.82,
                "x_bjorken": 0.34,
                "t": -0.17
            },
            "cff_inputs": {
                "h": [-0.897, 2.421],
                "h_tilde": [2.444, 1.131],
                "e": [-0.541, 0.903],
                "e_tilde": [2.207, 5.383]
            }
        })
    }

    #[test]
    fn minimal_configuration_gets_defaults() {
        let configuration = validate_configuration(&reference_json()).expect("valid");

        assert!(!configuration.using_ww);
        assert!(configuration.toggles.bethe_heitler);
        assert!(configuration.toggles.dvcs);
        assert!(configuration.toggles.interference);
        assert_eq!(configuration.angle_convention, AngleConvention::Trento);
        assert_eq!(configuration.backend, NumericBackend::Standard);
        assert_eq!(
            configuration.cff_inputs,
            CffInputs::from_pairs((-0.897, 2.421), (2.444, 1.131), (-0.541, 0.903), (2.207, 5.383))
        );
    }

    #[test]
    fn original_key_names_and_flags_are_accepted() {
        let value = json!({
            "kinematics": {
                "lab_kinematics_k": 5.75,
                "squared_Q_momentum_transfer": 1.82,
                "x_Bjorken": 0.34,
                "squared_hadronic_momentum_transfer_t": -0.17
            },
            "cff_inputs": reference_json()["cff_inputs"].clone(),
            "using_ww": true,
            "dvcs_setting": false,
            "angle_convention": "bkm",
            "backend": "tensorflow"
        });

        let configuration = validate_configuration(&value).expect("valid");
        assert!(configuration.using_ww);
        assert!(!configuration.toggles.dvcs);
        assert_eq!(configuration.kinematics.q_squared, 1.82);
        assert_eq!(configuration.angle_convention, AngleConvention::Bkm);
        assert_eq!(configuration.backend, NumericBackend::Differentiable);
    }

    #[test]
    fn missing_and_mistyped_keys_are_named() {
        let error = validate_configuration(&json!([1, 2])).expect_err("array root");
        assert!(matches!(error, ConfigurationError::NotAnObject));

        let mut value = reference_json();
        value
            .as_object_mut()
            .expect("object")
            .remove("cff_inputs");
        let error = validate_configuration(&value).expect_err("missing CFFs");
        assert!(matches!(
            error,
            ConfigurationError::MissingKey { key: "cff_inputs" }
        ));

        let mut value = reference_json();
        value["using_ww"] = json!("yes");
        let error = validate_configuration(&value).expect_err("string flag");
        assert!(matches!(
            error,
            ConfigurationError::MistypedKey {
                key: "using_ww",
                ..
            }
        ));
        assert!(error.to_string().contains("'using_ww'"));

        let mut value = reference_json();
        value["cff_inputs"]["h"] = json!("complex");
        let error = validate_configuration(&value).expect_err("CFF as string");
        assert!(matches!(
            error,
            ConfigurationError::MistypedKey {
                key: "cff_inputs",
                ..
            }
        ));
    }

    #[test]
    fn kinematic_ranges_are_enforced() {
        for (field, value, key) in [
            ("q_squared", 0.0, "kinematics.q_squared"),
            ("x_bjorken", 1.0, "kinematics.x_bjorken"),
            ("lepton_energy", -5.75, "kinematics.lepton_energy"),
            ("t", 0.0, "kinematics.t"),
        ] {
            let mut configuration = reference_json();
            configuration["kinematics"][field] = json!(value);
            let error = validate_configuration(&configuration).expect_err("out of range");
            match error {
                ConfigurationError::OutOfRange {
                    key: actual_key,
                    value: actual_value,
                    ..
                } => {
                    assert_eq!(actual_key, key);
                    assert_eq!(actual_value, value);
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_backend_maps_to_backend_category() {
        let mut value = reference_json();
        value["backend"] = json!("torch");
        let error = validate_configuration(&value).expect_err("unknown backend");

        let converted: Bkm10Error = error.into();
        assert_eq!(converted.category(), Bkm10ErrorCategory::NumericBackendError);
        assert_eq!(converted.exit_code(), 5);
    }

    #[test]
    fn angle_convention_parses_through_its_own_error() {
        let mut value = reference_json();
        value["angle_convention"] = json!(" BKM ");
        let configuration = validate_configuration(&value).expect("valid");
        assert_eq!(configuration.angle_convention, AngleConvention::Bkm);

        value["angle_convention"] = json!("lab");
        let error = validate_configuration(&value).expect_err("unknown convention");
        assert!(matches!(error, ConfigurationError::AngleConvention(_)));

        let converted: Bkm10Error = error.into();
        assert_eq!(converted.category(), Bkm10ErrorCategory::ConfigurationError);
        assert_eq!(converted.exit_code(), 2);
        assert_eq!(converted.placeholder(), "OBSERVABLE.ANGLE_CONVENTION");
    }
}
