use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bkm10ErrorCategory {
    ConfigurationError,
    KinematicDomainError,
    PolarizationConfigurationError,
    NumericBackendError,
}

impl Bkm10ErrorCategory {
    pub const fn exit_classification(self) -> ExitClassification {
        match self {
            Self::ConfigurationError => ExitClassification {
                exit_code: 2,
                category_name: "ConfigurationError",
                short_code: "CONFIG_FATAL",
            },
            Self::KinematicDomainError => ExitClassification {
                exit_code: 3,
                category_name: "KinematicDomainError",
                short_code: "KINEMATICS_FATAL",
            },
            Self::PolarizationConfigurationError => ExitClassification {
                exit_code: 4,
                category_name: "PolarizationConfigurationError",
                short_code: "POLARIZATION_FATAL",
            },
            Self::NumericBackendError => ExitClassification {
                exit_code: 5,
                category_name: "NumericBackendError",
                short_code: "BACKEND_FATAL",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_classification().exit_code
    }

    pub const fn category_name(self) -> &'static str {
        self.exit_classification().category_name
    }

    pub const fn short_code(self) -> &'static str {
        self.exit_classification().short_code
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitClassification {
    pub exit_code: i32,
    pub category_name: &'static str,
    pub short_code: &'static str,
}

/// Crate-wide error carrying a category, a stable placeholder tag such as
/// `KINEMATICS.K_TILDE`, and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bkm10Error {
    category: Bkm10ErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl Bkm10Error {
    pub fn new(
        category: Bkm10ErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn configuration(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(Bkm10ErrorCategory::ConfigurationError, placeholder, message)
    }

    pub fn kinematic_domain(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(Bkm10ErrorCategory::KinematicDomainError, placeholder, message)
    }

    pub fn polarization(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            Bkm10ErrorCategory::PolarizationConfigurationError,
            placeholder,
            message,
        )
    }

    pub fn numeric_backend(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(Bkm10ErrorCategory::NumericBackendError, placeholder, message)
    }

    pub const fn category(&self) -> Bkm10ErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for Bkm10Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.category_name(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for Bkm10Error {}

#[cfg(test)]
mod tests {
    use super::{Bkm10Error, Bkm10ErrorCategory};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (
                Bkm10ErrorCategory::ConfigurationError,
                2,
                "ConfigurationError",
                "CONFIG_FATAL",
            ),
            (
                Bkm10ErrorCategory::KinematicDomainError,
                3,
                "KinematicDomainError",
                "KINEMATICS_FATAL",
            ),
            (
                Bkm10ErrorCategory::PolarizationConfigurationError,
                4,
                "PolarizationConfigurationError",
                "POLARIZATION_FATAL",
            ),
            (
                Bkm10ErrorCategory::NumericBackendError,
                5,
                "NumericBackendError",
                "BACKEND_FATAL",
            ),
        ];

        for (category, exit_code, category_name, short_code) in cases {
            let classification = category.exit_classification();
            assert_eq!(classification.exit_code, exit_code);
            assert_eq!(classification.category_name, category_name);
            assert_eq!(classification.short_code, short_code);
        }
    }

    #[test]
    fn diagnostics_include_placeholder_and_fatal_summary() {
        let error = Bkm10Error::kinematic_domain("KINEMATICS.T_PRIME", "t' must be <= 0");
        assert_eq!(error.category(), Bkm10ErrorCategory::KinematicDomainError);
        assert_eq!(error.exit_code(), 3);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [KINEMATICS.T_PRIME] t' must be <= 0"
        );
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 3");
        assert_eq!(
            error.to_string(),
            "KinematicDomainError [KINEMATICS.T_PRIME] t' must be <= 0"
        );
    }
}
