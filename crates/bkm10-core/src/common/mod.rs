pub mod constants;
pub mod form_factors;

pub use form_factors::{ElasticFormFactors, dipole_form_factors};
