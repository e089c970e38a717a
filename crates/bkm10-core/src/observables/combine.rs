//! Polarization weight table.
//!
//! Unpolarized settings are never evaluated directly; they are averages of the
//! four fully polarized base cross sections.

use crate::domain::polarization::{
    BeamSetting, LeptonHelicity, PolarizationState, TargetPolarization, TargetSetting,
};
use crate::numerics::Real;

/// The four base cross sections at one angle, indexed by
/// [`PolarizationState::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSigmas<R> {
    values: [R; 4],
}

impl<R: Real> BaseSigmas<R> {
    pub fn try_from_fn<E>(
        mut evaluate: impl FnMut(PolarizationState) -> Result<R, E>,
    ) -> Result<Self, E> {
        let mut values = [R::zero(); 4];
        for state in PolarizationState::ALL {
            values[state.index()] = evaluate(state)?;
        }
        Ok(Self { values })
    }

    pub fn get(&self, state: PolarizationState) -> R {
        self.values[state.index()]
    }

    pub fn total(&self) -> R {
        self.values
            .into_iter()
            .fold(R::zero(), |sum, value| sum + value)
    }
}

pub fn combine<R: Real>(beam: BeamSetting, target: TargetSetting, sigmas: &BaseSigmas<R>) -> R {
    let half = R::from_f64(0.5);
    let pick = |helicity, polarization| sigmas.get(PolarizationState::new(helicity, polarization));

    match (beam, target) {
        (BeamSetting::Polarized(helicity), TargetSetting::Polarized(polarization)) => {
            pick(helicity, polarization)
        }
        (BeamSetting::Polarized(helicity), TargetSetting::Unpolarized) => {
            half * (pick(helicity, TargetPolarization::Positive)
                + pick(helicity, TargetPolarization::Negative))
        }
        (BeamSetting::Unpolarized, TargetSetting::Polarized(polarization)) => {
            half * (pick(LeptonHelicity::Positive, polarization)
                + pick(LeptonHelicity::Negative, polarization))
        }
        (BeamSetting::Unpolarized, TargetSetting::Unpolarized) => {
            R::from_f64(0.25) * sigmas.total()
        }
    }
}
