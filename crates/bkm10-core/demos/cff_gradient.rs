//! Sensitivity of the unpolarized cross section to Re H.
//!
//! Runs the pipeline once on the forward-mode `Dual` backend with Re H seeded
//! as the variable and prints each value next to its derivative.

use bkm10_core::common::constants::PI2;
use bkm10_core::numerics::linear_grid;
use bkm10_core::{
    BeamSetting, CffInputs, CrossSection, Dual, KinematicInputs, ObservableSettings,
    TargetSetting,
};
use num_complex::Complex;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let kinematics = KinematicInputs::new(5.75, 1.82, 0.34, -0.17);
    let reference =
        CffInputs::from_pairs((-0.897, 2.421), (2.444, 1.131), (-0.541, 0.903), (2.207, 5.383));

    let mut cffs = reference.lift::<Dual>();
    cffs.h = Complex::new(Dual::variable(reference.h.re), Dual::constant(reference.h.im));

    let composer = CrossSection::new(&kinematics, &cffs, ObservableSettings::default())?;
    let phi: Vec<Dual> = linear_grid(0.0, PI2, 12)
        .unwrap_or_default()
        .into_iter()
        .map(Dual::constant)
        .collect();
    let sigma = composer.cross_section(&phi, BeamSetting::Unpolarized, TargetSetting::Unpolarized)?;

    println!("{:>10} {:>14} {:>18}", "phi", "sigma_UU [nb]", "d sigma / d Re H");
    for (angle, value) in phi.iter().zip(&sigma) {
        println!(
            "{:>10.6} {:>14.6e} {:>18.6e}",
            angle.value, value.value, value.derivative
        );
    }
    Ok(())
}
