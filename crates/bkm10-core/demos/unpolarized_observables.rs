//! Prints the four-fold cross section and the three asymmetries over one
//! azimuthal period.
//!
//! ```text
//! cargo run -p bkm10-core --example unpolarized_observables -- [config.json]
//! ```
//!
//! Without an argument the built-in reference point is used.

use anyhow::Context;
use bkm10_core::common::constants::PI2;
use bkm10_core::numerics::linear_grid;
use bkm10_core::{
    BeamSetting, Bkm10Configuration, Bkm10Error, CffInputs, KinematicInputs, TargetSetting,
    load_configuration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const GRID_POINTS: usize = 16;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(error) = run() {
        let code = match error.downcast_ref::<Bkm10Error>() {
            Some(error) => {
                eprintln!("{}", error.diagnostic_line());
                eprintln!("{}", error.fatal_exit_line());
                error.exit_code()
            }
            None => {
                eprintln!("error: {error:#}");
                1
            }
        };
        std::process::exit(code);
    }
}

fn run() -> anyhow::Result<()> {
    let configuration = match std::env::args().nth(1) {
        Some(path) => load_configuration(&path).map_err(Bkm10Error::from)?,
        None => reference_configuration(),
    };
    info!(
        k = configuration.kinematics.lepton_energy,
        q_squared = configuration.kinematics.q_squared,
        x_bjorken = configuration.kinematics.x_bjorken,
        t = configuration.kinematics.t,
        using_ww = configuration.using_ww,
        backend = %configuration.backend,
        "evaluating BKM10 observables"
    );

    let composer = configuration.composer().map_err(Bkm10Error::from)?;
    let phi = linear_grid(0.0, PI2, GRID_POINTS).context("azimuthal grid needs two points")?;

    let sigma = composer
        .cross_section(&phi, BeamSetting::Unpolarized, TargetSetting::Unpolarized)
        .map_err(Bkm10Error::from)?;
    let bsa = composer
        .bsa(&phi, TargetSetting::Unpolarized)
        .map_err(Bkm10Error::from)?;
    let tsa = composer
        .tsa(&phi, BeamSetting::Unpolarized)
        .map_err(Bkm10Error::from)?;
    let dsa = composer.dsa(&phi).map_err(Bkm10Error::from)?;

    println!(
        "{:>10} {:>14} {:>12} {:>12} {:>12}",
        "phi", "sigma_UU [nb]", "BSA", "TSA", "DSA"
    );
    for index in 0..phi.len() {
        println!(
            "{:>10.6} {:>14.6e} {:>12.6} {:>12.6} {:>12.6}",
            phi[index], sigma[index], bsa[index], tsa[index], dsa[index]
        );
    }
    Ok(())
}

fn reference_configuration() -> Bkm10Configuration {
    Bkm10Configuration::new(
        KinematicInputs::new(5.75, 1.82, 0.34, -0.17),
        CffInputs::from_pairs((-0.897, 2.421), (2.444, 1.131), (-0.541, 0.903), (2.207, 5.383)),
    )
}
