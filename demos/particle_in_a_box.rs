//! Particle in a box via polynomial trial functions
//!
//! Three polynomials vanishing at the walls of a unit box are
//! orthonormalized and diagonalized against the exact spectrum
//! Eₙ = (n+1)²π² of -ψ″ = Eψ.
//!
//! Usage:
//!   cargo run --example particle_in_a_box -- [OPTIONS]
//!
//! Options:
//!   -p, --points <N>   Trapezoid subintervals per integral [default: 1000]

use std::f64::consts::PI;

use anyhow::Context;
use clap::Parser;

use rust_ritz::{
    eigenstates, hamiltonian, Basis, BasisFunction, DiffMode, HamiltonianParams,
};

/// Particle-in-a-box Rayleigh-Ritz demonstration
#[derive(Parser, Debug)]
#[command(version, about = "Rayleigh-Ritz spectrum of a particle in a unit box")]
struct Args {
    /// Trapezoid subintervals per integral
    #[arg(short, long, default_value_t = 1000)]
    points: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Particle in a Box - Rayleigh-Ritz");
    println!("========================================");
    println!();
    println!("Trial functions over [0, 1]:");
    println!("  psi_0 = x(1-x)         even about the center");
    println!("  psi_1 = x(1-x)(1-2x)   odd about the center");
    println!("  psi_2 = x^2(1-x)^2     even about the center");
    println!();

    let mut basis = Basis::new(vec![
        BasisFunction::parse_with_domain("x - x^2", 0.0, 1.0)?,
        BasisFunction::parse_with_domain("x - 3*x^2 + 2*x^3", 0.0, 1.0)?,
        BasisFunction::parse_with_domain("x^2 - 2*x^3 + x^4", 0.0, 1.0)?,
    ])
    .context("building the trial basis")?;
    basis.orthonormalize(args.points)?;

    let h = hamiltonian(
        &basis,
        HamiltonianParams {
            mode: DiffMode::Analytic,
            points: args.points,
            ..Default::default()
        },
    )?;
    let levels = eigenstates(&h);

    println!("Results ({} quadrature points):", args.points);
    println!("--------");
    println!("   {:>12}  {:>12}  {:>8}", "Ritz", "exact", "ratio");
    for (n, level) in levels.iter().enumerate() {
        let exact = ((n + 1) * (n + 1)) as f64 * PI * PI;
        println!(
            "E_{n} {:>12.5} {:>12.5} {:>9.4}",
            level.energy,
            exact,
            level.energy / exact
        );
    }
    println!();

    // The Ritz values bound the exact levels from above
    let e0 = levels[0].energy;
    if (e0 - PI * PI) / (PI * PI) < 1e-3 {
        println!("✓ Ground state within 0.1% of π²");
    } else if e0 >= PI * PI {
        println!("○ Ground state above π², as the variational bound requires");
    } else {
        println!("⚠ Ground state below π² - quadrature error dominates");
    }

    Ok(())
}
