//! Gram-Schmidt over a Legendre basis
//!
//! Generates Legendre polynomials from the built-in catalogue, shows their
//! overlap matrix before and after Gram-Schmidt, and prints the kinetic
//! expectation value of each orthonormalized member.
//!
//! Usage:
//!   cargo run --example legendre_gram_schmidt -- [OPTIONS]
//!
//! Options:
//!   -c, --count <N>    Number of Legendre polynomials [default: 4]
//!   -p, --points <N>   Trapezoid subintervals per integral [default: 100]

use anyhow::Context;
use clap::Parser;

use rust_ritz::{common_basis, Basis, BasisKind, DiffMode};

/// Legendre-basis orthonormalization demonstration
#[derive(Parser, Debug)]
#[command(version, about = "Gram-Schmidt and kinetic expectations over a Legendre basis")]
struct Args {
    /// Number of Legendre polynomials
    #[arg(short, long, default_value_t = 4)]
    count: usize,

    /// Trapezoid subintervals per integral
    #[arg(short, long, default_value_t = 100)]
    points: usize,
}

fn print_overlaps(basis: &Basis, points: usize) -> anyhow::Result<()> {
    for i in 0..basis.len() {
        let row: Vec<String> = (0..basis.len())
            .map(|j| basis.overlap(i, j, points).map(|s| format!("{s:>8.4}")))
            .collect::<Result<_, _>>()?;
        println!("  [{}]", row.join(" "));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Gram-Schmidt over a Legendre Basis");
    println!("========================================");
    println!();

    let mut basis = common_basis(BasisKind::Legendre, args.count, -1.0, 1.0)
        .context("generating the Legendre basis")?;

    println!("P_0 .. P_{}:", args.count - 1);
    for (n, f) in basis.functions().iter().enumerate() {
        println!("  P_{n} = {}", f.expr());
    }
    println!();

    // Legendre polynomials are orthogonal over [-1, 1] but carry norms
    // 2/(2n+1), so the raw overlap matrix is diagonal, not the identity
    println!("Overlap matrix before orthonormalization:");
    print_overlaps(&basis, args.points)?;

    basis.orthonormalize(args.points)?;
    println!();
    println!("After Gram-Schmidt:");
    print_overlaps(&basis, args.points)?;

    println!();
    println!("Kinetic expectation -⟨φ|d²/dx²|φ⟩ per member (ħ = m = 1):");
    for (n, f) in basis.functions().iter().enumerate() {
        let t = f.kinetic(1.0, DiffMode::Analytic, args.points)?;
        println!("  φ_{n}: {t:>10.5}");
    }

    Ok(())
}
