use anyhow::Context;
use clap::Parser;

use rust_ritz::{eigenstates, hamiltonian, read_job, HamiltonianParams};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "job.yml")]
    config: String,
}

fn main() -> anyhow::Result<()> {
    // read the job file, with command line argument, use clap to input the file name
    let args = Args::parse();
    let job = read_job(&args.config)
        .with_context(|| format!("reading job file {}", args.config))?;

    let mut basis = job.build_basis().context("building the trial basis")?;
    if job.orthonormalize {
        basis.orthonormalize(job.points).context("orthonormalizing")?;
    }

    let params = HamiltonianParams {
        mass: job.mass,
        potential: job.potential,
        assume_orthonormal: job.orthonormalize,
        mode: job.mode,
        points: job.points,
    };
    let h = hamiltonian(&basis, params).context("assembling the Hamiltonian")?;
    let levels = eigenstates(&h);

    // Print results
    let (lower, upper) = basis.limits();
    println!("Variational Spectrum");
    println!("----------------------------------------");
    println!("Basis functions: {}", basis.len());
    println!("Domain: [{lower}, {upper}]");
    println!("Mass: {} | Potential: {}", job.mass, job.potential);
    println!("Quadrature points: {} | Mode: {:?}", job.points, job.mode);
    println!();
    for (i, f) in basis.functions().iter().enumerate() {
        println!("psi_{i} = {}", f.expr());
    }
    println!();
    for (n, level) in levels.iter().enumerate() {
        let coefficients: Vec<String> = level
            .coefficients
            .iter()
            .map(|c| format!("{c:+.4}"))
            .collect();
        println!(
            "E_{n} = {:.6}  [{}]",
            level.energy,
            coefficients.join(", ")
        );
    }

    Ok(())
}
