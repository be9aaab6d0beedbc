//! Rust Ritz - variational eigenstates for one-dimensional quantum systems
//!
//! This crate implements the Rayleigh-Ritz method: trial wavefunctions given
//! as symbolic expressions are orthonormalized over a finite domain by
//! Gram-Schmidt, assembled into a Hamiltonian matrix through trapezoid-rule
//! matrix elements, and diagonalized for approximate energy levels.

pub mod basis;
pub mod error;
pub mod expr;
pub mod hamiltonian;
pub mod io;

// Re-export commonly used types at crate root
pub use basis::{common_basis, Basis, BasisFunction, BasisKind, DiffMode};
pub use error::{BasisError, ConfigError, DiffError, ParseError};
pub use expr::{binomial, Expr, Func};
pub use hamiltonian::{eigenstates, hamiltonian, EnergyLevel, HamiltonianParams};
pub use io::{read_job, BasisSource, JobSpec};

/// Default number of trapezoid subintervals for every quadrature.
pub const DEF_POINTS: usize = 100;

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use rand::distributions::Uniform;
    use rand_distr::{Distribution, Normal};

    use crate::basis::{common_basis, Basis, BasisFunction, BasisKind, DiffMode};
    use crate::hamiltonian::{eigenstates, hamiltonian, HamiltonianParams};
    use crate::io::JobSpec;

    #[test]
    fn test_basis_function_creation() {
        let f = BasisFunction::parse("x + 2").unwrap();
        assert_eq!(f.at(9.0), 11.0);
        assert_eq!(f.limits(), (-1.0, 1.0));
    }

    #[test]
    fn test_derivative_vanishes_at_stationary_point() {
        let f = BasisFunction::parse("x^4").unwrap();
        assert_eq!(f.derivative(0.0, DiffMode::Numerical).unwrap(), 0.0);
        assert_eq!(f.derivative(0.0, DiffMode::Analytic).unwrap(), 0.0);
    }

    #[test]
    fn test_derivative_modes_agree() {
        let f = BasisFunction::parse("x^4").unwrap();
        assert_relative_eq!(
            f.derivative(5.0, DiffMode::Numerical).unwrap(),
            f.derivative(5.0, DiffMode::Analytic).unwrap(),
            epsilon = 1e-5
        );

        // random probe points from a standard normal
        let mut rng = rand::thread_rng();
        let dist = Normal::new(0.0, 1.0).unwrap();
        let g = BasisFunction::parse("sin(x)").unwrap();
        for _ in 0..8 {
            let x = dist.sample(&mut rng);
            assert_relative_eq!(
                g.derivative(x, DiffMode::Numerical).unwrap(),
                g.derivative(x, DiffMode::Analytic).unwrap(),
                epsilon = 1e-4
            );
        }

        // random probe points between [-1, 1]
        let dist = Uniform::new(-1.0, 1.0);
        let h = BasisFunction::parse("x^2 + x^7").unwrap();
        for _ in 0..8 {
            let x = dist.sample(&mut rng);
            assert_relative_eq!(
                h.derivative(x, DiffMode::Numerical).unwrap(),
                h.derivative(x, DiffMode::Analytic).unwrap(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_second_derivative_modes_agree() {
        let mut rng = rand::thread_rng();
        let dist = Uniform::new(-1.0, 1.0);
        for src in ["sin(x)", "x^4", "exp(x)"] {
            let f = BasisFunction::parse(src).unwrap();
            for _ in 0..8 {
                let x = dist.sample(&mut rng);
                assert_relative_eq!(
                    f.second_derivative(x, DiffMode::Numerical).unwrap(),
                    f.second_derivative(x, DiffMode::Analytic).unwrap(),
                    epsilon = 1e-2
                );
            }
        }
    }

    #[test]
    fn test_trapezoid_converges_on_quartic() {
        // integrate squares the function: ∫(x²)² over [-2, 2] = 12.8
        let f = BasisFunction::parse_with_domain("x^2", -2.0, 2.0).unwrap();
        let exact = 12.8;
        assert!((0.999..=1.001).contains(&(f.integrate(100) / exact)));
        assert!((0.9999..=1.0001).contains(&(f.integrate(1000) / exact)));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut f = BasisFunction::parse_with_domain("x^2 + x^7", -5.0, 5.0).unwrap();
        let norm = f.normalize(100).unwrap();
        assert!(norm.is_finite() && norm > 0.0);
        assert_relative_eq!(f.integrate(100), 1.0, epsilon = 1e-8);

        let renorm = f.normalize(100).unwrap();
        assert_relative_eq!(renorm, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_orthonormalized_overlaps_form_identity() {
        let mut basis = Basis::new(vec![
            BasisFunction::parse("x + 2").unwrap(),
            BasisFunction::parse("sin(x) + 2").unwrap(),
            BasisFunction::parse("x^2").unwrap(),
        ])
        .unwrap();
        basis.orthonormalize(100).unwrap();
        assert!(basis.is_normalized());

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(
                    basis.overlap(i, j, 100).unwrap(),
                    expected,
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_overlap_symmetry_is_bit_exact() {
        let basis = Basis::new(vec![
            BasisFunction::parse("x + 2").unwrap(),
            BasisFunction::parse("sin(x) + 2").unwrap(),
        ])
        .unwrap();
        let s01 = basis.overlap(0, 1, 100).unwrap();
        let s10 = basis.overlap(1, 0, 100).unwrap();
        assert_eq!(s01.to_bits(), s10.to_bits());
        // these two functions genuinely overlap
        assert!(s01.abs() > 0.1);
    }

    #[test]
    fn test_sine_cosine_pair_is_orthogonal() {
        // odd integrand over a symmetric domain
        let basis = Basis::new(vec![
            BasisFunction::parse("sin(x)").unwrap(),
            BasisFunction::parse("cos(x)").unwrap(),
        ])
        .unwrap();
        assert_relative_eq!(basis.overlap(0, 1, 100).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_dij_is_asymmetric() {
        let basis = Basis::new(vec![
            BasisFunction::parse_with_domain("x", 0.0, 2.0).unwrap(),
            BasisFunction::parse_with_domain("x^2", 0.0, 2.0).unwrap(),
        ])
        .unwrap();

        // (x²)″ = 2, so ⟨x|d²/dx²|x²⟩ = ∫₀² 2x dx = 4, while the reverse
        // integrand vanishes identically
        let d01 = basis.dij(0, 1, DiffMode::Analytic, 100).unwrap();
        let d10 = basis.dij(1, 0, DiffMode::Analytic, 100).unwrap();
        assert_relative_eq!(d01, 4.0, epsilon = 1e-9);
        assert_relative_eq!(d10, 0.0, epsilon = 1e-9);

        let d01_num = basis.dij(0, 1, DiffMode::Numerical, 100).unwrap();
        assert_relative_eq!(d01_num, 4.0, epsilon = 1e-2);
    }

    #[test]
    fn test_hamiltonian_diagonal_shortcut_agrees() {
        let mut basis = Basis::new(vec![
            BasisFunction::parse("sin(x)").unwrap(),
            BasisFunction::parse("cos(x)").unwrap(),
        ])
        .unwrap();
        basis.orthonormalize(100).unwrap();

        let full = hamiltonian(
            &basis,
            HamiltonianParams {
                potential: 2.5,
                ..Default::default()
            },
        )
        .unwrap();
        let shortcut = hamiltonian(
            &basis,
            HamiltonianParams {
                potential: 2.5,
                assume_orthonormal: true,
                ..Default::default()
            },
        )
        .unwrap();

        for i in 0..2 {
            assert_relative_eq!(full[(i, i)], shortcut[(i, i)], epsilon = 1e-8);
        }
    }

    #[test]
    fn test_kinetic_energy_of_normalized_sine() {
        // ψ″ = -ψ for a sine, so -∫ψ″ψ equals ∫ψ² = 1 after normalization
        let mut f = BasisFunction::parse_with_domain("sin(x)", -PI, PI).unwrap();
        f.normalize(100).unwrap();
        assert_relative_eq!(
            f.kinetic(1.0, DiffMode::Analytic, 100).unwrap(),
            1.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            f.kinetic(1.0, DiffMode::Numerical, 100).unwrap(),
            1.0,
            epsilon = 1e-2
        );
    }

    #[test]
    fn test_particle_in_a_box_spectrum() {
        // two even trial functions vanishing at the walls of a unit box
        let mut basis = Basis::new(vec![
            BasisFunction::parse_with_domain("x - x^2", 0.0, 1.0).unwrap(),
            BasisFunction::parse_with_domain("x^2 - 2*x^3 + x^4", 0.0, 1.0).unwrap(),
        ])
        .unwrap();
        basis.orthonormalize(1000).unwrap();

        let h = hamiltonian(
            &basis,
            HamiltonianParams {
                mode: DiffMode::Analytic,
                points: 1000,
                ..Default::default()
            },
        )
        .unwrap();
        let levels = eigenstates(&h);
        assert_eq!(levels.len(), 2);

        // -ψ″ = Eψ in a unit box has E₀ = π²; the Ritz estimate lies above
        // it and below the single-function value of 10
        assert!(levels[0].energy >= PI * PI - 0.01);
        assert!(levels[0].energy <= 10.0);
        assert!(levels[1].energy > levels[0].energy);
    }

    #[test]
    fn test_legendre_basis_orthonormalizes_cleanly() {
        let mut basis = common_basis(BasisKind::Legendre, 3, -1.0, 1.0).unwrap();
        basis.orthonormalize(100).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(
                    basis.overlap(i, j, 100).unwrap(),
                    expected,
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_job_pipeline_from_yaml() {
        let job: JobSpec = serde_yaml::from_str(
            "basis:\n  generated:\n    kind: legendre\n    count: 3\n\
             domain: [-1.0, 1.0]\nmode: analytic\n",
        )
        .unwrap();
        let mut basis = job.build_basis().unwrap();
        basis.orthonormalize(job.points).unwrap();

        let h = hamiltonian(
            &basis,
            HamiltonianParams {
                mass: job.mass,
                potential: job.potential,
                assume_orthonormal: basis.is_normalized(),
                mode: job.mode,
                points: job.points,
            },
        )
        .unwrap();
        let levels = eigenstates(&h);
        assert_eq!(levels.len(), 3);
        for pair in levels.windows(2) {
            assert!(pair[0].energy <= pair[1].energy);
        }
    }
}
