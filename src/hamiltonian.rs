//! Hamiltonian assembly over a trial basis and its diagonalization.

use nalgebra::{DMatrix, DVector};

use crate::basis::{Basis, DiffMode};
use crate::error::BasisError;
use crate::DEF_POINTS;

/// Knobs for Hamiltonian assembly, in units where ħ = 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HamiltonianParams {
    /// Particle mass.
    pub mass: f64,
    /// State-independent potential V.
    pub potential: f64,
    /// Skip the off-diagonal potential terms and add V only on the
    /// diagonal. Only valid when the basis really is orthonormal, where
    /// V·Sᵢⱼ ≈ V·δᵢⱼ makes the shortcut exact; the safe default is `false`,
    /// which always computes V·Sᵢⱼ in full.
    pub assume_orthonormal: bool,
    /// Second-derivative evaluation for the kinetic couplings.
    pub mode: DiffMode,
    /// Trapezoid subintervals per matrix element.
    pub points: usize,
}

impl Default for HamiltonianParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            potential: 0.0,
            assume_orthonormal: false,
            mode: DiffMode::default(),
            points: DEF_POINTS,
        }
    }
}

/// Assemble H with Hᵢⱼ = −Dᵢⱼ/mass plus the potential contribution.
///
/// With `assume_orthonormal` unset the potential enters as V·Sᵢⱼ for every
/// pair; set, it enters as V on the diagonal only. For an orthonormalized
/// basis the matrix is symmetric up to quadrature round-off.
pub fn hamiltonian(basis: &Basis, params: HamiltonianParams) -> Result<DMatrix<f64>, BasisError> {
    let n = basis.len();
    let mut h = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            let mut hij = -basis.dij(i, j, params.mode, params.points)? / params.mass;
            if params.assume_orthonormal {
                if i == j {
                    hij += params.potential;
                }
            } else {
                hij += params.potential * basis.overlap(i, j, params.points)?;
            }
            h[(i, j)] = hij;
        }
    }
    Ok(h)
}

/// One stationary state out of a diagonalized Hamiltonian.
#[derive(Clone, Debug)]
pub struct EnergyLevel {
    /// Energy eigenvalue.
    pub energy: f64,
    /// Expansion coefficients over the basis functions, in basis order.
    pub coefficients: DVector<f64>,
}

/// Eigen decomposition of an assembled Hamiltonian, sorted by ascending
/// energy.
///
/// Uses the symmetric eigensolver; results for a matrix that is not
/// symmetric are unspecified.
pub fn eigenstates(h: &DMatrix<f64>) -> Vec<EnergyLevel> {
    let eig = h.clone().symmetric_eigen();
    let mut levels: Vec<EnergyLevel> = eig
        .eigenvalues
        .iter()
        .copied()
        .zip(eig.eigenvectors.column_iter())
        .map(|(energy, v)| EnergyLevel {
            energy,
            coefficients: v.into_owned(),
        })
        .collect();
    levels.sort_by(|a, b| a.energy.total_cmp(&b.energy));
    levels
}
