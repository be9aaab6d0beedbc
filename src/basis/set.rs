//! An ordered set of trial functions over a shared domain.

use crate::error::BasisError;
use crate::expr::Expr;

use super::function::{sorted_bounds, BasisFunction, DiffMode};

/// An ordered, non-empty set of [`BasisFunction`]s sharing one integration
/// domain.
///
/// Construction validates that every member spans the same domain, so the
/// matrix-element methods never have to guess which one applies.
#[derive(Clone, Debug)]
pub struct Basis {
    set: Vec<BasisFunction>,
    lower: f64,
    upper: f64,
    normalized: bool,
}

impl Basis {
    /// Build a basis from trial functions. Fails on an empty set and when
    /// members disagree about the domain.
    pub fn new(set: Vec<BasisFunction>) -> Result<Self, BasisError> {
        let first = set.first().ok_or(BasisError::EmptyBasis)?;
        let (lower, upper) = first.limits();
        for (index, f) in set.iter().enumerate().skip(1) {
            let (found_lower, found_upper) = f.limits();
            if (found_lower, found_upper) != (lower, upper) {
                return Err(BasisError::DomainMismatch {
                    index,
                    lower,
                    upper,
                    found_lower,
                    found_upper,
                });
            }
        }
        Ok(Self {
            set,
            lower,
            upper,
            normalized: false,
        })
    }

    /// Number of member functions, at least one.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Always `false`, since construction rejects empty sets; kept alongside
    /// [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// The member functions in order.
    pub fn functions(&self) -> &[BasisFunction] {
        &self.set
    }

    /// The shared domain, lower endpoint first.
    pub fn limits(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Whether [`normalize`](Self::normalize) or
    /// [`orthonormalize`](Self::orthonormalize) has run.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Overlap ⟨ψᵢ|ψⱼ⟩ over the shared domain by the trapezoid rule with
    /// `points` subintervals.
    ///
    /// Multiplication commutes bit-for-bit under IEEE 754, so
    /// `overlap(i, j, n)` and `overlap(j, i, n)` return identical values.
    pub fn overlap(&self, i: usize, j: usize, points: usize) -> Result<f64, BasisError> {
        BasisError::check_index(i, self.len())?;
        BasisError::check_index(j, self.len())?;
        Ok(self.overlap_pair(&self.set[i], &self.set[j], points))
    }

    /// Overlap of two explicit functions integrated over this basis's shared
    /// domain, whatever domains the functions themselves carry.
    pub fn overlap_pair(&self, f: &BasisFunction, g: &BasisFunction, points: usize) -> f64 {
        let dx = (self.upper - self.lower) / points as f64;
        let mut total = 0.0;
        for k in 0..points {
            let x = self.lower + k as f64 * dx;
            total += dx / 2.0 * (f.at(x) * g.at(x) + f.at(x + dx) * g.at(x + dx));
        }
        total
    }

    /// Second-derivative coupling ⟨ψᵢ|d²/dx²|ψⱼ⟩ over the shared domain.
    ///
    /// The derivative lands on ψⱼ only, so this is not symmetric in `i` and
    /// `j` in general. In analytic mode ψⱼ is differentiated once up front
    /// and the resulting tree evaluated per quadrature point.
    pub fn dij(
        &self,
        i: usize,
        j: usize,
        mode: DiffMode,
        points: usize,
    ) -> Result<f64, BasisError> {
        BasisError::check_index(i, self.len())?;
        BasisError::check_index(j, self.len())?;
        let bra = &self.set[i];
        let second = self.set[j].second_derivative_eval(mode)?;
        let dx = (self.upper - self.lower) / points as f64;
        let mut total = 0.0;
        for k in 0..points {
            let x = self.lower + k as f64 * dx;
            total += dx / 2.0
                * (second.at(x) * bra.at(x) + second.at(x + dx) * bra.at(x + dx));
        }
        Ok(total)
    }

    /// Normalize every member over the shared domain.
    pub fn normalize(&mut self, points: usize) -> Result<(), BasisError> {
        self.normalize_over(self.lower, self.upper, points)
    }

    /// Normalize every member over `[a, b]`, which becomes the shared domain
    /// (sorted). Any member with a degenerate norm fails the whole call.
    pub fn normalize_over(&mut self, a: f64, b: f64, points: usize) -> Result<(), BasisError> {
        for f in &mut self.set {
            f.normalize_over(a, b, points)?;
        }
        let (lower, upper) = sorted_bounds(a, b);
        self.lower = lower;
        self.upper = upper;
        self.normalized = true;
        Ok(())
    }

    /// Gram-Schmidt orthonormalization in place.
    ///
    /// The first function is normalized as-is. Each later function has its
    /// projections onto the already-processed functions subtracted, newest
    /// first, with coefficients Sᵢⱼ/Sⱼⱼ from the same quadrature used
    /// everywhere else; the residual is then normalized. The subtraction is
    /// symbolic: each member ends up as a composite expression over the
    /// original trial functions.
    ///
    /// Fails with [`BasisError::DegenerateNorm`] when a residual vanishes,
    /// which is how linear dependence among the trial functions shows up. The
    /// set is only replaced on full success.
    pub fn orthonormalize(&mut self, points: usize) -> Result<(), BasisError> {
        let mut head = self.set[0].clone();
        head.normalize_over(self.lower, self.upper, points)?;
        let mut ortho = vec![head];
        for i in 1..self.set.len() {
            let mut residual = self.set[i].expr().clone();
            for j in (0..i).rev() {
                let sij = self.overlap_pair(&self.set[i], &ortho[j], points);
                let sjj = self.overlap_pair(&ortho[j], &ortho[j], points);
                residual = residual - Expr::num(sij / sjj) * ortho[j].expr().clone();
            }
            let mut next = BasisFunction::with_domain(residual, self.lower, self.upper);
            next.normalize_over(self.lower, self.upper, points)?;
            ortho.push(next);
        }
        self.set = ortho;
        self.normalized = true;
        Ok(())
    }
}
