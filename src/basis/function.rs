//! A single trial wavefunction with its integration domain.

use serde::{Deserialize, Serialize};

use crate::error::{BasisError, DiffError, ParseError};
use crate::expr::Expr;

/// Step for the central-difference first derivative.
const H_FIRST: f64 = 1e-7;
/// Step for the five-point stencil taken over the numerical first derivative.
const H_SECOND: f64 = 1e-6;

/// How derivatives are evaluated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Finite differences on the evaluated function. Works for every
    /// expression; tolerance for agreement with the closed form is ~1e-4 for
    /// first derivatives and ~1e-2 for second derivatives.
    #[default]
    Numerical,
    /// Closed-form symbolic differentiation. Fails for expressions without
    /// one, such as anything containing `abs`.
    Analytic,
}

pub(crate) fn sorted_bounds(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A trial wavefunction ψ(x) over a finite domain `[lower, upper]`.
///
/// The domain travels with the function: integration, normalization, and
/// kinetic-energy evaluation default to it. Endpoints are stored sorted, so
/// the domain may be given in either order.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisFunction {
    expr: Expr,
    lower: f64,
    upper: f64,
}

impl BasisFunction {
    /// Wrap an expression over the default domain `[-1, 1]`.
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            lower: -1.0,
            upper: 1.0,
        }
    }

    /// Wrap an expression over `[a, b]`, given in either order.
    pub fn with_domain(expr: Expr, a: f64, b: f64) -> Self {
        let (lower, upper) = sorted_bounds(a, b);
        Self { expr, lower, upper }
    }

    /// Parse expression text over the default domain `[-1, 1]`.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        Ok(Self::new(Expr::parse(src)?))
    }

    /// Parse expression text over `[a, b]`, given in either order.
    pub fn parse_with_domain(src: &str, a: f64, b: f64) -> Result<Self, ParseError> {
        Ok(Self::with_domain(Expr::parse(src)?, a, b))
    }

    /// The wrapped expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The integration domain, lower endpoint first.
    pub fn limits(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Replace the integration domain; endpoints may come in either order.
    pub fn set_limits(&mut self, a: f64, b: f64) {
        let (lower, upper) = sorted_bounds(a, b);
        self.lower = lower;
        self.upper = upper;
    }

    /// ψ(x).
    pub fn at(&self, x: f64) -> f64 {
        self.expr.eval(x)
    }

    /// ψ′(x).
    pub fn derivative(&self, x: f64, mode: DiffMode) -> Result<f64, DiffError> {
        match mode {
            DiffMode::Numerical => Ok(self.numerical_derivative(x)),
            DiffMode::Analytic => Ok(self.expr.differentiate()?.eval(x)),
        }
    }

    /// ψ″(x).
    pub fn second_derivative(&self, x: f64, mode: DiffMode) -> Result<f64, DiffError> {
        Ok(self.second_derivative_eval(mode)?.at(x))
    }

    fn numerical_derivative(&self, x: f64) -> f64 {
        (self.at(x + H_FIRST) - self.at(x - H_FIRST)) / (2.0 * H_FIRST)
    }

    // Five-point first-derivative stencil applied to the numerical first
    // derivative. The composition compounds round-off from both stages.
    fn numerical_second_derivative(&self, x: f64) -> f64 {
        let h = H_SECOND;
        let d1 = self.numerical_derivative(x + 2.0 * h);
        let d2 = self.numerical_derivative(x + h);
        let d3 = self.numerical_derivative(x - h);
        let d4 = self.numerical_derivative(x - 2.0 * h);
        (d4 - d1 + 8.0 * (d2 - d3)) / (12.0 * h)
    }

    pub(crate) fn second_derivative_eval(
        &self,
        mode: DiffMode,
    ) -> Result<SecondDerivative<'_>, DiffError> {
        match mode {
            DiffMode::Numerical => Ok(SecondDerivative::Stencil(self)),
            DiffMode::Analytic => Ok(SecondDerivative::Closed(
                self.expr.differentiate()?.differentiate()?,
            )),
        }
    }

    /// ∫ψ² over the stored domain by the trapezoid rule with `points`
    /// subintervals.
    pub fn integrate(&self, points: usize) -> f64 {
        self.integrate_over(self.lower, self.upper, points)
    }

    /// ∫ψ² over `[from, to]` by the trapezoid rule with `points`
    /// subintervals. `points` must be positive.
    pub fn integrate_over(&self, from: f64, to: f64, points: usize) -> f64 {
        debug_assert!(points > 0);
        let dx = (to - from) / points as f64;
        let mut total = 0.0;
        for k in 0..points {
            let x = from + k as f64 * dx;
            let f0 = self.at(x);
            let f1 = self.at(x + dx);
            total += dx / 2.0 * (f0 * f0 + f1 * f1);
        }
        total
    }

    /// Scale the function so ∫ψ² = 1 over the stored domain. Returns the
    /// norm √∫ψ² that was divided out.
    pub fn normalize(&mut self, points: usize) -> Result<f64, BasisError> {
        self.normalize_over(self.lower, self.upper, points)
    }

    /// Scale the function so ∫ψ² = 1 over `[from, to]`, which becomes the
    /// stored domain (sorted). Fails with [`BasisError::DegenerateNorm`] when
    /// ∫ψ² is zero, negative, or non-finite.
    pub fn normalize_over(
        &mut self,
        from: f64,
        to: f64,
        points: usize,
    ) -> Result<f64, BasisError> {
        let (lower, upper) = sorted_bounds(from, to);
        let norm_sq = self.integrate_over(lower, upper, points);
        if !norm_sq.is_finite() || norm_sq <= 0.0 {
            return Err(BasisError::DegenerateNorm(norm_sq));
        }
        let norm = norm_sq.sqrt();
        self.expr = Expr::num(1.0 / norm) * self.expr.clone();
        self.lower = lower;
        self.upper = upper;
        Ok(norm)
    }

    /// Kinetic-energy expectation −(1/mass)·∫ψ″ψ over the stored domain, in
    /// units where ħ = 1. Meaningful as an energy when ψ is normalized.
    ///
    /// In analytic mode the second-derivative tree is built once and then
    /// evaluated at each quadrature point.
    pub fn kinetic(&self, mass: f64, mode: DiffMode, points: usize) -> Result<f64, DiffError> {
        let second = self.second_derivative_eval(mode)?;
        let dx = (self.upper - self.lower) / points as f64;
        let mut total = 0.0;
        for k in 0..points {
            let x = self.lower + k as f64 * dx;
            total += dx / 2.0 * (second.at(x) * self.at(x) + second.at(x + dx) * self.at(x + dx));
        }
        Ok(-total / mass)
    }
}

/// A second-derivative evaluator fixed to one mode, so quadrature loops pay
/// for symbolic differentiation once instead of per point.
pub(crate) enum SecondDerivative<'a> {
    Stencil(&'a BasisFunction),
    Closed(Expr),
}

impl SecondDerivative<'_> {
    pub(crate) fn at(&self, x: f64) -> f64 {
        match self {
            SecondDerivative::Stencil(f) => f.numerical_second_derivative(x),
            SecondDerivative::Closed(expr) => expr.eval(x),
        }
    }
}
