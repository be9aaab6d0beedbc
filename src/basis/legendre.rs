//! Ready-made basis families.

use serde::{Deserialize, Serialize};

use crate::error::BasisError;
use crate::expr::{binomial, Expr};

use super::function::BasisFunction;
use super::set::Basis;

/// Catalogue of generatable basis families.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisKind {
    /// Legendre polynomials P₀ … Pₙ₋₁, orthogonal over [-1, 1].
    Legendre,
}

/// Generate the first `count` members of a family over `[lower, upper]`.
///
/// Fails with [`BasisError::EmptyBasis`] when `count` is zero. The default
/// Legendre domain is `[-1.0, 1.0]`; other domains are allowed but the raw
/// polynomials are only mutually orthogonal over the native one.
pub fn common_basis(
    kind: BasisKind,
    count: usize,
    lower: f64,
    upper: f64,
) -> Result<Basis, BasisError> {
    let set = match kind {
        BasisKind::Legendre => (0..count)
            .map(|n| BasisFunction::with_domain(legendre(n), lower, upper))
            .collect(),
    };
    Basis::new(set)
}

/// Pₙ as an expression tree, via the closed form
/// Pₙ(x) = Σₖ C(n, k)·C(n + k, k)·((x − 1)/2)ᵏ.
fn legendre(n: usize) -> Expr {
    let shifted = Expr::var() / Expr::num(2.0) - Expr::num(0.5);
    let mut acc = Expr::num(0.0);
    for k in 0..=n {
        let coeff = binomial(n, k) * binomial(n + k, k);
        let term = Expr::num(coeff) * shifted.clone().pow(Expr::num(k as f64));
        acc = term + acc;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_count_is_rejected() {
        assert!(matches!(
            common_basis(BasisKind::Legendre, 0, -1.0, 1.0),
            Err(BasisError::EmptyBasis)
        ));
    }

    #[test]
    fn low_orders_match_closed_forms() {
        let basis = common_basis(BasisKind::Legendre, 4, -1.0, 1.0).unwrap();
        assert_eq!(basis.len(), 4);
        assert_eq!(basis.limits(), (-1.0, 1.0));

        let p = basis.functions();
        for &x in &[-1.0, -0.4, 0.0, 0.5, 1.0] {
            assert_relative_eq!(p[0].at(x), 1.0, epsilon = 1e-12);
            assert_relative_eq!(p[1].at(x), x, epsilon = 1e-12);
            assert_relative_eq!(p[2].at(x), (3.0 * x * x - 1.0) / 2.0, epsilon = 1e-12);
            assert_relative_eq!(
                p[3].at(x),
                (5.0 * x * x * x - 3.0 * x) / 2.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn endpoint_values() {
        // Pₙ(1) = 1 and Pₙ(-1) = (-1)ⁿ
        let basis = common_basis(BasisKind::Legendre, 6, -1.0, 1.0).unwrap();
        for (n, p) in basis.functions().iter().enumerate() {
            assert_relative_eq!(p.at(1.0), 1.0, epsilon = 1e-10);
            let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert_relative_eq!(p.at(-1.0), sign, epsilon = 1e-10);
        }
    }
}
