//! Closed-form differentiation and small combinatorial helpers.

use super::ast::{Expr, Func};
use crate::error::DiffError;

impl Expr {
    /// The derivative with respect to the free variable, as a new tree.
    ///
    /// Standard sum, product, quotient, power, and chain rules. `abs` has no
    /// closed-form derivative at the origin and is refused outright; callers
    /// needing derivatives of such expressions should fall back to finite
    /// differences. The result is passed through [`Expr::simplified`] to keep
    /// repeated differentiation from inflating the tree.
    pub fn differentiate(&self) -> Result<Expr, DiffError> {
        Ok(d(self)?.simplified())
    }
}

fn d(expr: &Expr) -> Result<Expr, DiffError> {
    Ok(match expr {
        Expr::Num(_) => Expr::Num(0.0),
        Expr::Var => Expr::Num(1.0),
        Expr::Neg(e) => Expr::Neg(d(e)?.into()),
        Expr::Add(a, b) => d(a)? + d(b)?,
        Expr::Sub(a, b) => d(a)? - d(b)?,
        Expr::Mul(a, b) => d(a)? * b.as_ref().clone() + a.as_ref().clone() * d(b)?,
        Expr::Div(a, b) => {
            (d(a)? * b.as_ref().clone() - a.as_ref().clone() * d(b)?)
                / b.as_ref().clone().pow(Expr::num(2.0))
        }
        Expr::Pow(a, b) => match b.as_ref() {
            // n·u^(n−1)·u′
            Expr::Num(n) => {
                Expr::num(*n) * a.as_ref().clone().pow(Expr::num(n - 1.0)) * d(a)?
            }
            // u^v·(v′·ln u + v·u′/u)
            _ => {
                let u = a.as_ref().clone();
                let v = b.as_ref().clone();
                expr.clone()
                    * (d(b)? * Expr::call(Func::Ln, u.clone()) + v * (d(a)? / u))
            }
        },
        Expr::Call(func, e) => {
            let outer = match func {
                Func::Sin => Expr::Call(Func::Cos, e.clone()),
                Func::Cos => Expr::Neg(Expr::Call(Func::Sin, e.clone()).into()),
                Func::Tan => {
                    Expr::num(1.0) / Expr::Call(Func::Cos, e.clone()).pow(Expr::num(2.0))
                }
                Func::Sqrt => Expr::num(0.5) / Expr::Call(Func::Sqrt, e.clone()),
                Func::Exp => Expr::Call(Func::Exp, e.clone()),
                Func::Ln => Expr::num(1.0) / e.as_ref().clone(),
                Func::Abs => return Err(DiffError(Func::Abs.name())),
            };
            outer * d(e)?
        }
    })
}

/// The binomial coefficient `C(n, k)` as an `f64`.
///
/// Multiplicative evaluation; every partial product is itself a binomial
/// coefficient, so the result is exact while it fits in the 53-bit mantissa.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut acc = 1.0;
    for i in 1..=k {
        acc = acc * (n - k + i) as f64 / i as f64;
    }
    acc
}
