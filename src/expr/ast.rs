//! Expression trees over one real variable.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Named scalar functions the evaluator understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Exp,
    Ln,
    Abs,
}

impl Func {
    /// The surface-syntax name, as accepted by the parser.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Sqrt => "sqrt",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Abs => "abs",
        }
    }

    /// Look a function up by name. `log` is accepted as an alias for `ln`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "sqrt" => Func::Sqrt,
            "exp" => Func::Exp,
            "ln" | "log" => Func::Ln,
            "abs" => Func::Abs,
            _ => return None,
        })
    }

    /// Apply the function to a value under IEEE 754 semantics.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Func::Sin => value.sin(),
            Func::Cos => value.cos(),
            Func::Tan => value.tan(),
            Func::Sqrt => value.sqrt(),
            Func::Exp => value.exp(),
            Func::Ln => value.ln(),
            Func::Abs => value.abs(),
        }
    }
}

/// A symbolic expression of one real variable.
///
/// Trees are built by [`Expr::parse`](Expr::parse) or composed structurally
/// with the arithmetic operators:
///
/// ```
/// use rust_ritz::Expr;
///
/// let f = Expr::parse("x^2 + 1").unwrap();
/// let g = Expr::num(2.0) * Expr::var() + f;
/// assert_eq!(g.eval(3.0), 16.0);
/// ```
///
/// Evaluation is total: out-of-domain arguments follow IEEE 754 and produce
/// infinities or NaN rather than errors.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A literal constant.
    Num(f64),
    /// The free variable.
    Var,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// Base raised to an arbitrary exponent, via `f64::powf`.
    Pow(Box<Expr>, Box<Expr>),
    /// A named function applied to a subexpression.
    Call(Func, Box<Expr>),
}

impl Expr {
    /// A literal constant leaf.
    pub fn num(value: f64) -> Self {
        Expr::Num(value)
    }

    /// The free-variable leaf.
    pub fn var() -> Self {
        Expr::Var
    }

    /// `self` raised to `exponent`.
    pub fn pow(self, exponent: Expr) -> Self {
        Expr::Pow(self.into(), exponent.into())
    }

    /// `func` applied to `arg`.
    pub fn call(func: Func, arg: Expr) -> Self {
        Expr::Call(func, arg.into())
    }

    /// Evaluate at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Num(value) => *value,
            Expr::Var => x,
            Expr::Neg(e) => -e.eval(x),
            Expr::Add(a, b) => a.eval(x) + b.eval(x),
            Expr::Sub(a, b) => a.eval(x) - b.eval(x),
            Expr::Mul(a, b) => a.eval(x) * b.eval(x),
            Expr::Div(a, b) => a.eval(x) / b.eval(x),
            Expr::Pow(a, b) => a.eval(x).powf(b.eval(x)),
            Expr::Call(func, e) => func.apply(e.eval(x)),
        }
    }

    /// Structural cleanup: folds constant subtrees and removes arithmetic
    /// identities (`+ 0`, `* 1`, `* 0`, `^ 1`, double negation). Never
    /// reassociates, so evaluation of the result reproduces the original
    /// values apart from the folded operations themselves. The `* 0` fold
    /// discards the other operand, so a non-finite value there (for example
    /// `0 * ln(x)` at `x = 0`) becomes `0` instead of NaN.
    pub fn simplified(&self) -> Expr {
        use Expr::*;
        match self {
            Num(_) | Var => self.clone(),
            Neg(e) => match e.simplified() {
                Num(v) => Num(-v),
                Neg(inner) => *inner,
                s => Neg(s.into()),
            },
            Add(a, b) => match (a.simplified(), b.simplified()) {
                (Num(p), Num(q)) => Num(p + q),
                (Num(z), s) if z == 0.0 => s,
                (s, Num(z)) if z == 0.0 => s,
                (sa, sb) => Add(sa.into(), sb.into()),
            },
            Sub(a, b) => match (a.simplified(), b.simplified()) {
                (Num(p), Num(q)) => Num(p - q),
                (s, Num(z)) if z == 0.0 => s,
                (Num(z), s) if z == 0.0 => Neg(s.into()),
                (sa, sb) => Sub(sa.into(), sb.into()),
            },
            Mul(a, b) => match (a.simplified(), b.simplified()) {
                (Num(p), Num(q)) => Num(p * q),
                (Num(z), _) | (_, Num(z)) if z == 0.0 => Num(0.0),
                (Num(o), s) if o == 1.0 => s,
                (s, Num(o)) if o == 1.0 => s,
                (sa, sb) => Mul(sa.into(), sb.into()),
            },
            Div(a, b) => match (a.simplified(), b.simplified()) {
                (Num(p), Num(q)) => Num(p / q),
                (s, Num(o)) if o == 1.0 => s,
                (sa, sb) => Div(sa.into(), sb.into()),
            },
            Pow(a, b) => match (a.simplified(), b.simplified()) {
                (Num(p), Num(q)) => Num(p.powf(q)),
                (s, Num(o)) if o == 1.0 => s,
                (_, Num(z)) if z == 0.0 => Num(1.0),
                (sa, sb) => Pow(sa.into(), sb.into()),
            },
            Call(func, e) => match e.simplified() {
                Num(v) => Num(func.apply(v)),
                s => Call(*func, s.into()),
            },
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(_) => 3,
            Expr::Pow(..) => 4,
            Expr::Num(_) | Expr::Var | Expr::Call(..) => 5,
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let parens = self.precedence() < min;
        if parens {
            write!(f, "(")?;
        }
        match self {
            Expr::Num(value) => write!(f, "{value}")?,
            Expr::Var => write!(f, "x")?,
            Expr::Neg(e) => {
                write!(f, "-")?;
                e.fmt_with(f, 3)?;
            }
            Expr::Add(a, b) => {
                a.fmt_with(f, 1)?;
                write!(f, " + ")?;
                b.fmt_with(f, 1)?;
            }
            Expr::Sub(a, b) => {
                a.fmt_with(f, 1)?;
                write!(f, " - ")?;
                b.fmt_with(f, 2)?;
            }
            Expr::Mul(a, b) => {
                a.fmt_with(f, 2)?;
                write!(f, " * ")?;
                b.fmt_with(f, 2)?;
            }
            Expr::Div(a, b) => {
                a.fmt_with(f, 2)?;
                write!(f, " / ")?;
                b.fmt_with(f, 3)?;
            }
            Expr::Pow(a, b) => {
                a.fmt_with(f, 5)?;
                write!(f, "^")?;
                b.fmt_with(f, 4)?;
            }
            Expr::Call(func, e) => {
                write!(f, "{}(", func.name())?;
                e.fmt_with(f, 0)?;
                write!(f, ")")?;
            }
        }
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, 0)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(self.into(), rhs.into())
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(self.into(), rhs.into())
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(self.into(), rhs.into())
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(self.into(), rhs.into())
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(self.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_arithmetic() {
        let f = Expr::num(2.0) * Expr::var() + Expr::num(3.0);
        assert_eq!(f.eval(4.0), 11.0);

        let g = Expr::var().pow(Expr::num(2.0)) - Expr::num(1.0);
        assert_eq!(g.eval(3.0), 8.0);
    }

    #[test]
    fn eval_is_total() {
        let f = Expr::num(1.0) / Expr::var();
        assert_eq!(f.eval(0.0), f64::INFINITY);

        let g = Expr::call(Func::Sqrt, Expr::var());
        assert!(g.eval(-1.0).is_nan());

        let h = Expr::call(Func::Ln, Expr::var());
        assert_eq!(h.eval(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn pow_handles_negative_bases() {
        let f = Expr::var().pow(Expr::num(7.0));
        assert_eq!(f.eval(-2.0), -128.0);

        let g = Expr::var().pow(Expr::num(0.0));
        assert_eq!(g.eval(-3.0), 1.0);
    }

    #[test]
    fn simplify_folds_constants() {
        let f = (Expr::num(2.0) + Expr::num(3.0)) * Expr::var();
        assert_eq!(f.simplified(), Expr::num(5.0) * Expr::var());

        let g = Expr::call(Func::Sin, Expr::num(0.0));
        assert_eq!(g.simplified(), Expr::num(0.0));
    }

    #[test]
    fn simplify_removes_identities() {
        let x = Expr::var();
        assert_eq!((x.clone() + Expr::num(0.0)).simplified(), x);
        assert_eq!((x.clone() * Expr::num(1.0)).simplified(), x);
        assert_eq!((x.clone() * Expr::num(0.0)).simplified(), Expr::num(0.0));
        assert_eq!(x.clone().pow(Expr::num(1.0)).simplified(), x);
        assert_eq!((-(-x.clone())).simplified(), x);
    }

    #[test]
    fn zero_fold_absorbs_non_finite_operands() {
        let f = Expr::num(0.0) * Expr::call(Func::Ln, Expr::var());
        assert!(f.eval(0.0).is_nan());
        assert_eq!(f.simplified(), Expr::num(0.0));
        assert_eq!(f.simplified().eval(0.0), 0.0);
    }

    #[test]
    fn simplify_preserves_values() {
        let f = Expr::parse("(x + 0) * (1 * sin(x)) + x^1").unwrap();
        let s = f.simplified();
        for &x in &[-2.0, -0.5, 0.0, 1.3, 4.0] {
            assert_eq!(f.eval(x), s.eval(x));
        }
    }

    #[test]
    fn display_inserts_parens_by_precedence() {
        let f = (Expr::var() + Expr::num(1.0)) * Expr::num(2.0);
        assert_eq!(f.to_string(), "(x + 1) * 2");

        let g = Expr::var().pow(Expr::num(4.0));
        assert_eq!(g.to_string(), "x^4");

        let h = (Expr::var() + Expr::num(1.0)).pow(Expr::num(2.0));
        assert_eq!(h.to_string(), "(x + 1)^2");

        let k = -(Expr::var() + Expr::num(1.0));
        assert_eq!(k.to_string(), "-(x + 1)");
    }

    #[test]
    fn display_round_trips_through_parser() {
        for src in ["x^2 + sin(x)", "(x + 1) / (x - 1)", "2 * exp(-(x^2))"] {
            let f = Expr::parse(src).unwrap();
            let g = Expr::parse(&f.to_string()).unwrap();
            for &x in &[-1.7, 0.2, 3.0] {
                assert_eq!(f.eval(x), g.eval(x));
            }
        }
    }
}
