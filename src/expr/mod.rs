//! Symbolic expressions of one real variable.
//!
//! Trial wavefunctions enter the crate as text like `"sin(x) + 2"`, are
//! parsed once into an [`Expr`] tree, and from then on are evaluated,
//! composed, and differentiated structurally. Bad input is rejected at parse
//! time; evaluation itself never fails.

mod ast;
mod calculus;
mod parser;

pub use ast::{Expr, Func};
pub use calculus::binomial;
