//! Trial wavefunctions and basis-set operations.

mod function;
mod legendre;
mod set;

pub use function::{BasisFunction, DiffMode};
pub use legendre::{common_basis, BasisKind};
pub use set::Basis;
