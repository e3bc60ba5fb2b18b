//! Rule execution machinery: delta sets and the conjunctive solver.

pub mod delta;
pub mod solve;

pub use delta::DeltaSet;
pub use solve::{solve, solve_seminaive, Bindings, SCOPE_VAR};

#[cfg(test)]
mod tests;
