use thiserror::Error;

/// Errors that prevent a Nelder–Mead search from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A bound is `NaN` or its lower limit exceeds its upper limit.
    #[error("invalid bounds for variable {dim}")]
    InvalidBounds {
        /// Index of the offending variable.
        dim: usize,
    },

    /// The objective is not finite at the (clipped) starting point.
    #[error("objective is not finite at the starting point")]
    InfeasibleStart,
}
