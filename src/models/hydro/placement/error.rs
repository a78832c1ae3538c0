use thiserror::Error;

use crate::support::optimize::nelder_mead;

/// Errors that can occur while placing a wheel.
///
/// `E` is the error type of the wheel model being placed.
#[derive(Debug, Error)]
pub enum PlacementError<E: std::error::Error + 'static> {
    /// The search could not start.
    #[error("placement search failed to start")]
    Optimizer(#[from] nelder_mead::Error),

    /// The search did not converge within the iteration limit.
    #[error("placement search hit iteration limit: iters={iters}")]
    MaxIters { iters: usize },

    /// The model failed at the best point found.
    #[error("wheel model failed at the optimum")]
    Model(#[source] E),
}
