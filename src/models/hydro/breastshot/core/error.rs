use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while analysing a breastshot wheel.
#[derive(Debug, Error)]
pub enum BreastshotError {
    /// The wheel is not turning forward.
    #[error("rotational speed must be strictly positive")]
    Speed(#[source] ConstraintError),

    /// A configuration value is out of range.
    #[error("invalid breastshot config: {field}")]
    Config {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The crest lies inside the rim, so the wheel would cut into the channel.
    #[error("wheel rim encloses the crest")]
    OverlapsCrest,

    /// The nappe falls to the tailwater without touching the wheel.
    #[error("nappe misses the wheel")]
    NoContact,

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// A rim crossing did not converge within the iteration limit.
    #[error("contact search hit iteration limit: residual={residual:?}")]
    ContactNotConverged {
        /// Best squared-distance residual, in m².
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
