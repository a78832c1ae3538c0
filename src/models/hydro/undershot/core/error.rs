use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while analysing an undershot wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndershotError {
    /// The wheel is not turning forward.
    #[error("rotational speed must be strictly positive")]
    Speed(#[source] ConstraintError),

    /// A configuration value is out of range.
    #[error("invalid undershot config: {field}")]
    Config {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The barrel is at least as large as the wheel, leaving no blade.
    #[error("barrel radius must be smaller than the wheel radius")]
    BarrelRadius,

    /// The axle is so high that no blade reaches the water.
    #[error("wheel does not reach the water surface")]
    NotImmersed,

    /// The axle is so low that the blades would strike the channel bed.
    #[error("wheel rim extends below the channel bed")]
    HitsBed,
}
