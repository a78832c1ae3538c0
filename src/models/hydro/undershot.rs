//! Undershot water wheel model.
//!
//! [`Undershot`] implements [`twine_core::Model`] for a wheel whose lower
//! blades are pushed along by the stream. The computational core is in the
//! internal [`core`] module.

pub(crate) mod core;

pub use self::core::{UndershotConfig, UndershotError, UndershotResults};

use twine_core::Model;
use uom::si::f64::{AngularVelocity, Length, Power};

use crate::support::{
    river::River,
    wheel::{DEFAULT_RESOLUTION, Wheel},
};

use super::MeanPower;

/// How high the axle sits and how fast the wheel turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UndershotInput {
    /// Height of the axle above the free surface, negative below it.
    pub axle_height: Length,

    /// Rotational speed of the wheel.
    pub speed: AngularVelocity,
}

/// An undershot wheel on a river, evaluated on an `N`-point angle grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Undershot<const N: usize = DEFAULT_RESOLUTION> {
    river: River,
    wheel: Wheel,
    config: UndershotConfig,
}

impl<const N: usize> Undershot<N> {
    /// Creates a model with the default [`UndershotConfig`].
    #[must_use]
    pub fn new(river: River, wheel: Wheel) -> Self {
        Self {
            river,
            wheel,
            config: UndershotConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(self, config: UndershotConfig) -> Self {
        Self { config, ..self }
    }

    #[must_use]
    pub fn river(&self) -> &River {
        &self.river
    }

    #[must_use]
    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    #[must_use]
    pub fn config(&self) -> &UndershotConfig {
        &self.config
    }
}

impl<const N: usize> Model for Undershot<N> {
    type Input = UndershotInput;
    type Output = UndershotResults<N>;
    type Error = UndershotError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        core::analyze::<N>(
            &self.river,
            &self.wheel,
            &self.config,
            input.axle_height,
            input.speed,
        )
    }
}

impl<const N: usize> MeanPower for UndershotResults<N> {
    fn mean_power(&self) -> Power {
        self.mean_power
    }
}
