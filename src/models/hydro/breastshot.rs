//! Breastshot water wheel model.
//!
//! [`Breastshot`] implements [`twine_core::Model`] for a wheel fed by the
//! nappe falling from a crest. The computational core is in the internal
//! [`core`] module.
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_hydro::{
//!     models::hydro::breastshot::{Breastshot, BreastshotInput},
//!     support::{river::River, wheel::{Position, Wheel}},
//! };
//! use uom::si::{
//!     angular_velocity::revolution_per_minute,
//!     f64::{AngularVelocity, Length, Velocity},
//!     length::meter,
//!     power::watt,
//!     velocity::meter_per_second,
//! };
//!
//! let river = River::new(
//!     Length::new::<meter>(0.77),
//!     Length::new::<meter>(0.3),
//!     Velocity::new::<meter_per_second>(1.5),
//!     Length::new::<meter>(2.0),
//! )
//! .unwrap();
//! let wheel = Wheel::new(Length::new::<meter>(0.504), Length::new::<meter>(1.008), 6).unwrap();
//!
//! let model: Breastshot = Breastshot::new(river, wheel);
//! let results = model
//!     .call(&BreastshotInput {
//!         centre: Position::new(Length::new::<meter>(1.0), Length::new::<meter>(-0.6)),
//!         speed: AngularVelocity::new::<revolution_per_minute>(15.0),
//!     })
//!     .unwrap();
//!
//! assert!(results.mean_power.get::<watt>() > 0.0);
//! ```

pub(crate) mod core;

pub use self::core::{
    BreastshotConfig, BreastshotError, BreastshotResults, Contact, ContactConfig, MomentArm,
};

use twine_core::Model;
use uom::si::f64::{AngularVelocity, Power};

use crate::support::{
    river::River,
    wheel::{DEFAULT_RESOLUTION, Position, Wheel},
};

use super::MeanPower;

/// Where the wheel sits and how fast it turns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreastshotInput {
    /// Axle position relative to the crest lip.
    pub centre: Position,

    /// Rotational speed of the wheel.
    pub speed: AngularVelocity,
}

/// A breastshot wheel on a river, evaluated on an `N`-point angle grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breastshot<const N: usize = DEFAULT_RESOLUTION> {
    river: River,
    wheel: Wheel,
    config: BreastshotConfig,
}

impl<const N: usize> Breastshot<N> {
    /// Creates a model with the default [`BreastshotConfig`].
    #[must_use]
    pub fn new(river: River, wheel: Wheel) -> Self {
        Self {
            river,
            wheel,
            config: BreastshotConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(self, config: BreastshotConfig) -> Self {
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
    pub fn config(&self) -> &BreastshotConfig {
        &self.config
    }
}

impl<const N: usize> Model for Breastshot<N> {
    type Input = BreastshotInput;
    type Output = BreastshotResults<N>;
    type Error = BreastshotError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        core::analyze::<N>(
            &self.river,
            &self.wheel,
            &self.config,
            input.centre,
            input.speed,
        )
    }
}

impl<const N: usize> MeanPower for BreastshotResults<N> {
    fn mean_power(&self) -> Power {
        self.mean_power
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{angular_velocity::revolution_per_minute, power::watt};

    use crate::support::{
        river::test_support::stream,
        wheel::test_support::{at, lab_wheel},
    };

    #[test]
    fn model_delegates_to_core() {
        let model: Breastshot = Breastshot::new(stream(2.0), lab_wheel());
        let input = BreastshotInput {
            centre: at(1.0, -0.6),
            speed: AngularVelocity::new::<revolution_per_minute>(15.0),
        };

        let results = model.call(&input).expect("lab wheel should run");
        let direct = core::analyze::<DEFAULT_RESOLUTION>(
            model.river(),
            model.wheel(),
            model.config(),
            input.centre,
            input.speed,
        )
        .expect("lab wheel should run");

        assert_eq!(results, direct);
        assert_eq!(results.mean_power(), results.mean_power);
    }

    #[test]
    fn grid_resolution_is_chosen_by_the_caller() {
        let model = Breastshot::<360>::new(stream(2.0), lab_wheel());
        let results = model
            .call(&BreastshotInput {
                centre: at(1.0, -0.6),
                speed: AngularVelocity::new::<revolution_per_minute>(15.0),
            })
            .expect("lab wheel should run");

        assert_eq!(results.wheel_power.len(), 360);
        assert!(results.mean_power.get::<watt>() > 0.0);
    }

    #[test]
    fn custom_config_is_used() {
        let config = BreastshotConfig {
            moment_arm: MomentArm::CAD_FIT,
            ..BreastshotConfig::default()
        };
        let model: Breastshot = Breastshot::new(stream(2.0), lab_wheel()).with_config(config);
        assert_eq!(model.config().moment_arm, MomentArm::CAD_FIT);
    }
}
