//! River model shared by all wheel types.
//!
//! A [`River`] is a rectangular channel of uniform flow. For breastshot
//! sites it ends in a crest with a vertical drop (the head) to the
//! tailwater, and the water leaves the crest as a [`Nappe`].
//!
//! # Example
//!
//! ```
//! use twine_hydro::support::river::River;
//! use uom::si::{
//!     f64::{Length, Velocity},
//!     length::meter,
//!     power::watt,
//!     velocity::meter_per_second,
//!     volume_rate::cubic_meter_per_second,
//! };
//!
//! let river = River::new(
//!     Length::new::<meter>(0.77),
//!     Length::new::<meter>(0.3),
//!     Velocity::new::<meter_per_second>(1.5),
//!     Length::new::<meter>(2.0),
//! )
//! .unwrap();
//!
//! assert!((river.flow_rate().get::<cubic_meter_per_second>() - 0.3465).abs() < 1e-12);
//! assert!(river.available_power().get::<watt>() > 0.0);
//! ```

mod nappe;

pub use nappe::{Nappe, NappePoint, WEIR_COEFFICIENT};

use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Length, MassDensity, Power, Velocity, VolumeRate},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    velocity::meter_per_second,
    volume_rate::cubic_meter_per_second,
};

use crate::support::constraint::{ConstraintError, NonNegative, StrictlyPositive};

/// Density of fresh water used when none is given.
pub const WATER_DENSITY: f64 = 1000.0;

/// Standard gravity used when none is given.
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Errors raised when a river parameter is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RiverError {
    #[error("river width must be strictly positive")]
    Width(#[source] ConstraintError),
    #[error("river depth must be strictly positive")]
    Depth(#[source] ConstraintError),
    #[error("river velocity must be strictly positive")]
    Velocity(#[source] ConstraintError),
    #[error("river head must not be negative")]
    Head(#[source] ConstraintError),
    #[error("water density must be strictly positive")]
    Density(#[source] ConstraintError),
    #[error("gravity must be strictly positive")]
    Gravity(#[source] ConstraintError),
}

/// A rectangular channel with uniform flow and an optional drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct River {
    width: Length,
    depth: Length,
    velocity: Velocity,
    head: Length,
    density: MassDensity,
    gravity: Acceleration,
}

impl River {
    /// Creates a river of fresh water under standard gravity.
    ///
    /// # Errors
    ///
    /// Returns a [`RiverError`] naming the first parameter that is out of range.
    pub fn new(
        width: Length,
        depth: Length,
        velocity: Velocity,
        head: Length,
    ) -> Result<Self, RiverError> {
        Ok(Self {
            width: StrictlyPositive::new(width)
                .map_err(RiverError::Width)?
                .into_inner(),
            depth: StrictlyPositive::new(depth)
                .map_err(RiverError::Depth)?
                .into_inner(),
            velocity: StrictlyPositive::new(velocity)
                .map_err(RiverError::Velocity)?
                .into_inner(),
            head: NonNegative::new(head).map_err(RiverError::Head)?.into_inner(),
            density: MassDensity::new::<kilogram_per_cubic_meter>(WATER_DENSITY),
            gravity: Acceleration::new::<meter_per_second_squared>(STANDARD_GRAVITY),
        })
    }

    /// Replaces the water density.
    ///
    /// # Errors
    ///
    /// Returns [`RiverError::Density`] if the density is not strictly positive.
    pub fn with_density(self, density: MassDensity) -> Result<Self, RiverError> {
        let density = StrictlyPositive::new(density)
            .map_err(RiverError::Density)?
            .into_inner();
        Ok(Self { density, ..self })
    }

    /// Replaces the gravitational acceleration.
    ///
    /// # Errors
    ///
    /// Returns [`RiverError::Gravity`] if the acceleration is not strictly positive.
    pub fn with_gravity(self, gravity: Acceleration) -> Result<Self, RiverError> {
        let gravity = StrictlyPositive::new(gravity)
            .map_err(RiverError::Gravity)?
            .into_inner();
        Ok(Self { gravity, ..self })
    }

    #[must_use]
    pub fn width(&self) -> Length {
        self.width
    }

    #[must_use]
    pub fn depth(&self) -> Length {
        self.depth
    }

    #[must_use]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Vertical drop from the crest to the tailwater.
    #[must_use]
    pub fn head(&self) -> Length {
        self.head
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.density
    }

    #[must_use]
    pub fn gravity(&self) -> Acceleration {
        self.gravity
    }

    /// Volumetric flow rate, `Q = width * depth * velocity`.
    #[must_use]
    pub fn flow_rate(&self) -> VolumeRate {
        VolumeRate::new::<cubic_meter_per_second>(
            self.width.get::<meter>()
                * self.depth.get::<meter>()
                * self.velocity.get::<meter_per_second>(),
        )
    }

    /// Kinetic power carried by the stream, `½ρQv²`.
    #[must_use]
    pub fn kinetic_power(&self) -> Power {
        let v = self.velocity.get::<meter_per_second>();
        Power::new::<watt>(0.5 * self.rho() * self.q() * v * v)
    }

    /// Potential power released over the head, `ρgQH`.
    #[must_use]
    pub fn potential_power(&self) -> Power {
        Power::new::<watt>(self.rho() * self.g() * self.q() * self.head.get::<meter>())
    }

    /// Total hydraulic power available at the site.
    #[must_use]
    pub fn available_power(&self) -> Power {
        self.kinetic_power() + self.potential_power()
    }

    /// Power an ideal impulse wheel extracts with blades moving at `blade_speed`.
    ///
    /// Uses the jet-on-flat-plate result `2ρQ(v − u)u`. The result peaks at
    /// `u = v/2`, where it equals [`River::kinetic_power`], and is zero when
    /// the blades are stationary or faster than the stream.
    #[must_use]
    pub fn ideal_impulse_power(&self, blade_speed: Velocity) -> Power {
        let v = self.velocity.get::<meter_per_second>();
        let u = blade_speed.get::<meter_per_second>();
        if u <= 0.0 || u >= v {
            return Power::new::<watt>(0.0);
        }
        Power::new::<watt>(2.0 * self.rho() * self.q() * (v - u) * u)
    }

    /// The sheet of water leaving the crest.
    #[must_use]
    pub fn nappe(&self) -> Nappe {
        Nappe::new(self.q(), self.width.get::<meter>(), self.head.get::<meter>(), self.g())
    }

    pub(crate) fn rho(&self) -> f64 {
        self.density.get::<kilogram_per_cubic_meter>()
    }

    pub(crate) fn g(&self) -> f64 {
        self.gravity.get::<meter_per_second_squared>()
    }

    pub(crate) fn q(&self) -> f64 {
        self.flow_rate().get::<cubic_meter_per_second>()
    }
}
