//! Water wheel geometry.
//!
//! Blade angles are measured from the top of the wheel and increase in the
//! direction of rotation, so a blade tip sits at
//! `(xc + R sin θ, yc + R cos θ)`. At θ = π/2 the blade points downstream
//! and at θ = π it is at the bottom of the wheel.
//!
//! Per-angle quantities are evaluated on an [`AngleGrid`], a periodic grid
//! that lets a single blade's curve be rotated onto every other blade.

mod angle_grid;

pub use angle_grid::{AngleGrid, DEFAULT_RESOLUTION};

use std::f64::consts::TAU;

use thiserror::Error;
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

use crate::support::constraint::{ConstraintError, StrictlyPositive};

/// Errors raised when a wheel parameter is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("wheel radius must be strictly positive")]
    Radius(#[source] ConstraintError),
    #[error("wheel width must be strictly positive")]
    Width(#[source] ConstraintError),
    #[error("a wheel needs at least one blade")]
    Blades(#[source] ConstraintError),
}

/// A point in the plane of the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: Length,
    pub y: Length,
}

impl Position {
    #[must_use]
    pub fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    pub(crate) fn meters(&self) -> (f64, f64) {
        (self.x.get::<meter>(), self.y.get::<meter>())
    }
}

/// Rim dimensions and blade count of a wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    radius: Length,
    width: Length,
    blades: usize,
}

impl Wheel {
    /// Creates a wheel.
    ///
    /// # Errors
    ///
    /// Returns a [`WheelError`] if the radius or width is not strictly
    /// positive, or if there are no blades.
    pub fn new(radius: Length, width: Length, blades: usize) -> Result<Self, WheelError> {
        Ok(Self {
            radius: StrictlyPositive::new(radius)
                .map_err(WheelError::Radius)?
                .into_inner(),
            width: StrictlyPositive::new(width)
                .map_err(WheelError::Width)?
                .into_inner(),
            blades: StrictlyPositive::new(blades)
                .map_err(WheelError::Blades)?
                .into_inner(),
        })
    }

    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }

    #[must_use]
    pub fn width(&self) -> Length {
        self.width
    }

    #[must_use]
    pub fn blades(&self) -> usize {
        self.blades
    }

    /// Angle between neighbouring blades.
    #[must_use]
    pub fn blade_spacing(&self) -> Angle {
        Angle::new::<radian>(self.spacing())
    }

    /// Width of the wheel that actually sits in a channel of `channel_width`.
    #[must_use]
    pub fn effective_width(&self, channel_width: Length) -> Length {
        if self.width < channel_width {
            self.width
        } else {
            channel_width
        }
    }

    /// Position of a blade tip at angle `theta` for a wheel centred on `centre`.
    #[must_use]
    pub fn tip(&self, centre: Position, theta: Angle) -> Position {
        let (x, y) = self.tip_at(centre.meters(), theta.get::<radian>());
        Position::new(Length::new::<meter>(x), Length::new::<meter>(y))
    }

    /// Closed outline of the rim, starting and ending at the top of the wheel.
    #[must_use]
    pub fn rim<const K: usize>(&self, centre: Position) -> [Position; K] {
        const {
            assert!(K >= 2, "a rim outline needs at least 2 points");
        };

        let step = TAU / (K - 1) as f64;
        std::array::from_fn(|i| self.tip(centre, Angle::new::<radian>(step * i as f64)))
    }

    pub(crate) fn r(&self) -> f64 {
        self.radius.get::<meter>()
    }

    pub(crate) fn spacing(&self) -> f64 {
        TAU / self.blades as f64
    }

    pub(crate) fn tip_at(&self, (xc, yc): (f64, f64), theta: f64) -> (f64, f64) {
        (xc + self.r() * theta.sin(), yc + self.r() * theta.cos())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// The laboratory wheel: 0.504 m radius, 1.008 m wide, six blades.
    pub(crate) fn lab_wheel() -> Wheel {
        Wheel::new(Length::new::<meter>(0.504), Length::new::<meter>(1.008), 6)
            .expect("test wheel should be valid")
    }

    pub(crate) fn at(x: f64, y: f64) -> Position {
        Position::new(Length::new::<meter>(x), Length::new::<meter>(y))
    }
}
