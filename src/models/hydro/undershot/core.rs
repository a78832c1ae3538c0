//! Undershot wheel analysis over one revolution.
//!
//! The lower blades of the wheel dip into the stream, which pushes on them
//! as a drag force. Each wetted blade behaves like a flat plate across the
//! flow. A blade runs from the barrel it is mounted on out to the rim, and
//! only the stretch of it below the free surface is wetted. Below the axle
//! that stretch ends at the tip; above a submerged axle it starts at the
//! root. The wetted stretch moves at the speed of its midpoint, the centre
//! of pressure. Drag is evaluated on the relative speed of stream and blade,
//! so a blade outrunning the stream is braked.

mod config;
mod error;
mod results;

pub use config::UndershotConfig;
pub use error::UndershotError;
pub use results::UndershotResults;

use std::f64::consts::TAU;

use uom::si::{
    angle::radian,
    angular_velocity::radian_per_second,
    f64::{Angle, AngularVelocity, Force, Length, Power, Velocity},
    force::newton,
    length::meter,
    power::watt,
    velocity::meter_per_second,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive},
    river::River,
    wheel::{AngleGrid, Wheel},
};

/// Analyses an undershot wheel whose axle sits `axle_height` above the free
/// surface, turning at `speed`.
///
/// # Errors
///
/// Returns an [`UndershotError`] if the speed or configuration is invalid,
/// or if the wheel misses the water or strikes the bed.
pub(super) fn analyze<const N: usize>(
    river: &River,
    wheel: &Wheel,
    config: &UndershotConfig,
    axle_height: Length,
    speed: AngularVelocity,
) -> Result<UndershotResults<N>, UndershotError> {
    let omega = StrictlyPositive::new(speed)
        .map_err(UndershotError::Speed)?
        .into_inner()
        .get::<radian_per_second>();
    let blades = Blades::new(river, wheel, config, axle_height, omega)?;

    let mut wetted_height = [0.0; N];
    let mut blade_speed = [0.0; N];
    let mut drag = [0.0; N];
    let mut blade = [0.0; N];
    for i in 0..N {
        if let Some(sample) = blades.at(AngleGrid::<N>::theta(i)) {
            wetted_height[i] = sample.height;
            blade_speed[i] = sample.speed;
            drag[i] = sample.drag;
            blade[i] = sample.drag * sample.speed;
        }
    }

    let blade_power = blade.map(Power::new::<watt>);
    let wheel_power = AngleGrid::<N>::superpose(&blade_power, wheel.blades());
    let (entry, exit) = blades.immersion();

    Ok(UndershotResults {
        entry_angle: Angle::new::<radian>(entry),
        exit_angle: Angle::new::<radian>(exit),
        wetted_height: wetted_height.map(Length::new::<meter>),
        blade_speed: blade_speed.map(Velocity::new::<meter_per_second>),
        drag_force: drag.map(Force::new::<newton>),
        blade_power,
        mean_power: AngleGrid::<N>::mean(&wheel_power),
        wheel_power,
    })
}

/// The wheel and stream in SI units.
#[derive(Debug, Clone, Copy)]
struct Blades {
    omega: f64,
    radius: f64,
    barrel: f64,
    /// Height of the axle above the free surface.
    yc: f64,
    /// Wheel width that sits in the channel.
    width: f64,
    drag_coefficient: f64,
    velocity: f64,
    rho: f64,
}

/// A wetted blade at one angle.
#[derive(Debug, Clone, Copy)]
struct BladeSample {
    height: f64,
    speed: f64,
    drag: f64,
}

impl Blades {
    fn new(
        river: &River,
        wheel: &Wheel,
        config: &UndershotConfig,
        axle_height: Length,
        omega: f64,
    ) -> Result<Self, UndershotError> {
        let drag_coefficient = StrictlyPositive::new(config.drag_coefficient)
            .map_err(|source| UndershotError::Config {
                field: "drag_coefficient",
                source,
            })?
            .into_inner();
        let barrel = NonNegative::new(config.barrel_radius)
            .map_err(|source| UndershotError::Config {
                field: "barrel_radius",
                source,
            })?
            .into_inner();

        let radius = wheel.radius();
        if barrel >= radius {
            return Err(UndershotError::BarrelRadius);
        }
        if axle_height >= radius {
            return Err(UndershotError::NotImmersed);
        }
        // A rim resting exactly on the bed is allowed, up to rounding.
        if radius - axle_height > river.depth() * (1.0 + 4.0 * f64::EPSILON) {
            return Err(UndershotError::HitsBed);
        }

        Ok(Self {
            omega,
            radius: wheel.r(),
            barrel: barrel.get::<meter>(),
            yc: axle_height.get::<meter>(),
            width: wheel.effective_width(river.width()).get::<meter>(),
            drag_coefficient,
            velocity: river.velocity().get::<meter_per_second>(),
            rho: river.rho(),
        })
    }

    /// Angles between which some part of the blade is below the surface.
    ///
    /// With the axle above the surface the tip is the first part to enter
    /// the water. With the axle submerged the root is the last part to leave.
    fn immersion(&self) -> (f64, f64) {
        let reach = if self.yc < 0.0 {
            self.barrel
        } else {
            self.radius
        };
        let entry = (-self.yc / reach).clamp(-1.0, 1.0).acos();
        (entry, TAU - entry)
    }

    /// Radial span `(inner, outer)` of the blade at `theta` that lies below the surface.
    ///
    /// A point at radius `r` along the blade sits at `yc + r cos θ`.
    fn wetted_span(&self, cos: f64) -> Option<(f64, f64)> {
        let (inner, outer) = if cos < 0.0 {
            ((self.yc / -cos).max(self.barrel), self.radius)
        } else if cos > 0.0 {
            (self.barrel, (-self.yc / cos).min(self.radius))
        } else if self.yc < 0.0 {
            (self.barrel, self.radius)
        } else {
            return None;
        };
        (outer > inner).then_some((inner, outer))
    }

    /// The wetted blade at `theta`, or `None` if the blade is dry.
    fn at(&self, theta: f64) -> Option<BladeSample> {
        let cos = theta.cos();
        let (inner, outer) = self.wetted_span(cos)?;
        let height = (outer - inner) * cos.abs();
        if height <= 0.0 {
            return None;
        }

        let centre_of_pressure = 0.5 * (inner + outer);
        let speed = -self.omega * centre_of_pressure * cos;

        let relative = self.velocity - speed;
        let area = self.width * height;
        let drag = 0.5 * self.rho * self.drag_coefficient * area * relative * relative.abs();

        Some(BladeSample {
            height,
            speed,
            drag,
        })
    }
}
