use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Length, Power},
    length::meter,
    power::watt,
};

use crate::support::optimize::nelder_mead;

/// Search space and stopping criteria for placement optimisation.
///
/// Speeds are searched in rpm and positions in metres, so `position_tol`
/// also serves as the tolerance on speed in rpm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Furthest a breastshot axle may sit downstream of, or above, the crest.
    pub max_distance: Length,

    pub min_speed: AngularVelocity,
    pub max_speed: AngularVelocity,

    /// Iteration limit per search variable.
    pub max_iters_per_dim: usize,

    /// Simplex size at which the search stops.
    pub position_tol: Length,

    /// Spread in mean power at which the search stops.
    pub power_tol: Power,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_distance: Length::new::<meter>(100.0),
            min_speed: AngularVelocity::new::<revolution_per_minute>(1.0),
            max_speed: AngularVelocity::new::<revolution_per_minute>(40.0),
            max_iters_per_dim: 200,
            position_tol: Length::new::<meter>(1e-4),
            power_tol: Power::new::<watt>(1e-4),
        }
    }
}

impl PlacementConfig {
    pub(super) fn nelder_mead(&self, dims: usize) -> nelder_mead::Config {
        nelder_mead::Config {
            max_iters: self.max_iters_per_dim * dims,
            x_abs_tol: self.position_tol.get::<meter>(),
            f_abs_tol: self.power_tol.get::<watt>(),
            ..nelder_mead::Config::for_dims(dims)
        }
    }

    pub(super) fn speed_bounds(&self) -> nelder_mead::Bounds {
        nelder_mead::Bounds::new(
            self.min_speed.get::<revolution_per_minute>(),
            self.max_speed.get::<revolution_per_minute>(),
        )
    }
}
