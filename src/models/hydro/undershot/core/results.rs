use uom::si::{
    f64::{Angle, Force, Length, Power, Velocity},
    power::watt,
};

use crate::support::{river::River, wheel::AngleGrid};

/// Per-angle curves and mean power of an undershot wheel.
///
/// Every array is indexed by the points of an [`AngleGrid<N>`]. All curves
/// except `wheel_power` describe a single blade.
#[derive(Debug, Clone, PartialEq)]
pub struct UndershotResults<const N: usize> {
    /// Blade angle at which the tip enters the water.
    pub entry_angle: Angle,

    /// Blade angle at which the tip leaves the water.
    pub exit_angle: Angle,

    /// Vertical extent of the wetted part of the blade.
    pub wetted_height: [Length; N],

    /// Horizontal speed of the blade's centre of pressure, positive downstream.
    pub blade_speed: [Velocity; N],

    /// Drag of the stream on the blade, positive downstream.
    pub drag_force: [Force; N],

    /// Power of a single blade, negative where the blade outruns the stream.
    pub blade_power: [Power; N],

    /// Power of the whole wheel, every blade superposed.
    pub wheel_power: [Power; N],

    /// Wheel power averaged over one revolution.
    pub mean_power: Power,
}

impl<const N: usize> UndershotResults<N> {
    /// Blade angles the curves are evaluated at.
    #[must_use]
    pub fn angles(&self) -> [Angle; N] {
        AngleGrid::<N>::angles()
    }

    /// Share of the river's available power delivered by the wheel.
    ///
    /// Returns `None` for a river that carries no power.
    #[must_use]
    pub fn efficiency(&self, river: &River) -> Option<f64> {
        let available = river.available_power().get::<watt>();
        (available > 0.0).then(|| self.mean_power.get::<watt>() / available)
    }
}
