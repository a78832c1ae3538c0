//! Results of a breastshot wheel analysis.

use uom::si::{
    f64::{Angle, Length, Power, Volume, VolumeRate},
    power::watt,
};

use crate::support::{river::River, wheel::AngleGrid};

use super::Contact;

/// Per-angle curves and mean power of a breastshot wheel.
///
/// Every array is indexed by the points of an [`AngleGrid<N>`]. All curves
/// except `wheel_power` describe a single blade.
#[derive(Debug, Clone, PartialEq)]
pub struct BreastshotResults<const N: usize> {
    /// Where the nappe meets the rim.
    pub contact: Contact,

    /// Blade angle at which buckets start to fill.
    pub entry_angle: Angle,

    /// Blade angle past which buckets carry no water.
    pub exit_angle: Angle,

    pub filling_rate: [VolumeRate; N],

    /// Water held in the bucket.
    pub volume: [Volume; N],

    /// Lever arm of the held water about the axle.
    pub moment_arm: [Length; N],

    /// Power from the weight of the held water.
    pub potential_power: [Power; N],

    /// Power from water striking the blade without being captured.
    pub impulse_power: [Power; N],

    /// Potential plus impulse power of a single blade.
    pub blade_power: [Power; N],

    /// Power of the whole wheel, every blade superposed.
    pub wheel_power: [Power; N],

    /// Wheel power averaged over one revolution.
    pub mean_power: Power,
}

impl<const N: usize> BreastshotResults<N> {
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
