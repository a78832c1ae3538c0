//! Torque from held water and impulse from water that is not captured.

use crate::support::wheel::AngleGrid;

use super::{MomentArm, Setup};

/// Lever arm of the water in a single bucket, in m.
///
/// Outside the contact angles the bucket holds no water and the arm is zero.
pub(super) fn moment_arm<const N: usize>(setup: &Setup, arm: &MomentArm) -> [f64; N] {
    std::array::from_fn(|i| {
        let theta = AngleGrid::<N>::theta(i);
        if setup.carries_water(theta) {
            arm.at(theta, setup.radius)
        } else {
            0.0
        }
    })
}

/// Power from the weight of the held water, `ρ g V r ω`, in W.
pub(super) fn potential<const N: usize>(
    setup: &Setup,
    volume: &[f64; N],
    moment_arm: &[f64; N],
) -> [f64; N] {
    std::array::from_fn(|i| setup.rho * setup.g * volume[i] * moment_arm[i] * setup.omega)
}

/// Power from water that strikes a blade without being caught, in W.
///
/// The flow striking the blade grows with the blade's projection past the
/// entry angle. What the bucket does not take in pushes on the blade at the
/// speed the nappe overtakes it.
pub(super) fn impulse<const N: usize>(setup: &Setup, filling_rate: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| {
        let theta = AngleGrid::<N>::theta(i);
        if !setup.is_filling(theta) {
            return 0.0;
        }

        let fall = setup.fall_speed(theta);
        let u = setup.blade_speed(theta);
        let striking = (fall * setup.width * setup.radius * (theta - setup.entry).sin())
            .min(setup.flow_available);
        let uncaptured = (striking - filling_rate[i]).max(0.0);

        let power = setup.rho * uncaptured * (fall - u).max(0.0) * u;
        if power.is_nan() { 0.0 } else { power.max(0.0) }
    })
}
