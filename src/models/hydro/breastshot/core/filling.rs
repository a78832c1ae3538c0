//! Bucket filling and draining over one revolution.

use crate::support::wheel::AngleGrid;

use super::Setup;

/// Inflow to a single bucket at each grid angle, in m³/s.
///
/// Inside the filling window the bucket mouth, projected horizontally,
/// takes water at the speed the nappe falls past the descending blade. The
/// inflow can never exceed the flow the nappe delivers across the wheel.
pub(super) fn filling_rate<const N: usize>(setup: &Setup) -> [f64; N] {
    std::array::from_fn(|i| {
        let theta = AngleGrid::<N>::theta(i);
        if !setup.is_filling(theta) {
            return 0.0;
        }

        let relative = setup.fall_speed(theta) - setup.blade_speed(theta);
        let rate = setup.width * setup.radius * theta.sin() * relative;
        if rate.is_nan() {
            0.0
        } else {
            rate.clamp(0.0, setup.flow_available)
        }
    })
}

/// Water held by a single bucket at each grid angle, in m³.
///
/// The bucket accumulates its inflow over the time each grid step takes,
/// up to its capacity. Once the blade passes the drain angle, the bucket
/// empties linearly over the drain span from what it held at that angle.
/// Inflow arriving after the drain angle is spilled.
pub(super) fn volume<const N: usize>(setup: &Setup, filling_rate: &[f64; N]) -> [f64; N] {
    let dt = AngleGrid::<N>::step_rad() / setup.omega;

    let mut held = 0.0;
    let mut volume: [f64; N] = std::array::from_fn(|i| {
        held += filling_rate[i] * dt;
        held.min(setup.bucket_capacity)
    });

    let peak = volume
        .iter()
        .enumerate()
        .take_while(|&(i, _)| AngleGrid::<N>::theta(i) <= setup.drain_start)
        .fold(0.0, |peak, (_, v)| f64::max(peak, *v));
    for (i, v) in volume.iter_mut().enumerate() {
        let theta = AngleGrid::<N>::theta(i);
        if theta > setup.drain_start {
            *v = peak * (1.0 - (theta - setup.drain_start) / setup.drain_span).max(0.0);
        }
    }

    volume
}
