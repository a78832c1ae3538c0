//! Breastshot wheel analysis over one revolution.
//!
//! Water leaves the crest as a free-falling nappe and lands in the buckets
//! of a wheel sitting below and downstream of the crest. One bucket is
//! followed around an [`AngleGrid`]:
//!
//! 1. locate where the nappe crosses the rim ([`Contact`]),
//! 2. derive the filling window from the contact angles,
//! 3. integrate the inflow into the bucket and drain it past the drain angle,
//! 4. turn the held water into torque through its moment arm,
//! 5. add the impulse of the water that strikes but is not captured.
//!
//! The single-blade curve is then superposed over every blade.

mod config;
mod contact;
mod error;
mod filling;
mod power;
mod results;

#[cfg(test)]
mod test_support;

pub use config::{BreastshotConfig, ContactConfig, MomentArm};
pub use contact::Contact;
pub use error::BreastshotError;
pub use results::BreastshotResults;

use std::f64::consts::FRAC_PI_2;

use uom::si::{
    angle::radian,
    angular_velocity::radian_per_second,
    f64::{Angle, AngularVelocity, Length, Power, Volume, VolumeRate},
    length::meter,
    power::watt,
    volume::cubic_meter,
    volume_rate::cubic_meter_per_second,
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive},
    river::{Nappe, River},
    wheel::{AngleGrid, Position, Wheel},
};

use contact::find_contact;

/// Analyses a breastshot wheel centred on `centre` and turning at `speed`.
///
/// # Errors
///
/// Returns a [`BreastshotError`] if the speed or configuration is invalid,
/// or if the nappe and the rim do not meet in a usable way.
pub(super) fn analyze<const N: usize>(
    river: &River,
    wheel: &Wheel,
    config: &BreastshotConfig,
    centre: Position,
    speed: AngularVelocity,
) -> Result<BreastshotResults<N>, BreastshotError> {
    let omega = StrictlyPositive::new(speed)
        .map_err(BreastshotError::Speed)?
        .into_inner()
        .get::<radian_per_second>();
    validate(config)?;

    let nappe = river.nappe();
    let contact = find_contact(&nappe, wheel, centre, &config.contact)?;
    let setup = Setup::new(river, wheel, config, nappe, centre, omega, &contact);

    let filling_rate = filling::filling_rate::<N>(&setup);
    let volume = filling::volume::<N>(&setup, &filling_rate);
    let moment_arm = power::moment_arm::<N>(&setup, &config.moment_arm);
    let potential = power::potential::<N>(&setup, &volume, &moment_arm);
    let impulse = power::impulse::<N>(&setup, &filling_rate);
    let blade: [f64; N] = std::array::from_fn(|i| potential[i] + impulse[i]);
    let superposed = AngleGrid::<N>::superpose(&blade, wheel.blades());

    let watts = |curve: &[f64; N]| -> [Power; N] { curve.map(Power::new::<watt>) };
    let wheel_power = watts(&superposed);

    Ok(BreastshotResults {
        contact,
        entry_angle: Angle::new::<radian>(setup.entry),
        exit_angle: Angle::new::<radian>(setup.exit),
        filling_rate: filling_rate.map(VolumeRate::new::<cubic_meter_per_second>),
        volume: volume.map(Volume::new::<cubic_meter>),
        moment_arm: moment_arm.map(Length::new::<meter>),
        potential_power: watts(&potential),
        impulse_power: watts(&impulse),
        blade_power: watts(&blade),
        mean_power: AngleGrid::<N>::mean(&wheel_power),
        wheel_power,
    })
}

fn validate(config: &BreastshotConfig) -> Result<(), BreastshotError> {
    NonNegative::new(config.max_bucket_volume).map_err(|source| BreastshotError::Config {
        field: "max_bucket_volume",
        source,
    })?;
    StrictlyPositive::new(config.drain_span).map_err(|source| BreastshotError::Config {
        field: "drain_span",
        source,
    })?;
    Ok(())
}

/// Everything the per-angle steps need, in SI units.
#[derive(Debug, Clone, Copy)]
struct Setup {
    nappe: Nappe,

    /// Rotational speed, in rad/s.
    omega: f64,
    radius: f64,
    /// Height of the axle above the crest lip on the bed.
    yc: f64,
    /// Wheel width that sits under the nappe.
    width: f64,

    /// Flow the nappe delivers across the wheel, in m³/s.
    flow_available: f64,
    /// Water a bucket can hold, in m³.
    bucket_capacity: f64,

    entry: f64,
    exit: f64,
    fill_end: f64,
    drain_start: f64,
    drain_span: f64,

    rho: f64,
    g: f64,
}

impl Setup {
    fn new(
        river: &River,
        wheel: &Wheel,
        config: &BreastshotConfig,
        nappe: Nappe,
        centre: Position,
        omega: f64,
        contact: &Contact,
    ) -> Self {
        let channel = river.width().get::<meter>();
        let wheel_width = wheel.width().get::<meter>();

        Self {
            nappe,
            omega,
            radius: wheel.r(),
            yc: centre.y.get::<meter>(),
            width: wheel.effective_width(river.width()).get::<meter>(),
            flow_available: river.q() * (wheel_width / channel).min(1.0),
            bucket_capacity: config.max_bucket_volume.get::<cubic_meter>()
                * (channel / wheel_width).min(1.0),
            entry: contact.entry_angle(centre),
            exit: contact.exit_angle(centre),
            fill_end: FRAC_PI_2 + wheel.spacing(),
            drain_start: config.drain_start.get::<radian>(),
            drain_span: config.drain_span.get::<radian>(),
            rho: river.rho(),
            g: river.g(),
        }
    }

    /// Whether a bucket at `theta` is under the nappe.
    fn is_filling(&self, theta: f64) -> bool {
        (self.entry..=self.fill_end).contains(&theta)
    }

    /// Whether a bucket at `theta` is between the contact angles.
    fn carries_water(&self, theta: f64) -> bool {
        (self.entry..=self.exit).contains(&theta)
    }

    /// Vertical speed of the nappe at the height of the blade tip.
    fn fall_speed(&self, theta: f64) -> f64 {
        self.nappe.fall_speed_at(self.yc + self.radius * theta.cos())
    }

    /// Downward speed of the blade tip.
    fn blade_speed(&self, theta: f64) -> f64 {
        self.omega * self.radius * theta.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angular_velocity::revolution_per_minute;

    use crate::support::{
        constraint::ConstraintError,
        river::test_support::stream,
        wheel::test_support::{at, lab_wheel},
    };

    fn rpm(value: f64) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(value)
    }

    fn lab_run(config: &BreastshotConfig) -> BreastshotResults<100> {
        analyze::<100>(&stream(2.0), &lab_wheel(), config, at(1.0, -0.6), rpm(15.0))
            .expect("lab wheel should run")
    }

    #[test]
    fn power_curves_are_consistent() {
        let results = lab_run(&BreastshotConfig::default());

        for i in 0..100 {
            let potential = results.potential_power[i].get::<watt>();
            let impulse = results.impulse_power[i].get::<watt>();
            assert!(potential >= 0.0);
            assert!(impulse >= 0.0);
            assert_relative_eq!(results.blade_power[i].get::<watt>(), potential + impulse);
        }

        // Superposition adds whole blade curves, so it scales the mean.
        let blade_mean = AngleGrid::<100>::mean(&results.blade_power).get::<watt>();
        assert_relative_eq!(
            results.mean_power.get::<watt>(),
            6.0 * blade_mean,
            max_relative = 1e-12
        );
        assert!(results.mean_power.get::<watt>() > 0.0);
    }

    #[test]
    fn efficiency_is_a_fraction() {
        let results = lab_run(&BreastshotConfig::default());
        let efficiency = results
            .efficiency(&stream(2.0))
            .expect("river carries power");
        assert!(efficiency > 0.0 && efficiency < 1.0, "efficiency = {efficiency}");
    }

    #[test]
    fn cad_fit_arm_changes_potential_power() {
        let geometric = lab_run(&BreastshotConfig::default());
        let fitted = lab_run(&BreastshotConfig {
            moment_arm: MomentArm::CAD_FIT,
            ..BreastshotConfig::default()
        });

        assert_eq!(geometric.volume, fitted.volume);
        assert_eq!(geometric.impulse_power, fitted.impulse_power);
        assert_ne!(geometric.potential_power, fitted.potential_power);
    }

    #[test]
    fn bigger_buckets_hold_more() {
        let small = lab_run(&BreastshotConfig {
            max_bucket_volume: Volume::new::<cubic_meter>(0.01),
            ..BreastshotConfig::default()
        });
        let large = lab_run(&BreastshotConfig::default());

        let peak = |r: &BreastshotResults<100>| {
            r.volume
                .iter()
                .map(|v| v.get::<cubic_meter>())
                .fold(0.0, f64::max)
        };
        assert!(peak(&large) > peak(&small));
        assert!(large.mean_power > small.mean_power);
    }

    #[test]
    fn rejects_stationary_wheel() {
        let result = analyze::<100>(
            &stream(2.0),
            &lab_wheel(),
            &BreastshotConfig::default(),
            at(1.0, -0.6),
            rpm(0.0),
        );
        assert!(matches!(
            result,
            Err(BreastshotError::Speed(ConstraintError::Zero))
        ));
    }

    #[test]
    fn rejects_bad_config() {
        let config = BreastshotConfig {
            drain_span: Angle::new::<radian>(0.0),
            ..BreastshotConfig::default()
        };
        let result = analyze::<100>(&stream(2.0), &lab_wheel(), &config, at(1.0, -0.6), rpm(15.0));
        assert!(matches!(
            result,
            Err(BreastshotError::Config {
                field: "drain_span",
                ..
            })
        ));

        let config = BreastshotConfig {
            max_bucket_volume: Volume::new::<cubic_meter>(-1.0),
            ..BreastshotConfig::default()
        };
        let result = analyze::<100>(&stream(2.0), &lab_wheel(), &config, at(1.0, -0.6), rpm(15.0));
        assert!(matches!(
            result,
            Err(BreastshotError::Config {
                field: "max_bucket_volume",
                source: ConstraintError::Negative,
            })
        ));
    }

    #[test]
    fn geometry_errors_propagate() {
        let result = analyze::<100>(
            &stream(2.0),
            &lab_wheel(),
            &BreastshotConfig::default(),
            at(10.0, 5.0),
            rpm(15.0),
        );
        assert!(matches!(result, Err(BreastshotError::NoContact)));
    }
}
