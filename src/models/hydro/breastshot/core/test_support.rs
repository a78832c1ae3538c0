use uom::si::{
    angular_velocity::{radian_per_second, revolution_per_minute},
    f64::AngularVelocity,
};

use crate::support::{
    river::test_support::stream,
    wheel::test_support::{at, lab_wheel},
};

use super::{BreastshotConfig, Setup, contact::find_contact};

/// The laboratory wheel under a 2 m drop, centred at (1.0, −0.6) and turning at 15 rpm.
///
/// The nappe lands upstream of the top and leaves the rim above the bottom,
/// so buckets fill from θ = 0 and carry water to θ = π.
pub(super) fn lab_setup() -> Setup {
    let river = stream(2.0);
    let wheel = lab_wheel();
    let config = BreastshotConfig::default();
    let centre = at(1.0, -0.6);
    let omega = AngularVelocity::new::<revolution_per_minute>(15.0).get::<radian_per_second>();

    let nappe = river.nappe();
    let contact =
        find_contact(&nappe, &wheel, centre, &config.contact).expect("lab wheel meets the nappe");

    Setup::new(&river, &wheel, &config, nappe, centre, omega, &contact)
}
