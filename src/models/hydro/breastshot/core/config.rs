use std::f64::consts::FRAC_PI_2;

use twine_solvers::equation::bisection;
use uom::si::{
    angle::radian,
    f64::{Angle, Time, Volume},
    time::second,
    volume::cubic_meter,
};

/// Breastshot model configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreastshotConfig {
    /// Water a single bucket holds when the wheel is as wide as the channel.
    ///
    /// A wheel wider than the channel only fills the share of each bucket
    /// that sits under the nappe.
    pub max_bucket_volume: Volume,

    /// Blade angle at which buckets start to tip out.
    pub drain_start: Angle,

    /// Rotation over which a full bucket empties once draining starts.
    pub drain_span: Angle,

    /// Lever arm of the water held in a bucket.
    pub moment_arm: MomentArm,

    /// Settings for locating where the nappe meets the rim.
    pub contact: ContactConfig,
}

impl Default for BreastshotConfig {
    fn default() -> Self {
        Self {
            max_bucket_volume: Volume::new::<cubic_meter>(0.032),
            drain_start: Angle::new::<radian>(FRAC_PI_2),
            drain_span: Angle::new::<radian>(1.0),
            moment_arm: MomentArm::Geometric,
            contact: ContactConfig::default(),
        }
    }
}

/// Horizontal distance from the axle to the centre of mass of bucket water.
///
/// Whatever the variant, the arm is clamped to `[0, R]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentArm {
    /// The water sits at the blade tip, giving an arm of `R sin θ`.
    Geometric,

    /// A quartic in the blade angle, `a·θ⁴ + b·θ³ + c·θ² + d·θ + e`, in metres.
    ///
    /// Coefficients are ordered from the quartic term down.
    Polynomial([f64; 5]),
}

impl MomentArm {
    /// Quartic fitted to bucket centres of mass from the 0.504 m laboratory wheel CAD model.
    pub const CAD_FIT: Self = Self::Polynomial([
        0.773_217_817_307_959_6,
        -4.808_504_916_068_159,
        10.468_692_683_694_396,
        -9.425_609_377_141_08,
        3.193_726_689_977_63,
    ]);

    pub(super) fn at(&self, theta: f64, radius: f64) -> f64 {
        let arm = match self {
            Self::Geometric => radius * theta.sin(),
            Self::Polynomial(coefficients) => coefficients
                .iter()
                .fold(0.0, |acc, coefficient| acc * theta + coefficient),
        };
        arm.clamp(0.0, radius)
    }
}

/// Settings for the rim and nappe intersection search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactConfig {
    /// Number of trajectory samples used to bracket each crossing.
    pub samples: usize,

    /// Maximum bisection iterations per crossing.
    pub max_iters: usize,

    /// Absolute tolerance on the crossing time.
    pub time_tol: Time,

    /// Absolute tolerance on the squared-distance residual, in m².
    pub residual_tol: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            samples: 200,
            max_iters: 100,
            time_tol: Time::new::<second>(1e-12),
            residual_tol: 1e-12,
        }
    }
}

impl ContactConfig {
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.time_tol.get::<second>(),
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}
