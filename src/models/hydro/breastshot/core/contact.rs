//! Where the nappe meets the wheel rim.
//!
//! The nappe's upper surface is tracked in time from the crest. The residual
//! `|P(t) − C|² − R²` is positive while the water is outside the rim and
//! negative inside it. Sampling the trajectory brackets each sign change,
//! and bisection refines it.

use std::{
    convert::Infallible,
    f64::consts::{FRAC_PI_2, PI, TAU},
};

use tracing::debug;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{f64::Length, f64::Time, length::meter, time::second};

use crate::support::{
    river::Nappe,
    wheel::{Position, Wheel},
};

use super::{BreastshotError, ContactConfig};

/// The stretch of nappe that falls inside the rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Where the water first meets the rim.
    pub entry: Position,

    /// Where the water leaves the rim, or the tailwater point if it never does.
    pub exit: Position,

    /// Whether the water is still inside the rim when it reaches the tailwater.
    pub reaches_tailwater: bool,
}

impl Contact {
    /// Blade angle at which buckets start to receive water.
    ///
    /// Water that lands upstream of the top is carried over the top, and
    /// water that lands below the axle only starts filling at the
    /// downstream horizontal.
    #[must_use]
    pub fn entry_angle(&self, centre: Position) -> f64 {
        let (dx, dy) = offset(self.entry, centre);
        dx.atan2(dy).clamp(0.0, FRAC_PI_2)
    }

    /// Blade angle past which buckets no longer carry water.
    ///
    /// Buckets hold water at least until the bottom of the wheel.
    #[must_use]
    pub fn exit_angle(&self, centre: Position) -> f64 {
        let (dx, dy) = offset(self.exit, centre);
        let angle = dx.atan2(dy);
        let angle = if angle < 0.0 { angle + TAU } else { angle };
        angle.max(PI)
    }
}

fn offset(point: Position, centre: Position) -> (f64, f64) {
    let (px, py) = point.meters();
    let (cx, cy) = centre.meters();
    (px - cx, py - cy)
}

/// Finds the stretch of nappe that falls inside the rim of a wheel centred on `centre`.
///
/// # Errors
///
/// Returns [`BreastshotError::OverlapsCrest`] if the crest lies inside the rim,
/// [`BreastshotError::NoContact`] if the nappe misses the wheel, or a solver
/// error if a crossing cannot be refined.
pub(super) fn find_contact(
    nappe: &Nappe,
    wheel: &Wheel,
    centre: Position,
    config: &ContactConfig,
) -> Result<Contact, BreastshotError> {
    let model = RimDistance {
        nappe,
        centre: centre.meters(),
        radius: wheel.r(),
    };

    if model.residual(0.0) <= 0.0 {
        return Err(BreastshotError::OverlapsCrest);
    }

    let samples = config.samples.max(2);
    let dt = nappe.fall_time_s() / (samples - 1) as f64;
    let times: Vec<f64> = (0..samples).map(|i| dt * i as f64).collect();
    let residuals: Vec<f64> = times.iter().map(|&t| model.residual(t)).collect();

    let Some(entry) = (0..samples - 1).find(|&i| residuals[i] > 0.0 && residuals[i + 1] <= 0.0)
    else {
        debug!(
            x = centre.x.get::<meter>(),
            y = centre.y.get::<meter>(),
            "nappe misses the wheel"
        );
        return Err(BreastshotError::NoContact);
    };
    let entry_point = crossing(&model, [times[entry], times[entry + 1]], config)?;

    let exit = (entry + 1..samples - 1).find(|&i| residuals[i] <= 0.0 && residuals[i + 1] > 0.0);
    let (exit_point, reaches_tailwater) = match exit {
        Some(i) => (crossing(&model, [times[i], times[i + 1]], config)?, false),
        None => (model.sample(nappe.fall_time_s()), true),
    };

    Ok(Contact {
        entry: entry_point.position(),
        exit: exit_point.position(),
        reaches_tailwater,
    })
}

fn crossing(
    model: &RimDistance<'_>,
    bracket: [f64; 2],
    config: &ContactConfig,
) -> Result<NappeSample, BreastshotError> {
    let solution = bisection::solve(
        model,
        &RimCrossing,
        bracket,
        &config.bisection(),
        |_event: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(BreastshotError::ContactNotConverged {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output)
}

/// A point of the nappe's upper surface and its squared distance outside the rim.
#[derive(Debug, Clone, Copy)]
struct NappeSample {
    x: f64,
    y: f64,
    residual: f64,
}

impl NappeSample {
    fn position(&self) -> Position {
        Position::new(Length::new::<meter>(self.x), Length::new::<meter>(self.y))
    }
}

/// Model of the nappe position relative to the rim, parameterised by fall time.
struct RimDistance<'a> {
    nappe: &'a Nappe,
    centre: (f64, f64),
    radius: f64,
}

impl RimDistance<'_> {
    fn sample(&self, t: f64) -> NappeSample {
        let (x, y) = self.nappe.upper_at(t);
        let (dx, dy) = (x - self.centre.0, y - self.centre.1);
        NappeSample {
            x,
            y,
            residual: dx * dx + dy * dy - self.radius * self.radius,
        }
    }

    fn residual(&self, t: f64) -> f64 {
        self.sample(t).residual
    }
}

impl Model for RimDistance<'_> {
    type Input = Time;
    type Output = NappeSample;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.sample(input.get::<second>()))
    }
}

/// Equation problem driving the squared-distance residual to zero.
struct RimCrossing;

impl EquationProblem<1> for RimCrossing {
    type Input = Time;
    type Output = NappeSample;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Time::new::<second>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.residual])
    }
}
