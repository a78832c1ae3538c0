//! Placement optimisation for water wheels.
//!
//! A placement search runs a bounded Nelder–Mead minimisation of the negated
//! mean wheel power over the axle position and wheel speed. Points at which
//! the model fails, such as a breastshot wheel the nappe misses, are treated
//! as infeasible and steer the search away.

mod config;
mod error;

pub use config::PlacementConfig;
pub use error::PlacementError;

use tracing::{debug, info};
use twine_core::Model;
use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Length, Power},
    length::meter,
    power::watt,
};

use crate::support::{
    optimize::nelder_mead::{self, Bounds, Status},
    wheel::Position,
};

use super::{
    MeanPower,
    breastshot::{Breastshot, BreastshotError, BreastshotInput, BreastshotResults},
    undershot::{Undershot, UndershotError, UndershotInput, UndershotResults},
};

/// The best input found by a placement search and the model's results there.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<I, R> {
    pub input: I,
    pub results: R,

    /// Simplex iterations performed.
    pub iters: usize,

    /// Model evaluations performed.
    pub evaluations: usize,
}

/// Finds the axle position and speed that maximise a breastshot wheel's mean power.
///
/// The axle is searched over `x ∈ [0, max_distance]` downstream of the crest
/// and `y ∈ [−head, max_distance]`, with the speed inside the configured range.
///
/// # Errors
///
/// Returns a [`PlacementError`] if the model fails at `guess`, the search
/// does not converge, or the model fails at the best point.
pub fn optimize_breastshot<const N: usize>(
    model: &Breastshot<N>,
    guess: BreastshotInput,
    config: &PlacementConfig,
) -> Result<Placement<BreastshotInput, BreastshotResults<N>>, PlacementError<BreastshotError>> {
    let reach = config.max_distance.get::<meter>();
    let head = model.river().head().get::<meter>();

    let x0 = [
        guess.centre.x.get::<meter>(),
        guess.centre.y.get::<meter>(),
        guess.speed.get::<revolution_per_minute>(),
    ];
    let bounds = [
        Bounds::new(0.0, reach),
        Bounds::new(-head, reach),
        config.speed_bounds(),
    ];

    let placement = place(model, x0, bounds, config, |&[x, y, rpm]| BreastshotInput {
        centre: Position::new(Length::new::<meter>(x), Length::new::<meter>(y)),
        speed: AngularVelocity::new::<revolution_per_minute>(rpm),
    })?;

    info!(
        x = placement.input.centre.x.get::<meter>(),
        y = placement.input.centre.y.get::<meter>(),
        rpm = placement.input.speed.get::<revolution_per_minute>(),
        power = placement.results.mean_power.get::<watt>(),
        "breastshot placement found"
    );
    Ok(placement)
}

/// Finds the axle height and speed that maximise an undershot wheel's mean power.
///
/// The axle is searched between resting on the channel bed and the rim just
/// touching the free surface, `y ∈ [R − depth, R]`.
///
/// # Errors
///
/// Returns a [`PlacementError`] if the model fails at `guess`, the search
/// does not converge, or the model fails at the best point.
pub fn optimize_undershot<const N: usize>(
    model: &Undershot<N>,
    guess: UndershotInput,
    config: &PlacementConfig,
) -> Result<Placement<UndershotInput, UndershotResults<N>>, PlacementError<UndershotError>> {
    let radius = model.wheel().radius().get::<meter>();
    let depth = model.river().depth().get::<meter>();

    let x0 = [
        guess.axle_height.get::<meter>(),
        guess.speed.get::<revolution_per_minute>(),
    ];
    let bounds = [Bounds::new(radius - depth, radius), config.speed_bounds()];

    let placement = place(model, x0, bounds, config, |&[y, rpm]| UndershotInput {
        axle_height: Length::new::<meter>(y),
        speed: AngularVelocity::new::<revolution_per_minute>(rpm),
    })?;

    info!(
        y = placement.input.axle_height.get::<meter>(),
        rpm = placement.input.speed.get::<revolution_per_minute>(),
        power = placement.results.mean_power.get::<watt>(),
        "undershot placement found"
    );
    Ok(placement)
}

/// Mean power at each speed in `speeds`, with the rest of the input from `make_input`.
///
/// Failures are reported per speed so a sweep can run across infeasible speeds.
pub fn sweep_speed<M, I>(
    model: &M,
    speeds: I,
    make_input: impl Fn(AngularVelocity) -> M::Input,
) -> Vec<(AngularVelocity, Result<Power, M::Error>)>
where
    M: Model,
    M::Output: MeanPower,
    I: IntoIterator<Item = AngularVelocity>,
{
    speeds
        .into_iter()
        .map(|speed| {
            let power = model
                .call(&make_input(speed))
                .map(|results| results.mean_power());
            (speed, power)
        })
        .collect()
}

fn place<M, const D: usize>(
    model: &M,
    x0: [f64; D],
    bounds: [Bounds; D],
    config: &PlacementConfig,
    to_input: impl Fn(&[f64; D]) -> M::Input,
) -> Result<Placement<M::Input, M::Output>, PlacementError<M::Error>>
where
    M: Model,
    M::Output: MeanPower,
    M::Error: std::error::Error + 'static,
{
    let objective = |x: &[f64; D]| match model.call(&to_input(x)) {
        Ok(results) => -results.mean_power().get::<watt>(),
        Err(_) => f64::INFINITY,
    };

    let solution = nelder_mead::minimize(objective, x0, bounds, &config.nelder_mead(D))?;
    debug!(
        iters = solution.iters,
        evaluations = solution.evaluations,
        power = -solution.value,
        "placement search finished"
    );

    if solution.status == Status::MaxIters {
        return Err(PlacementError::MaxIters {
            iters: solution.iters,
        });
    }

    let input = to_input(&solution.x);
    let results = model.call(&input).map_err(PlacementError::Model)?;

    Ok(Placement {
        input,
        results,
        iters: solution.iters,
        evaluations: solution.evaluations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Velocity, velocity::meter_per_second};

    use crate::support::{
        river::{River, test_support::stream},
        wheel::test_support::{at, lab_wheel},
    };

    fn rpm(value: f64) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(value)
    }

    /// Loose enough to converge on the grid-discretised power surface.
    fn search_config() -> PlacementConfig {
        PlacementConfig {
            max_iters_per_dim: 2000,
            position_tol: Length::new::<meter>(1e-3),
            power_tol: Power::new::<watt>(25.0),
            ..PlacementConfig::default()
        }
    }

    #[test]
    fn breastshot_placement_improves_on_guess() {
        let model: Breastshot = Breastshot::new(stream(2.0), lab_wheel());
        let guess = BreastshotInput {
            centre: at(1.0, -0.6),
            speed: rpm(15.0),
        };
        let start = model.call(&guess).expect("guess should be feasible");

        let placement =
            optimize_breastshot(&model, guess, &search_config()).expect("search should converge");

        assert!(placement.results.mean_power >= start.mean_power);
        assert!(placement.evaluations > placement.iters);

        let x = placement.input.centre.x.get::<meter>();
        let y = placement.input.centre.y.get::<meter>();
        let speed = placement.input.speed.get::<revolution_per_minute>();
        assert!((0.0..=100.0).contains(&x));
        assert!((-2.0..=100.0).contains(&y));
        assert!((1.0..=40.0).contains(&speed));
    }

    #[test]
    fn undershot_placement_improves_on_guess() {
        let model: Undershot = Undershot::new(stream(0.0), lab_wheel());
        let guess = UndershotInput {
            axle_height: Length::new::<meter>(0.3),
            speed: rpm(10.0),
        };
        let start = model.call(&guess).expect("guess should be feasible");

        let placement =
            optimize_undershot(&model, guess, &search_config()).expect("search should converge");

        assert!(placement.results.mean_power >= start.mean_power);

        let y = placement.input.axle_height.get::<meter>();
        assert!((0.504 - 0.3..=0.504).contains(&y));
    }

    #[test]
    fn default_config_converges() {
        let breastshot: Breastshot = Breastshot::new(stream(2.0), lab_wheel());
        let guess = BreastshotInput {
            centre: at(1.0, -0.6),
            speed: rpm(15.0),
        };
        let start = breastshot.call(&guess).expect("guess should be feasible");
        let placement = optimize_breastshot(&breastshot, guess, &PlacementConfig::default())
            .expect("search should converge");
        assert!(placement.results.mean_power >= start.mean_power);

        let undershot: Undershot = Undershot::new(stream(0.0), lab_wheel());
        let guess = UndershotInput {
            axle_height: Length::new::<meter>(0.3),
            speed: rpm(10.0),
        };
        let start = undershot.call(&guess).expect("guess should be feasible");
        let placement = optimize_undershot(&undershot, guess, &PlacementConfig::default())
            .expect("search should converge");
        assert!(placement.results.mean_power >= start.mean_power);
    }

    #[test]
    fn undershot_search_may_start_on_the_bed() {
        let shallow = River::new(
            Length::new::<meter>(0.77),
            Length::new::<meter>(0.15),
            Velocity::new::<meter_per_second>(1.5),
            Length::new::<meter>(0.0),
        )
        .expect("test river should be valid");
        let model: Undershot = Undershot::new(shallow, lab_wheel());
        let bed = model.wheel().radius().get::<meter>() - model.river().depth().get::<meter>();
        let guess = UndershotInput {
            axle_height: Length::new::<meter>(bed),
            speed: rpm(10.0),
        };

        let placement =
            optimize_undershot(&model, guess, &search_config()).expect("search should converge");
        assert!(placement.input.axle_height.get::<meter>() >= bed);
    }

    #[test]
    fn infeasible_guess_is_rejected() {
        let model: Breastshot = Breastshot::new(stream(2.0), lab_wheel());
        let guess = BreastshotInput {
            centre: at(50.0, 50.0),
            speed: rpm(15.0),
        };

        let result = optimize_breastshot(&model, guess, &PlacementConfig::default());
        assert!(matches!(
            result,
            Err(PlacementError::Optimizer(nelder_mead::Error::InfeasibleStart))
        ));
    }

    #[test]
    fn iteration_limit_is_an_error() {
        let model: Undershot = Undershot::new(stream(0.0), lab_wheel());
        let guess = UndershotInput {
            axle_height: Length::new::<meter>(0.3),
            speed: rpm(10.0),
        };
        let config = PlacementConfig {
            max_iters_per_dim: 1,
            ..PlacementConfig::default()
        };

        let result = optimize_undershot(&model, guess, &config);
        assert!(matches!(result, Err(PlacementError::MaxIters { iters: 2 })));
    }

    #[test]
    fn speed_sweep_reports_each_speed() {
        let model: Undershot = Undershot::new(stream(0.0), lab_wheel());
        let speeds = (1..=8).map(|i| rpm(5.0 * f64::from(i)));

        let sweep = sweep_speed(&model, speeds, |speed| UndershotInput {
            axle_height: Length::new::<meter>(0.25),
            speed,
        });

        assert_eq!(sweep.len(), 8);
        let powers: Vec<f64> = sweep
            .iter()
            .map(|(_, power)| power.expect("wheel should sit in the stream").get::<watt>())
            .collect();

        // Power rises from the slowest speed and falls again once the blades
        // approach the stream speed.
        let (best, _) = powers
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .expect("sweep is not empty");
        assert!(best > 0 && best < 7, "best speed index = {best}");
    }

    #[test]
    fn sweep_keeps_failures() {
        let model: Undershot = Undershot::new(stream(0.0), lab_wheel());
        let sweep = sweep_speed(&model, [rpm(0.0), rpm(10.0)], |speed| UndershotInput {
            axle_height: Length::new::<meter>(0.25),
            speed,
        });

        assert!(matches!(sweep[0].1, Err(UndershotError::Speed(_))));
        assert!(sweep[1].1.is_ok());
    }
}
