//! Bounded Nelder–Mead simplex minimisation.
//!
//! Bounds are handled by clipping every trial point into the box, so the
//! objective is never evaluated outside it. Objective values that are `NaN`
//! are treated as `+∞`, which ranks the point worst without stopping the
//! search.
//!
//! # Example
//!
//! ```
//! use twine_hydro::support::optimize::nelder_mead::{self, Bounds, Config, Status};
//!
//! let solution = nelder_mead::minimize(
//!     |[x, y]: &[f64; 2]| (x - 1.0).powi(2) + (y + 2.0).powi(2),
//!     [0.0, 0.0],
//!     [Bounds::new(-5.0, 5.0), Bounds::new(-5.0, 5.0)],
//!     &Config::for_dims(2),
//! )
//! .unwrap();
//!
//! assert_eq!(solution.status, Status::Converged);
//! assert!((solution.x[0] - 1.0).abs() < 1e-3);
//! assert!((solution.x[1] + 2.0).abs() < 1e-3);
//! ```

mod config;
mod error;

pub use config::Config;
pub use error::Error;

use tracing::{debug, trace};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Closed interval a single variable is confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// A variable free to take any value.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    fn is_valid(&self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan() && self.lower <= self.upper
    }

    fn clip(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The simplex collapsed within both tolerances.
    Converged,
    /// The iteration limit was reached first.
    MaxIters,
}

/// Best point found by a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution<const D: usize> {
    /// Best point.
    pub x: [f64; D],
    /// Objective value at `x`.
    pub value: f64,
    /// Iterations performed.
    pub iters: usize,
    /// Objective evaluations performed.
    pub evaluations: usize,
    pub status: Status,
}

#[derive(Debug, Clone, Copy)]
struct Vertex<const D: usize> {
    x: [f64; D],
    f: f64,
}

/// Counts evaluations and maps `NaN` to `+∞`.
struct Objective<F> {
    f: F,
    evaluations: usize,
}

impl<F> Objective<F> {
    fn eval<const D: usize>(&mut self, x: [f64; D]) -> Vertex<D>
    where
        F: FnMut(&[f64; D]) -> f64,
    {
        self.evaluations += 1;
        let f = (self.f)(&x);
        Vertex {
            x,
            f: if f.is_nan() { f64::INFINITY } else { f },
        }
    }
}

/// Minimises `objective` starting from `x0`, keeping every point inside `bounds`.
///
/// # Errors
///
/// Returns [`Error::InvalidBounds`] if any bound is malformed, or
/// [`Error::InfeasibleStart`] if the objective is not finite at `x0`.
pub fn minimize<const D: usize, F>(
    objective: F,
    x0: [f64; D],
    bounds: [Bounds; D],
    config: &Config,
) -> Result<Solution<D>, Error>
where
    F: FnMut(&[f64; D]) -> f64,
{
    const {
        assert!(D >= 1, "nelder-mead needs at least one variable");
    };

    if let Some(dim) = bounds.iter().position(|b| !b.is_valid()) {
        return Err(Error::InvalidBounds { dim });
    }

    let clip = |x: [f64; D]| -> [f64; D] { std::array::from_fn(|i| bounds[i].clip(x[i])) };
    let mut objective = Objective {
        f: objective,
        evaluations: 0,
    };

    let start = objective.eval(clip(x0));
    if !start.f.is_finite() {
        return Err(Error::InfeasibleStart);
    }

    let mut simplex = Vec::with_capacity(D + 1);
    simplex.push(start);
    for i in 0..D {
        let mut x = start.x;
        let step = if x[i] == 0.0 {
            config.zero_step
        } else {
            config.initial_step * x[i]
        };
        x[i] = if x[i] + step > bounds[i].upper || x[i] + step < bounds[i].lower {
            x[i] - step
        } else {
            x[i] + step
        };
        simplex.push(objective.eval(clip(x)));
    }

    let mut iters = 0;
    let status = loop {
        simplex.sort_by(|a, b| a.f.total_cmp(&b.f));

        if has_converged(&simplex, config) {
            break Status::Converged;
        }
        if iters >= config.max_iters {
            break Status::MaxIters;
        }
        iters += 1;

        let centroid = centroid(&simplex[..D]);
        let best = simplex[0];
        let second_worst = simplex[D - 1];
        let worst = simplex[D];

        let reflected = objective.eval(clip(along(&centroid, &worst.x, -REFLECTION)));

        if reflected.f < best.f {
            let expanded = objective.eval(clip(along(&centroid, &worst.x, -EXPANSION)));
            simplex[D] = if expanded.f < reflected.f {
                expanded
            } else {
                reflected
            };
        } else if reflected.f < second_worst.f {
            simplex[D] = reflected;
        } else {
            let contracted = if reflected.f < worst.f {
                let outside = objective.eval(clip(along(&centroid, &worst.x, -CONTRACTION)));
                (outside.f <= reflected.f).then_some(outside)
            } else {
                let inside = objective.eval(clip(along(&centroid, &worst.x, CONTRACTION)));
                (inside.f < worst.f).then_some(inside)
            };

            match contracted {
                Some(vertex) => simplex[D] = vertex,
                None => {
                    for vertex in simplex.iter_mut().skip(1) {
                        let x = std::array::from_fn(|i| {
                            best.x[i] + SHRINK * (vertex.x[i] - best.x[i])
                        });
                        *vertex = objective.eval(clip(x));
                    }
                }
            }
        }

        trace!(iter = iters, best = simplex[0].f, "nelder-mead iteration");
    };

    simplex.sort_by(|a, b| a.f.total_cmp(&b.f));
    let best = simplex[0];

    debug!(
        iters,
        evaluations = objective.evaluations,
        value = best.f,
        ?status,
        "nelder-mead finished"
    );

    Ok(Solution {
        x: best.x,
        value: best.f,
        iters,
        evaluations: objective.evaluations,
        status,
    })
}

/// Point at `centroid + t * (vertex - centroid)`.
///
/// Negative `t` moves away from `vertex`, through the centroid.
fn along<const D: usize>(centroid: &[f64; D], vertex: &[f64; D], t: f64) -> [f64; D] {
    std::array::from_fn(|i| centroid[i] + t * (vertex[i] - centroid[i]))
}

fn centroid<const D: usize>(vertices: &[Vertex<D>]) -> [f64; D] {
    let n = vertices.len() as f64;
    std::array::from_fn(|i| vertices.iter().map(|v| v.x[i]).sum::<f64>() / n)
}

fn has_converged<const D: usize>(simplex: &[Vertex<D>], config: &Config) -> bool {
    let best = &simplex[0];
    simplex[1..].iter().all(|vertex| {
        (vertex.f - best.f).abs() <= config.f_abs_tol
            && vertex
                .x
                .iter()
                .zip(&best.x)
                .all(|(a, b)| (a - b).abs() <= config.x_abs_tol)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn finds_quadratic_minimum() {
        let solution = minimize(
            |[x, y]: &[f64; 2]| (x - 1.0).powi(2) + 2.0 * (y + 0.5).powi(2),
            [3.0, 2.0],
            [Bounds::unbounded(), Bounds::unbounded()],
            &Config::for_dims(2),
        )
        .expect("search should start");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(solution.x[1], -0.5, epsilon = 1e-3);
        assert!(solution.value < 1e-4);
        assert!(solution.evaluations > solution.iters);
    }

    #[test]
    fn stops_at_active_bound() {
        let solution = minimize(
            |[x]: &[f64; 1]| (x - 3.0).powi(2),
            [0.5],
            [Bounds::new(0.0, 2.0)],
            &Config::for_dims(1),
        )
        .expect("search should start");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn starting_point_is_clipped() {
        let mut outside = false;
        let solution = minimize(
            |[x]: &[f64; 1]| {
                outside |= !(0.0..=1.0).contains(x);
                x.powi(2)
            },
            [5.0],
            [Bounds::new(0.0, 1.0)],
            &Config::for_dims(1),
        )
        .expect("search should start");

        assert!(!outside, "objective was evaluated outside its bounds");
        assert_relative_eq!(solution.x[0], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn walks_around_infeasible_region() {
        // Everything right of 1.5 is infeasible; the minimum sits on its edge.
        let solution = minimize(
            |[x]: &[f64; 1]| {
                if *x > 1.5 {
                    f64::INFINITY
                } else {
                    (x - 4.0).powi(2)
                }
            },
            [0.0],
            [Bounds::unbounded()],
            &Config::for_dims(1),
        )
        .expect("search should start");

        assert!(solution.value.is_finite());
        assert!(solution.x[0] <= 1.5);
        assert_relative_eq!(solution.x[0], 1.5, epsilon = 1e-2);
    }

    #[test]
    fn reports_iteration_limit() {
        let config = Config {
            max_iters: 3,
            ..Config::for_dims(2)
        };
        let solution = minimize(
            |[x, y]: &[f64; 2]| x * x + y * y,
            [10.0, 10.0],
            [Bounds::unbounded(), Bounds::unbounded()],
            &config,
        )
        .expect("search should start");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 3);
        assert!(solution.value < 200.0);
    }

    #[test]
    fn rejects_bad_bounds() {
        let result = minimize(
            |[x, y]: &[f64; 2]| x + y,
            [0.0, 0.0],
            [Bounds::new(0.0, 1.0), Bounds::new(1.0, 0.0)],
            &Config::for_dims(2),
        );
        assert_eq!(result, Err(Error::InvalidBounds { dim: 1 }));

        let result = minimize(
            |[x]: &[f64; 1]| *x,
            [0.0],
            [Bounds::new(f64::NAN, 1.0)],
            &Config::for_dims(1),
        );
        assert_eq!(result, Err(Error::InvalidBounds { dim: 0 }));
    }

    #[test]
    fn rejects_infeasible_start() {
        let result = minimize(
            |_: &[f64; 1]| f64::NAN,
            [1.0],
            [Bounds::unbounded()],
            &Config::for_dims(1),
        );
        assert_eq!(result, Err(Error::InfeasibleStart));
    }
}
