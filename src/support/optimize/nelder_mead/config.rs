/// Nelder–Mead solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of simplex iterations.
    pub max_iters: usize,

    /// Absolute tolerance on the distance of every vertex from the best vertex.
    pub x_abs_tol: f64,

    /// Absolute tolerance on the spread of objective values across the simplex.
    pub f_abs_tol: f64,

    /// Relative size of the initial simplex edge along each coordinate.
    pub initial_step: f64,

    /// Initial simplex edge for coordinates that start at zero.
    pub zero_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_dims(3)
    }
}

impl Config {
    /// Default settings for a search over `dims` variables.
    ///
    /// The iteration limit grows linearly with the number of variables.
    #[must_use]
    pub fn for_dims(dims: usize) -> Self {
        Self {
            max_iters: 200 * dims.max(1),
            x_abs_tol: 1e-4,
            f_abs_tol: 1e-4,
            initial_step: 0.05,
            zero_step: 0.000_25,
        }
    }
}
