use std::{f64::consts::TAU, marker::PhantomData, ops::Add};

use num_traits::Zero;
use uom::si::{angle::radian, f64::Angle, f64::Power, power::watt};

/// Grid size used by the wheel models unless another is chosen.
pub const DEFAULT_RESOLUTION: usize = 100;

/// A periodic grid of `N` blade angles covering one revolution.
///
/// Point `i` sits at `2πi/N`. The end point `2π` is omitted because it is
/// the same blade position as `0`, which makes rotating a curve by a whole
/// number of grid steps exact.
///
/// The grid size must be at least 2, which is enforced at compile time.
///
/// ```compile_fail
/// # use twine_hydro::support::wheel::AngleGrid;
/// let _ = AngleGrid::<1>::step();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleGrid<const N: usize> {
    _size: PhantomData<[(); N]>,
}

impl<const N: usize> AngleGrid<N> {
    const MIN_SIZE: () = assert!(N >= 2, "an angle grid requires at least 2 points");

    /// Angular spacing between neighbouring grid points.
    #[must_use]
    pub fn step() -> Angle {
        Angle::new::<radian>(Self::step_rad())
    }

    /// Angle of grid point `i`.
    #[must_use]
    pub fn angle(i: usize) -> Angle {
        Angle::new::<radian>(Self::theta(i))
    }

    /// Every grid angle in order.
    #[must_use]
    pub fn angles() -> [Angle; N] {
        std::array::from_fn(Self::angle)
    }

    /// Grid offset of blade `k` behind blade zero on a wheel with `blades` blades.
    ///
    /// The offset is truncated to a whole number of grid steps.
    #[must_use]
    pub fn blade_offset(k: usize, blades: usize) -> usize {
        k * N / blades
    }

    /// Adds up the curve of one blade over every blade of the wheel.
    ///
    /// Blade `k` trails blade zero by one blade spacing per index, so its
    /// curve is the single-blade curve rotated forward by
    /// [`blade_offset(k, blades)`](Self::blade_offset) grid steps.
    #[must_use]
    pub fn superpose<T>(curve: &[T; N], blades: usize) -> [T; N]
    where
        T: Copy + Add<Output = T> + Zero,
    {
        let offsets: Vec<usize> = (0..blades)
            .map(|k| Self::blade_offset(k, blades))
            .collect();

        std::array::from_fn(|i| {
            offsets
                .iter()
                .fold(T::zero(), |sum, &shift| sum + curve[(i + N - shift % N) % N])
        })
    }

    /// Mean of a power curve over one revolution.
    #[must_use]
    pub fn mean(curve: &[Power; N]) -> Power {
        let total: f64 = curve.iter().map(|p| p.get::<watt>()).sum();
        Power::new::<watt>(total / N as f64)
    }

    pub(crate) fn step_rad() -> f64 {
        let () = Self::MIN_SIZE;
        TAU / N as f64
    }

    pub(crate) fn theta(i: usize) -> f64 {
        Self::step_rad() * i as f64
    }
}
