use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    time::second,
    velocity::meter_per_second,
};

/// Discharge coefficient of the sharp-crested weir formula.
pub const WEIR_COEFFICIENT: f64 = 1.69;

/// A point on the nappe in the crest frame.
///
/// The origin sits on the channel bed at the crest lip, `x` runs downstream,
/// and `y` runs up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NappePoint {
    pub x: Length,
    pub y: Length,
}

/// The free-falling sheet of water leaving a crest.
///
/// The sheet leaves the crest horizontally at the nappe velocity and then
/// follows a projectile path under gravity until it reaches the tailwater,
/// one head below the crest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nappe {
    height: f64,
    velocity: f64,
    head: f64,
    g: f64,
}

impl Nappe {
    pub(super) fn new(flow_rate: f64, width: f64, head: f64, g: f64) -> Self {
        let height = (flow_rate / (WEIR_COEFFICIENT * g.sqrt() * width)).powf(2.0 / 3.0);
        Self {
            height,
            velocity: flow_rate / (width * height),
            head,
            g,
        }
    }

    /// Thickness of the sheet passing over the crest.
    #[must_use]
    pub fn height(&self) -> Length {
        Length::new::<meter>(self.height)
    }

    /// Horizontal speed of the sheet as it leaves the crest.
    #[must_use]
    pub fn velocity(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.velocity)
    }

    /// Time for the upper surface to fall from the crest to the tailwater.
    #[must_use]
    pub fn fall_time(&self) -> Time {
        Time::new::<second>(self.fall_time_s())
    }

    /// Position of the sheet's upper surface `t` after leaving the crest.
    #[must_use]
    pub fn upper_surface(&self, t: Time) -> NappePoint {
        let (x, y) = self.upper_at(t.get::<second>());
        NappePoint {
            x: Length::new::<meter>(x),
            y: Length::new::<meter>(y),
        }
    }

    /// Position of the sheet's lower surface `t` after leaving the crest.
    #[must_use]
    pub fn lower_surface(&self, t: Time) -> NappePoint {
        let t = t.get::<second>();
        NappePoint {
            x: Length::new::<meter>(self.velocity * t),
            y: Length::new::<meter>(-0.5 * self.g * t * t),
        }
    }

    /// Vertical speed of water that has fallen from the crest surface to height `y`.
    ///
    /// Zero at or above the crest surface.
    #[must_use]
    pub fn fall_speed(&self, y: Length) -> Velocity {
        Velocity::new::<meter_per_second>(self.fall_speed_at(y.get::<meter>()))
    }

    /// Total water speed at height `y`, including the horizontal crest velocity.
    #[must_use]
    pub fn speed(&self, y: Length) -> Velocity {
        let vertical = self.fall_speed_at(y.get::<meter>());
        Velocity::new::<meter_per_second>(self.velocity.hypot(vertical))
    }

    /// Samples the upper surface at `K` evenly spaced times from the crest to the tailwater.
    #[must_use]
    pub fn trajectory<const K: usize>(&self) -> [NappePoint; K] {
        const {
            assert!(K >= 2, "a nappe trajectory needs at least 2 points");
        };

        let dt = self.fall_time_s() / (K - 1) as f64;
        std::array::from_fn(|i| self.upper_surface(Time::new::<second>(dt * i as f64)))
    }

    pub(crate) fn upper_at(&self, t: f64) -> (f64, f64) {
        (self.velocity * t, self.height - 0.5 * self.g * t * t)
    }

    pub(crate) fn fall_time_s(&self) -> f64 {
        (2.0 * (self.height + self.head) / self.g).sqrt()
    }

    pub(crate) fn fall_speed_at(&self, y: f64) -> f64 {
        let drop = self.height - y;
        if drop > 0.0 {
            (2.0 * self.g * drop).sqrt()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::river::test_support::stream;

    #[test]
    fn weir_formula() {
        let river = stream(2.0);
        let nappe = river.nappe();

        let q = river.q();
        let h = nappe.height().get::<meter>();

        // Inverting the weir relation recovers the flow rate.
        assert_relative_eq!(
            WEIR_COEFFICIENT * 9.81_f64.sqrt() * 0.77 * h.powf(1.5),
            q,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            nappe.velocity().get::<meter_per_second>() * 0.77 * h,
            q,
            epsilon = 1e-12
        );
    }

    #[test]
    fn trajectory_runs_from_crest_to_tailwater() {
        let nappe = stream(2.0).nappe();
        let points = nappe.trajectory::<50>();

        assert_relative_eq!(points[0].x.get::<meter>(), 0.0);
        assert_relative_eq!(points[0].y.get::<meter>(), nappe.height().get::<meter>());
        assert_relative_eq!(points[49].y.get::<meter>(), -2.0, epsilon = 1e-12);

        assert!(points.windows(2).all(|w| w[1].x > w[0].x && w[1].y < w[0].y));
    }

    #[test]
    fn lower_surface_sits_one_sheet_below() {
        let nappe = stream(2.0).nappe();
        let t = Time::new::<second>(0.3);

        let upper = nappe.upper_surface(t);
        let lower = nappe.lower_surface(t);

        assert_relative_eq!(upper.x.get::<meter>(), lower.x.get::<meter>());
        assert_relative_eq!(
            (upper.y - lower.y).get::<meter>(),
            nappe.height().get::<meter>(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn speeds_follow_energy_conservation() {
        let nappe = stream(2.0).nappe();
        let h = nappe.height().get::<meter>();
        let v = nappe.velocity().get::<meter_per_second>();

        assert_relative_eq!(
            nappe.fall_speed(Length::new::<meter>(h + 0.1)).get::<meter_per_second>(),
            0.0
        );
        assert_relative_eq!(
            nappe.speed(Length::new::<meter>(h)).get::<meter_per_second>(),
            v
        );

        let y = Length::new::<meter>(-1.0);
        let vertical = nappe.fall_speed(y).get::<meter_per_second>();
        assert_relative_eq!(vertical, (2.0 * 9.81 * (h + 1.0)).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            nappe.speed(y).get::<meter_per_second>(),
            (v * v + vertical * vertical).sqrt(),
            epsilon = 1e-12
        );
    }
}
