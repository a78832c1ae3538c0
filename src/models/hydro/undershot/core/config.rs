use uom::si::{f64::Length, length::meter};

/// Undershot model configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UndershotConfig {
    /// Drag coefficient of a flat blade held across the stream.
    pub drag_coefficient: f64,

    /// Radius of the barrel the blades are mounted on.
    ///
    /// Only the blade outside the barrel is wetted, so the barrel must be
    /// smaller than the wheel.
    pub barrel_radius: Length,
}

impl Default for UndershotConfig {
    fn default() -> Self {
        Self {
            drag_coefficient: 2.3,
            barrel_radius: Length::new::<meter>(0.169),
        }
    }
}
