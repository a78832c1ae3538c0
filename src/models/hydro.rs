//! Hydropower water wheel models.
//!
//! This module provides [`twine_core::Model`] implementations for water
//! wheels on a [`River`](crate::support::river::River):
//!
//! - [`breastshot::Breastshot`]: buckets filled by the nappe falling from a crest.
//! - [`undershot::Undershot`]: blades pushed along by the stream.
//!
//! [`placement`] searches for the axle position and speed that maximise the
//! mean power of either wheel.

pub mod breastshot;
pub mod placement;
pub mod undershot;

use uom::si::f64::Power;

/// Results that report a wheel's power averaged over one revolution.
pub trait MeanPower {
    fn mean_power(&self) -> Power;
}
