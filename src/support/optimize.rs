//! Derivative-free optimisation.
//!
//! Wheel placement objectives are black boxes: a small move of the axle can
//! take the rim off the nappe entirely, and the power surface has kinks
//! wherever a blade window opens or closes. The [`nelder_mead`] simplex
//! search needs only function values and tolerates infeasible points
//! reported as `+∞`.

pub mod nelder_mead;
