//! # Twine Hydro
//!
//! Water wheel models and model-building tools for small hydropower sites,
//! built on [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Breastshot and undershot wheel [`twine_core::Model`]
//!   implementations, and placement optimisation on top of them.
//! - [`support`]: Rivers, wheel geometry, numeric constraints, and the
//!   Nelder–Mead minimiser used by the models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once more than one model needs it. Only the crate-level
//! utilities in [`support`] are part of the public API.

pub mod models;
pub mod support;
