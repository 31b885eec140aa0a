//! Ed25519 scalar and point engine
//!
//! - [`scalar`]: residues mod ℓ with owned and `_into` arithmetic
//! - [`point`]: group elements, constant-time and variable-time multiplication
//! - [`public`]: the [`Public`] marker gating variable-time entry points

pub(crate) mod field;
pub mod point;
pub mod public;
pub mod scalar;

pub use point::{Point, H_BYTES, POINT_LENGTH};
pub use public::Public;
pub use scalar::{Scalar, INV_EIGHT_BYTES, SCALAR_LENGTH};
