//! Plasma equilibrium forward maps
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod equilibrium;
mod error;
mod fourier;
mod reader;

#[doc(inline)]
pub use equilibrium::Equilibrium;

#[doc(inline)]
pub use fourier::{AxisMode, FourierEquilibrium, FourierMode};

#[doc(inline)]
pub use reader::{read_json, write_json};

#[doc(inline)]
pub use error::{Error, Result};
