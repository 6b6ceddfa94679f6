//! Flux coordinate inversion
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod direct;
mod error;
mod inverter;
mod minimizer;
mod scan;

#[doc(inline)]
pub use minimizer::{Minimizer, Minimum};

#[doc(inline)]
pub use direct::{Direct, DirectBuilder};

#[doc(inline)]
pub use scan::ScanRefine;

#[doc(inline)]
pub use inverter::{flux_coords, Fit, FluxCoordinate, FluxInverter, M_TO_CM};

#[doc(inline)]
pub use error::{Error, Result};
