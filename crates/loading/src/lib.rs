//! Neutron wall loading from first wall surface crossings
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod aggregate;
mod audit;
mod binner;
mod config;
mod counts;
mod error;
mod field;
mod grid;
mod normalise;
mod plot;
mod report;
mod writer;

pub mod vtk;

#[doc(inline)]
pub use config::{NwlConfig, NwlConfigBuilder, DEFAULT_BINS, DEFAULT_NEUTRON_ENERGY};

#[doc(inline)]
pub use grid::BinGrid;

#[doc(inline)]
pub use counts::CountMatrix;

#[doc(inline)]
pub use binner::{Contribution, PointBinner};

#[doc(inline)]
pub use audit::FitAudit;

#[doc(inline)]
pub use report::{LogReporter, NullReporter, Reporter};

#[doc(inline)]
pub use aggregate::{aggregate, Aggregator};

#[doc(inline)]
pub use field::NwlField;

#[doc(inline)]
pub use normalise::{normalisation_factor, EV_TO_J, J_TO_MJ};

#[doc(inline)]
pub use plot::{plot_field, ContourPlot, Plotter, DEFAULT_LEVELS};

#[doc(inline)]
pub use writer::{read_json, write_json};

#[doc(inline)]
pub use vtk::{field_to_vtk, write_vtk, VtkFormat};

#[doc(inline)]
pub use error::{Error, Result};
