//! Source strength and surface crossing input/output
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod crossings;
mod error;
mod parsers;
mod strengths;

#[doc(inline)]
pub use strengths::{parse_strengths, read_strengths, total_strength, write_strengths};

#[doc(inline)]
pub use crossings::{read_crossings, write_crossings};

#[doc(inline)]
pub use error::{Error, Result};
