//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, prettier formatting for scientific numbers, NaN-aware slice
//! operations, and the angle conventions used throughout are useful
//! everywhere.
#![doc = include_str!("../readme.md")]

// Alias for the format! macro
pub use std::format as f;

// Modules
mod angle;
mod error;
mod format;
mod slice_ext;
mod space;

// Flatten
pub use angle::{angular_distance, fold_angle};
pub use error::{Error, Result};
pub use format::{OptionExt, ValueExt};
pub use slice_ext::SliceExt;
pub use space::linspace;
