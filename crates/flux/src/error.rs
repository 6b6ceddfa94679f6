//! Result and Error types for nwl-flux

/// Type alias for Result<T, flux::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `nwl-flux` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid minimiser parameter \"{name}\" (found {value})")]
    InvalidParameter { name: &'static str, value: f64 },
}
