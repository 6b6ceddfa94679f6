//! Result and Error types for the equilibrium module

/// Type alias for `Result<T, equilibrium::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `nwl-equilibrium`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// No boundary modes means no surface to speak of
    #[error("equilibrium contains no boundary modes")]
    NoBoundaryModes,

    /// Number of field periods must be positive
    #[error("number of field periods must be at least 1 (found {0})")]
    InvalidFieldPeriods(u32),

    /// Coefficients must all be finite values
    #[error("non-finite coefficient in mode (m={m}, n={n})")]
    NonFiniteCoefficient { m: i32, n: i32 },
}
