//! Result and Error types for the source module

/// Type alias for `Result<T, source::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `nwl-source`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to read or write CSV records
    #[error("failed CSV operation")]
    CSVError(#[from] csv::Error),

    /// A profile with no values has no total strength
    #[error("source strength profile is empty")]
    EmptyStrengths,

    /// Line could not be interpreted as a single number
    #[error("line {line} is not a valid number: \"{content}\"")]
    InvalidLine { line: usize, content: String },

    /// Strengths must be finite and non-negative
    #[error("invalid source strength {value} on line {line}")]
    InvalidStrength { line: usize, value: f64 },

    /// Crossing coordinates must be finite
    #[error("non-finite coordinate in crossing record {record}")]
    InvalidCrossing { record: usize },
}
