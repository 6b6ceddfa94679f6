//! Result and Error types for the loading module

/// Type alias for `Result<T, loading::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `nwl-loading`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// Failure to write VTK output
    #[error("failed to write VTK file")]
    VTKError(#[from] vtkio::Error),

    /// Problem with the source strength profile
    #[error(transparent)]
    SourceError(#[from] nwl_source::Error),

    /// Failure in a slice or float utility
    #[error("utility failure: {0}")]
    UtilsError(#[from] nwl_utils::Error),

    /// Crossing dataset is empty
    #[error("no particles in the crossing dataset")]
    NoParticles,

    /// Angular extents must be positive and finite
    #[error("{name} must be positive and finite (found {value})")]
    InvalidExtent { name: &'static str, value: f64 },

    /// Bin centres need at least two values to define a width
    #[error("at least 2 {name} are required (found {count})")]
    TooFewBins { name: &'static str, count: usize },

    /// Stored field does not match its own bin grid
    #[error("{name} has {found} values, expected {expected}")]
    ShapeMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Any other numerical setting out of range
    #[error("invalid value for {name} (found {value})")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A required configuration value was never set
    #[error("missing required parameter \"{0}\"")]
    MissingParameter(&'static str),

    /// Contour plots need at least two levels
    #[error("at least 2 contour levels are required (found {0})")]
    TooFewLevels(usize),

    /// Progress bar could not be created
    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),

    /// Failure reported by a plotting backend
    #[error("plotting failed: {0}")]
    PlotterFailure(String),
}
