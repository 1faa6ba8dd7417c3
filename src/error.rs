//! Error types for logo generation
//!
//! Every fallible step of the pipeline funnels into [`Error`], along with a
//! convenient `Result` alias.
use std::path::PathBuf;

/// Errors that can occur while building or writing the logo.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("I/O error on `{}`: {source}", .path.display())]
    Io {
        /// The file involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The coefficient table could not be parsed.
    #[error("Malformed coefficient table at line {line}: {reason}")]
    Coefficients {
        /// 1-based line number in the source text
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The coefficient table does not hold one weight per sine mode.
    #[error("Expected {expected} coefficients, found {found}")]
    CoefficientCount {
        /// `nmodes * nmodes`
        expected: usize,
        /// Number of values in the table
        found: usize,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A JSON configuration file could not be deserialized.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The field never rises above zero, so there are no levels to contour.
    #[error("Scalar field maximum is {max}; nothing to contour above 0")]
    EmptyField {
        /// Largest value in the field
        max: f64,
    },

    /// The contouring library rejected the input.
    #[error("Contouring failed: {0}")]
    Contour(String),

    /// The generated SVG could not be parsed for outlining or rasterization.
    #[error("Rendering error: {0}")]
    SvgParse(#[from] resvg::usvg::Error),

    /// The PNG encoder failed.
    #[error("PNG encoding error: {0}")]
    PngEncode(String),

    /// The wordmark font could not be used.
    #[error("Unusable font `{}`: {reason}", .path.display())]
    Font {
        /// Font file
        path: PathBuf,
        /// What was wrong with it
        reason: &'static str,
    },

    /// A pixmap of the requested size could not be allocated.
    #[error("Cannot allocate a {0}x{1} pixmap")]
    Pixmap(u32, u32),
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for logo generation
pub type Result<T> = std::result::Result<T, Error>;
