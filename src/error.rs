use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `chimes_calc` library.
///
/// Every failure the library can observe on its own side of the foreign call
/// boundary is represented here: reading coordinate and configuration files,
/// loading the shared calculator library, and marshalling data into C types.
/// Failures inside the external calculator are not observable and therefore
/// have no variant.
#[derive(Error, Debug)]
pub enum CalcError {
    /// An I/O error that occurred while reading an input file.
    ///
    /// The path to the file and the underlying I/O error are provided for context.
    #[error("I/O error at path '{path}': {source}")]
    IoError {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// A coordinate file could not be parsed.
    ///
    /// `line` is the 1-based line number the problem was detected on.
    #[error("Failed to parse coordinates from {source_name} (line {line}): {details}")]
    CoordinateParse {
        /// Human readable name of the input (a path or `stdin`).
        source_name: String,
        /// The 1-based line number.
        line: usize,
        /// What went wrong.
        details: String,
    },

    /// The shared calculator library could not be loaded, or one of the
    /// required symbols is missing from it.
    #[error("Failed to load calculator library '{path}': {source}")]
    Library {
        /// The path or name that was handed to the platform loader.
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A path that must be handed to the calculator contains an interior NUL byte.
    #[error("Path '{0}' cannot be passed to the calculator: it contains a NUL byte")]
    InvalidPath(PathBuf),

    /// An atom type label contains an interior NUL byte.
    #[error("Atom {index} has a type label that contains a NUL byte: {label:?}")]
    InvalidLabel {
        /// Index of the offending atom.
        index: usize,
        /// The raw label.
        label: String,
    },

    /// The number of atoms does not fit in the C `int` the calculator expects.
    #[error("Too many atoms for the calculator: {0}")]
    TooManyAtoms(usize),

    /// A simulation cell vector contains a NaN or infinite component.
    #[error("Cell vector {vector} is not finite: {value:?}")]
    NonFiniteCell {
        /// Which vector: `a`, `b` or `c`.
        vector: char,
        /// The offending vector.
        value: [f64; 3],
    },

    /// `evaluate` was called before the calculator was initialized with a
    /// parameter file.
    #[error("The calculator has not been initialized with a parameter file")]
    NotInitialized,

    /// A run configuration file contained invalid TOML or unknown keys.
    #[error("Failed to deserialize TOML configuration: {0}")]
    DeserializationError(#[from] toml::de::Error),
}
