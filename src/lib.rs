//! Drive the pre-compiled ChIMES serial force-field calculator from Rust.
//!
//! The crate reads atomic configurations, hands them to a force field through the
//! [`Evaluator`] trait and formats the returned energy, stress and forces. The force field
//! shipped with the crate is [`NativeLibrary`], which loads `libwrapper-C.so` at runtime.
//!
//! ```no_run
//! use chimes_calc::{Evaluator, EvaluatorOptions, NativeLibrary, read_configuration};
//! use std::path::Path;
//!
//! let mut library = NativeLibrary::open(&NativeLibrary::locate(None))?;
//! library.initialize(Path::new("params.txt"), &EvaluatorOptions::default())?;
//!
//! let config = read_configuration(Path::new("system.xyzf"))?;
//! let result = library.evaluate(&config)?;
//! println!("{} kcal/mol", result.energy);
//! # Ok::<(), chimes_calc::CalcError>(())
//! ```

pub mod config;
pub mod coordinates;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod types;
pub mod units;

pub use config::RunConfig;
pub use coordinates::{parse_configuration, read_configuration};
pub use error::CalcError;
pub use evaluator::{Evaluator, EvaluatorOptions, NativeLibrary};
pub use types::{Atom, CalculationResult, Cell, Configuration};
