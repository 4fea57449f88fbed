use clap::{ArgAction, Args, Parser, ValueEnum};
use std::path::PathBuf;

const ABOUT: &str = "A command-line driver that evaluates energy, stress, and forces of an atomic configuration with the ChIMES serial calculator library.";
const AFTER_HELP: &str = "\
The coordinate file holds the number of atoms on its first line, the three cell vectors
(nine numbers) on its second line, then one '<type> <x> <y> <z>' line per atom.";
const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = ABOUT,
    after_help = AFTER_HELP,
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Force-field parameter file, read by the calculator library.
    #[arg(value_name = "PARAM_FILE")]
    pub param_file: PathBuf,

    /// Coordinate file with the configuration to evaluate.
    ///
    /// Use '-' to read from standard input.
    #[arg(value_name = "COORD_FILE")]
    pub coord_file: PathBuf,

    /// Number of ghost-cell layers.
    ///
    /// Accepted for compatibility with existing run scripts; the serial calculator determines
    /// the layers it needs itself, so the value is not forwarded.
    #[arg(value_name = "NLAYERS")]
    pub nlayers: u32,

    /// Debug flag; a value of 1 writes the results to the debug file.
    ///
    /// Must be followed by BINDING_DIR.
    #[arg(value_name = "DEBUG", requires = "binding_dir", allow_negative_numbers = true)]
    pub debug: Option<i64>,

    /// Directory containing the calculator's C wrapper library (libwrapper-C.so).
    #[arg(value_name = "BINDING_DIR")]
    pub binding_dir: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub library: LibraryOptions,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    ///
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Debug output is written only when the debug flag is given and equals 1.
    pub fn debug_requested(&self) -> bool {
        self.debug == Some(1)
    }
}

/// Options for controlling the output format and destination.
#[derive(Args, Debug)]
#[command(next_help_heading = "Output Options")]
pub struct OutputOptions {
    /// Output file path.
    ///
    /// If not specified, results are written to standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for the results.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Number of decimal places to display in the pretty format.
    #[arg(short, long, default_value_t = 6)]
    pub precision: usize,

    /// Path of the debug file, overriding the run configuration [default: debug.dat].
    #[arg(long, value_name = "FILE")]
    pub debug_file: Option<PathBuf>,
}

/// Options for locating and configuring the calculator library.
#[derive(Args, Debug)]
#[command(next_help_heading = "Library Options")]
pub struct LibraryOptions {
    /// Run configuration file in TOML format.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Explicit path to the calculator library, overriding BINDING_DIR and the run
    /// configuration.
    #[arg(short = 'L', long = "library", value_name = "FILE")]
    pub path: Option<PathBuf>,
}

/// Output format for the calculation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One value per line, as expected by existing comparison scripts.
    Plain,
    /// Tables with energy, stress components, and per-atom forces.
    Pretty,
    /// JSON object with energy, stress, and forces.
    Json,
}
