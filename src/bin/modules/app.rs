use super::cli::Cli;
use super::error::CliError;
use super::io;
use chimes_calc::{Configuration, Evaluator, NativeLibrary, RunConfig, read_configuration};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::PathBuf;

pub fn run(args: Cli) -> Result<(), CliError> {
    let run_config = match &args.library.config {
        Some(path) => RunConfig::load_from_file(path)?,
        None => RunConfig::default(),
    };

    let library_path = resolve_library_path(&args, &run_config);
    let mut library = NativeLibrary::open(&library_path)?;
    library.initialize(&args.param_file, &run_config.evaluator_options())?;

    info!(
        "Ignoring NLAYERS = {}: the serial calculator builds its own ghost layers",
        args.nlayers
    );

    let configuration = read_configuration(&args.coord_file)?;
    debug!(
        "Read {} atoms from '{}'",
        configuration.natoms(),
        args.coord_file.display()
    );

    evaluate_and_report(&library, &configuration, &args, &run_config)
}

/// Runs one evaluation and writes every requested output.
pub fn evaluate_and_report<E: Evaluator>(
    evaluator: &E,
    configuration: &Configuration,
    args: &Cli,
    run_config: &RunConfig,
) -> Result<(), CliError> {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Evaluating force field...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = evaluator.evaluate(configuration);

    pb.finish_and_clear();
    let result = result?;

    let writer = io::get_writer(&args.output.output)?;
    io::write_results(
        writer,
        configuration,
        &result,
        args.output.format,
        args.output.precision,
        &source_name(args),
    )?;

    if args.debug_requested() {
        let path = debug_file_path(args, run_config);
        info!("Writing debug output to '{}'", path.display());
        io::write_debug_file(&path, &result)?;
    }

    Ok(())
}

/// Picks the calculator library: `--library`, then the run configuration, then BINDING_DIR,
/// then the platform search path.
pub fn resolve_library_path(args: &Cli, run_config: &RunConfig) -> PathBuf {
    if let Some(path) = &args.library.path {
        return path.clone();
    }
    if let Some(path) = &run_config.library {
        return path.clone();
    }
    NativeLibrary::locate(args.binding_dir.as_deref())
}

fn debug_file_path(args: &Cli, run_config: &RunConfig) -> PathBuf {
    args.output
        .debug_file
        .clone()
        .unwrap_or_else(|| run_config.debug_file())
}

fn source_name(args: &Cli) -> String {
    if args.coord_file.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        args.coord_file.display().to_string()
    }
}
