use super::cli::OutputFormat;
use super::error::CliError;
use chimes_calc::units::STRESS_LABELS;
use chimes_calc::{CalculationResult, Configuration, report};
use prettytable::*;
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn get_writer(output_path: &Option<PathBuf>) -> Result<Box<dyn Write>, CliError> {
    match output_path {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| CliError::Io {
                path: path.clone(),
                source: e,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

pub fn write_results(
    mut writer: Box<dyn Write>,
    config: &Configuration,
    result: &CalculationResult,
    format: OutputFormat,
    precision: usize,
    source_name: &str,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Plain => report::write_summary(&mut writer, result)?,
        OutputFormat::Pretty => {
            write_pretty_table(&mut writer, config, result, precision, source_name)?
        }
        OutputFormat::Json => write_json(&mut writer, config, result, source_name)?,
    }
    writer.flush()?;
    Ok(())
}

pub fn write_debug_file(path: &Path, result: &CalculationResult) -> Result<(), CliError> {
    let io_error = |e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let file = std::fs::File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    report::write_debug(&mut writer, result).map_err(io_error)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}

fn write_pretty_table(
    writer: &mut dyn Write,
    config: &Configuration,
    result: &CalculationResult,
    precision: usize,
    source_name: &str,
) -> Result<(), CliError> {
    let box_format = format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Title],
            format::LineSeparator::new('═', '╪', '╞', '╡'),
        )
        .separators(
            &[format::LinePosition::Intern],
            format::LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build();

    let no_intern_format = format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build();

    let mut title_table = Table::new();
    title_table.set_format(box_format);
    title_table.add_row(row![bc->"ChIMES Force Field Results"]);
    title_table.print(writer)?;
    writeln!(writer)?;

    let mut summary_table = Table::new();
    summary_table.set_format(no_intern_format);
    summary_table.add_row(row![b->"Source File:", source_name]);
    summary_table.add_row(row![b->"Total Atoms:", config.natoms()]);
    summary_table.add_row(row![b->"Energy:", format!("{:.prec$} kcal/mol", result.energy, prec = precision)]);
    summary_table.print(writer)?;
    writeln!(writer)?;

    let mut stress_table = Table::new();
    stress_table.set_format(box_format);
    stress_table.set_titles(row![bc->"Component", bc->"Stress (GPa)"]);
    for (label, value) in STRESS_LABELS.iter().zip(result.stress_gpa()) {
        stress_table.add_row(row![
            c->label,
            r->format!("{:.prec$}", value, prec = precision)
        ]);
    }
    stress_table.print(writer)?;
    writeln!(writer)?;

    let mut force_table = Table::new();
    force_table.set_format(box_format);
    force_table.set_titles(row![
        bc->"Index",
        bc->"Type",
        bc->"Fx (kcal/mol/Å)",
        bc->"Fy (kcal/mol/Å)",
        bc->"Fz (kcal/mol/Å)"
    ]);

    for (i, (atom, force)) in config.atoms.iter().zip(&result.forces).enumerate() {
        force_table.add_row(row![
            r->i,
            l->atom.label,
            r->format!("{:.prec$}", force[0], prec = precision),
            r->format!("{:.prec$}", force[1], prec = precision),
            r->format!("{:.prec$}", force[2], prec = precision)
        ]);
    }

    force_table.print(writer)?;

    Ok(())
}

#[derive(Serialize)]
struct JsonStress {
    xx: f64,
    yy: f64,
    zz: f64,
    xy: f64,
    xz: f64,
    yz: f64,
}

#[derive(Serialize)]
struct JsonAtom<'a> {
    index: usize,
    label: &'a str,
    position: [f64; 3],
    force: [f64; 3],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    natoms: usize,
    energy: f64,
    stress_gpa: JsonStress,
    stress: [f64; 9],
    atoms: Vec<JsonAtom<'a>>,
}

fn write_json(
    writer: &mut dyn Write,
    config: &Configuration,
    result: &CalculationResult,
    source_name: &str,
) -> Result<(), CliError> {
    let [xx, yy, zz, xy, xz, yz] = result.stress_gpa();
    let report = JsonReport {
        source: source_name,
        natoms: config.natoms(),
        energy: result.energy,
        stress_gpa: JsonStress {
            xx,
            yy,
            zz,
            xy,
            xz,
            yz,
        },
        stress: result.stress,
        atoms: config
            .atoms
            .iter()
            .zip(&result.forces)
            .enumerate()
            .map(|(index, (atom, force))| JsonAtom {
                index,
                label: &atom.label,
                position: atom.position,
                force: *force,
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chimes_calc::{Atom, Cell};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn sample() -> (Configuration, CalculationResult) {
        let config = Configuration {
            atoms: vec![
                Atom::new("C", [0.0, 0.0, 0.0]),
                Atom::new("N", [1.1, 0.0, 0.0]),
            ],
            cell: Cell::from_flat([8.0, 0.0, 0.0, 0.0, 8.0, 0.0, 0.0, 0.0, 8.0]),
        };
        let result = CalculationResult {
            energy: -42.0,
            stress: [1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0],
            forces: vec![[0.5, 0.0, 0.0], [-0.5, 0.0, 0.0]],
        };
        (config, result)
    }

    #[test]
    fn test_write_plain() {
        let (config, result) = sample();
        let buffer = SharedBuffer::default();
        write_results(
            Box::new(buffer.clone()),
            &config,
            &result,
            OutputFormat::Plain,
            6,
            "test",
        )
        .unwrap();

        let text = buffer.text();
        assert!(text.starts_with("Success!\nEnergy (kcal/mol) -42.0\n"));
        assert_eq!(text.lines().count(), 3 + 6 + 1 + 6);
    }

    #[test]
    fn test_write_json() {
        let (config, result) = sample();
        let buffer = SharedBuffer::default();
        write_results(
            Box::new(buffer.clone()),
            &config,
            &result,
            OutputFormat::Json,
            6,
            "test.xyzf",
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&buffer.text()).unwrap();
        assert_eq!(value["source"], "test.xyzf");
        assert_eq!(value["natoms"], 2);
        assert_eq!(value["energy"], -42.0);
        assert_relative_eq!(value["stress_gpa"]["yy"].as_f64().unwrap(), 2.0 * 6.9479);
        assert_eq!(value["atoms"][1]["label"], "N");
        assert_eq!(value["atoms"][1]["force"][0], -0.5);
    }

    #[test]
    fn test_write_pretty() {
        let (config, result) = sample();
        let buffer = SharedBuffer::default();
        write_results(
            Box::new(buffer.clone()),
            &config,
            &result,
            OutputFormat::Pretty,
            3,
            "test.xyzf",
        )
        .unwrap();

        let text = buffer.text();
        assert!(text.contains("ChIMES Force Field Results"));
        assert!(text.contains("-42.000 kcal/mol"));
        assert!(text.contains("20.844"));
        assert!(text.contains("-0.500"));
    }

    #[test]
    fn test_write_debug_file() {
        let (_, result) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.dat");

        write_debug_file(&path, &result).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7 + 6);
        assert_eq!(lines[0], "-42.000000");
        assert_eq!(lines[7], "5.000000e-01");
    }

    #[test]
    fn test_write_debug_file_bad_path() {
        let (_, result) = sample();
        let result = write_debug_file(Path::new("/non/existent/dir/debug.dat"), &result);
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}
