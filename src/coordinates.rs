//! Reader for the plain-text coordinate files consumed by the calculator driver.
//!
//! The format is a close relative of XYZ:
//!
//! ```text
//! 2
//! 1.0 0.0 0.0 0.0 1.0 0.0 0.0 0.0 1.0
//! H 0.0 0.0 0.0
//! H 1.0 1.0 1.0
//! ```
//!
//! The first line holds the number of atoms, the second the three cell vectors concatenated,
//! and each following line one atom as `<type> <x> <y> <z>`. Extra columns on atom lines and
//! anything after the last atom are ignored.

use crate::error::CalcError;
use crate::types::{Atom, Cell, Configuration};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Reads a configuration from a coordinate file on disk, or from standard input when `path`
/// is `-`.
pub fn read_configuration(path: &Path) -> Result<Configuration, CalcError> {
    if path == Path::new("-") {
        return parse_configuration(BufReader::new(io::stdin()), "stdin");
    }

    let file = File::open(path).map_err(|e| CalcError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_configuration(BufReader::new(file), &path.display().to_string())
}

/// Parses a configuration from any buffered reader.
///
/// `source_name` is only used to make error messages point at the right input.
pub fn parse_configuration<R: BufRead>(
    reader: R,
    source_name: &str,
) -> Result<Configuration, CalcError> {
    let error = |line: usize, details: String| CalcError::CoordinateParse {
        source_name: source_name.to_string(),
        line,
        details,
    };

    let mut lines = reader.lines();
    let mut next_line = |line: usize, what: &str| -> Result<String, CalcError> {
        match lines.next() {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(error(line, format!("Error reading line: {}", e))),
            None => Err(error(line, format!("Missing {}", what))),
        }
    };

    let natoms_line = next_line(1, "number of atoms line")?;
    let natoms: usize = natoms_line
        .trim()
        .parse()
        .map_err(|_| error(1, format!("Invalid number of atoms: {}", natoms_line)))?;

    let cell_line = next_line(2, "cell vectors line")?;
    let cell = parse_cell(&cell_line).map_err(|details| error(2, details))?;

    let mut atoms = Vec::with_capacity(natoms);
    for i in 0..natoms {
        let line_number = i + 3;
        let line = next_line(
            line_number,
            &format!("atom line: expected {} atoms, got {}", natoms, i),
        )?;
        let atom = parse_atom(&line).map_err(|details| error(line_number, details))?;
        atoms.push(atom);
    }

    Ok(Configuration { atoms, cell })
}

fn parse_cell(line: &str) -> Result<Cell, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 9 {
        return Err(format!(
            "expected 9 cell vector components, got {}",
            parts.len()
        ));
    }

    let mut values = [0.0; 9];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse()
            .map_err(|_| format!("Invalid cell vector component: {}", part))?;
    }
    Ok(Cell::from_flat(values))
}

fn parse_atom(line: &str) -> Result<Atom, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(format!("expected at least 4 fields, got {}", parts.len()));
    }

    let mut position = [0.0; 3];
    for (axis, (value, part)) in position.iter_mut().zip(&parts[1..4]).enumerate() {
        *value = part.parse().map_err(|_| {
            format!("Invalid {} coordinate: {}", ["x", "y", "z"][axis], part)
        })?;
    }

    Ok(Atom::new(parts[0], position))
}

impl FromStr for Configuration {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_configuration(s.as_bytes(), "string")
    }
}
