//! Writers for calculation results: the plain console summary and the debug dump.
//!
//! Both layouts are consumed by existing regression scripts that compare them line by line,
//! so their shape and number formatting are fixed.

use crate::types::CalculationResult;
use std::io::{self, Write};

/// Writes the plain console summary: energy, the six stress components in GPa and every force
/// component, one value per line.
pub fn write_summary<W: Write + ?Sized>(writer: &mut W, result: &CalculationResult) -> io::Result<()> {
    writeln!(writer, "Success!")?;
    writeln!(writer, "Energy (kcal/mol) {}", format_repr(result.energy))?;
    writeln!(writer, "Stress tensors (GPa): ")?;
    for value in result.stress_gpa() {
        writeln!(writer, "{}", format_repr(value))?;
    }
    writeln!(writer, "Forces (kcal/mol/A): ")?;
    for force in &result.forces {
        for &component in force {
            writeln!(writer, "{}", format_repr(component))?;
        }
    }
    Ok(())
}

/// Writes the debug dump: energy and stress with six decimals, then forces in scientific
/// notation, one value per line.
pub fn write_debug<W: Write + ?Sized>(writer: &mut W, result: &CalculationResult) -> io::Result<()> {
    writeln!(writer, "{}", format_fixed(result.energy, 6))?;
    for value in result.stress_gpa() {
        writeln!(writer, "{}", format_fixed(value, 6))?;
    }
    for force in &result.forces {
        for &component in force {
            writeln!(writer, "{}", format_scientific(component, 6))?;
        }
    }
    Ok(())
}

/// Shortest round-trip notation, spelled the way Python's `repr` spells floats: `0.5`,
/// `-12.0`, `1e-05`, `1.5e+16`, `nan`.
pub fn format_repr(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }

    let formatted = format!("{:?}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => pad_exponent(mantissa, exponent),
        None => formatted,
    }
}

/// Fixed-point notation with `precision` decimals.
pub fn format_fixed(value: f64, precision: usize) -> String {
    match non_finite(value) {
        Some(text) => text.to_string(),
        None => format!("{:.*}", precision, value),
    }
}

/// Scientific notation with `precision` fractional digits and a signed exponent of at least two
/// digits, e.g. `-1.234560e+03`.
pub fn format_scientific(value: f64, precision: usize) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }

    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => pad_exponent(mantissa, exponent),
        None => formatted,
    }
}

// `1e-5` -> `1e-05`, `1.5e16` -> `1.5e+16`
fn pad_exponent(mantissa: &str, exponent: &str) -> String {
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> CalculationResult {
        CalculationResult {
            energy: -12.5,
            stress: [1.0, 0.1, 0.2, 0.1, 2.0, 0.3, 0.2, 0.3, 3.0],
            forces: vec![[0.5, -0.25, 1234.5], [0.0, 1e-7, -3.0]],
        }
    }

    fn lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1234.5, 6), "1.234500e+03");
        assert_eq!(format_scientific(-0.000123, 6), "-1.230000e-04");
        assert_eq!(format_scientific(0.0, 6), "0.000000e+00");
        assert_eq!(format_scientific(1e-120, 2), "1.00e-120");
        assert_eq!(format_scientific(f64::NAN, 6), "nan");
        assert_eq!(format_scientific(f64::NEG_INFINITY, 6), "-inf");
    }

    #[test]
    fn test_format_repr() {
        assert_eq!(format_repr(0.5), "0.5");
        assert_eq!(format_repr(-12.0), "-12.0");
        assert_eq!(format_repr(0.0), "0.0");
        assert_eq!(format_repr(0.0001), "0.0001");
        assert_eq!(format_repr(1e-5), "1e-05");
        assert_eq!(format_repr(-2.5e-7), "-2.5e-07");
        assert_eq!(format_repr(1.5e16), "1.5e+16");
        assert_eq!(format_repr(1e300), "1e+300");
        assert_eq!(format_repr(123456789.25), "123456789.25");
        assert_eq!(format_repr(f64::NAN), "nan");
        assert_eq!(format_repr(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(-12.5, 6), "-12.500000");
        assert_eq!(format_fixed(6.9479, 2), "6.95");
        assert_eq!(format_fixed(f64::INFINITY, 6), "inf");
    }

    #[test]
    fn test_write_summary_layout() {
        let mut out = Vec::new();
        write_summary(&mut out, &sample_result()).unwrap();
        let lines = lines(out);

        assert_eq!(lines.len(), 1 + 1 + 1 + 6 + 1 + 6);
        assert_eq!(lines[0], "Success!");
        assert_eq!(lines[1], "Energy (kcal/mol) -12.5");
        assert_eq!(lines[2], "Stress tensors (GPa): ");
        assert_eq!(lines[3], "6.9479");
        assert_eq!(lines[4], format!("{:?}", 2.0 * 6.9479));
        assert_eq!(lines[5], format!("{:?}", 3.0 * 6.9479));
        assert_eq!(lines[6], format!("{:?}", 0.1 * 6.9479));
        assert_eq!(lines[7], format!("{:?}", 0.2 * 6.9479));
        assert_eq!(lines[8], format!("{:?}", 0.3 * 6.9479));
        assert_eq!(lines[9], "Forces (kcal/mol/A): ");
        assert_eq!(&lines[10..13], ["0.5", "-0.25", "1234.5"]);
        assert_eq!(&lines[13..16], ["0.0", "1e-07", "-3.0"]);
    }

    #[test]
    fn test_write_debug_layout() {
        let mut out = Vec::new();
        write_debug(&mut out, &sample_result()).unwrap();
        let lines = lines(out);

        assert_eq!(lines.len(), 1 + 6 + 6);
        assert_eq!(lines[0], "-12.500000");
        assert_eq!(lines[1], "6.947900");
        assert_eq!(lines[2], "13.895800");
        assert_eq!(lines[3], "20.843700");
        assert_eq!(
            &lines[7..13],
            [
                "5.000000e-01",
                "-2.500000e-01",
                "1.234500e+03",
                "0.000000e+00",
                "1.000000e-07",
                "-3.000000e+00"
            ]
        );
    }

    #[test]
    fn test_write_debug_without_atoms() {
        let mut out = Vec::new();
        write_debug(&mut out, &CalculationResult::zeroed(0)).unwrap();
        assert_eq!(lines(out).len(), 7);
    }
}
