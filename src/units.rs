//! Unit conversion constants for values returned by the calculator.

/// Conversion factor from the calculator's native stress unit to GPa.
///
/// The calculator reports stress in kcal/mol/Å³; multiplying by this factor yields GPa.
pub const STRESS_TO_GPA: f64 = 6.9479;

/// Flat indices of the six independent components of a row-major 3x3 stress tensor,
/// in the order `[xx, yy, zz, xy, xz, yz]`.
pub const STRESS_ORDER: [usize; 6] = [0, 4, 8, 1, 2, 5];

/// Names matching [`STRESS_ORDER`].
pub const STRESS_LABELS: [&str; 6] = ["xx", "yy", "zz", "xy", "xz", "yz"];
