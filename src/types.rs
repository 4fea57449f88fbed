//! This module defines the core types used in the chimes_calc library for representing atomic
//! configurations and calculation results.
//!
//! It includes the `Atom` struct, the `Cell` and `Configuration` structs describing the periodic
//! system handed to an evaluator, and the `CalculationResult` struct holding what comes back.

use crate::units::{STRESS_ORDER, STRESS_TO_GPA};

/// A concrete representation of an atom with a type label and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom type label, matched against the types of the parameter file.
    pub label: String,
    /// The 3D position of the atom in Cartesian coordinates.
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(label: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }
}

/// The three edge vectors of a periodic simulation cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub a: [f64; 3],
    pub b: [f64; 3],
    pub c: [f64; 3],
}

impl Cell {
    pub fn new(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Self {
        Self { a, b, c }
    }

    /// Builds a cell from nine values, the three vectors concatenated.
    pub fn from_flat(v: [f64; 9]) -> Self {
        Self {
            a: [v[0], v[1], v[2]],
            b: [v[3], v[4], v[5]],
            c: [v[6], v[7], v[8]],
        }
    }

    /// Returns the vectors labelled `a`, `b`, `c`.
    pub fn vectors(&self) -> [(char, [f64; 3]); 3] {
        [('a', self.a), ('b', self.b), ('c', self.c)]
    }
}

/// An atomic configuration: an ordered set of atoms inside a simulation cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub atoms: Vec<Atom>,
    pub cell: Cell,
}

impl Configuration {
    pub fn natoms(&self) -> usize {
        self.atoms.len()
    }
}

/// The result of a single force-field evaluation.
///
/// All values are owned by the caller; nothing here aliases memory of the external library.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    /// Potential energy in kcal/mol.
    pub energy: f64,
    /// The stress tensor, row-major 3x3, in the calculator's native units.
    pub stress: [f64; 9],
    /// Per-atom forces in kcal/mol/Å, in the same order as the input atoms.
    pub forces: Vec<[f64; 3]>,
}

impl CalculationResult {
    /// A result with zero energy, zero stress and `natoms` zero force vectors.
    pub fn zeroed(natoms: usize) -> Self {
        Self {
            energy: 0.0,
            stress: [0.0; 9],
            forces: vec![[0.0; 3]; natoms],
        }
    }

    /// Returns the six independent stress components in GPa, ordered
    /// `[xx, yy, zz, xy, xz, yz]`.
    pub fn stress_gpa(&self) -> [f64; 6] {
        STRESS_ORDER.map(|i| self.stress[i] * STRESS_TO_GPA)
    }
}
