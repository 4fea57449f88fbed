#![allow(dead_code)]

use chimes_calc::{CalcError, CalculationResult, Configuration, Evaluator};

/// A Lennard-Jones style pair evaluator without periodic images, standing in for the native
/// calculator so that everything around the foreign call can be exercised.
pub struct PairEvaluator {
    pub epsilon: f64,
    pub sigma: f64,
}

impl Default for PairEvaluator {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            sigma: 1.0,
        }
    }
}

impl Evaluator for PairEvaluator {
    fn evaluate(&self, config: &Configuration) -> Result<CalculationResult, CalcError> {
        let n = config.natoms();
        let mut result = CalculationResult::zeroed(n);

        for i in 0..n {
            for j in 0..i {
                let pi = config.atoms[i].position;
                let pj = config.atoms[j].position;
                let d = [pi[0] - pj[0], pi[1] - pj[1], pi[2] - pj[2]];
                let r = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();

                let s6 = (self.sigma / r).powi(6);
                result.energy += 4.0 * self.epsilon * (s6 * s6 - s6);

                // -dV/dr / r
                let g = 24.0 * self.epsilon * (2.0 * s6 * s6 - s6) / (r * r);
                for k in 0..3 {
                    result.forces[i][k] += g * d[k];
                    result.forces[j][k] -= g * d[k];
                    for l in 0..3 {
                        result.stress[3 * k + l] += g * d[k] * d[l];
                    }
                }
            }
        }

        Ok(result)
    }
}

pub fn coordinate_file(cell: [f64; 9], atoms: &[(&str, [f64; 3])]) -> String {
    let mut text = format!("{}\n", atoms.len());
    let cell: Vec<String> = cell.iter().map(|v| v.to_string()).collect();
    text.push_str(&cell.join(" "));
    text.push('\n');
    for (label, [x, y, z]) in atoms {
        text.push_str(&format!("{} {} {} {}\n", label, x, y, z));
    }
    text
}
