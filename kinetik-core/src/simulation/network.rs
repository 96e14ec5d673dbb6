use crate::error::KineticError;
use kinetik_schemas::{reaction::Reaction, species::Species};
use std::collections::HashMap;

/// Stoichiometry derived from the declared species and reactions.
///
/// Matrices are indexed `[reaction][species]` and never change once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    input_exponents: Vec<Vec<u32>>,
    output_exponents: Vec<Vec<u32>>,
    rate_constants: Vec<f64>,
    stable: Vec<bool>,
}

/// Result of evaluating one micro-step against a state, before commit.
#[derive(Debug, Clone, PartialEq)]
pub struct MicroStep {
    pub consumed: Vec<f64>,
    pub produced: Vec<f64>,
}

impl MicroStep {
    pub fn delta(&self, species: usize) -> f64 {
        self.produced[species] - self.consumed[species]
    }
}

impl Network {
    pub fn build(
        species: &[Species],
        reactions: &[Reaction],
        index: &HashMap<String, usize>,
    ) -> Result<Self, KineticError> {
        let n_species = species.len();
        let mut input_exponents = Vec::with_capacity(reactions.len());
        let mut output_exponents = Vec::with_capacity(reactions.len());

        for reaction in reactions {
            input_exponents.push(count_occurrences(&reaction.inputs, index, n_species)?);
            output_exponents.push(count_occurrences(&reaction.outputs, index, n_species)?);
        }

        Ok(Self {
            input_exponents,
            output_exponents,
            rate_constants: reactions.iter().map(|r| r.rate_constant).collect(),
            stable: species.iter().map(|s| s.stable).collect(),
        })
    }

    pub fn n_species(&self) -> usize {
        self.stable.len()
    }

    pub fn n_reactions(&self) -> usize {
        self.rate_constants.len()
    }

    pub fn input_exponents(&self) -> &[Vec<u32>] {
        &self.input_exponents
    }

    pub fn output_exponents(&self) -> &[Vec<u32>] {
        &self.output_exponents
    }

    pub fn rate_constants(&self) -> &[f64] {
        &self.rate_constants
    }

    /// Mass-action rates with the step-scaled constant `k * scale`.
    pub fn rates(&self, concentrations: &[f64], scale: f64) -> Vec<f64> {
        self.input_exponents
            .iter()
            .zip(&self.rate_constants)
            .map(|(exponents, k)| {
                exponents
                    .iter()
                    .zip(concentrations)
                    .filter(|(e, _)| **e > 0)
                    .fold(k * scale, |rate, (e, c)| rate * c.powi(*e as i32))
            })
            .collect()
    }

    /// Evaluates consumption and production for every species from one
    /// snapshot. Nothing is mutated, so reaction order cannot matter.
    pub fn evaluate(&self, concentrations: &[f64], scale: f64) -> MicroStep {
        let rates = self.rates(concentrations, scale);
        let n = self.n_species();
        let mut consumed = vec![0.0; n];
        let mut produced = vec![0.0; n];

        for (r, rate) in rates.iter().enumerate() {
            for s in 0..n {
                consumed[s] += rate * f64::from(self.input_exponents[r][s]);
                produced[s] += rate * f64::from(self.output_exponents[r][s]);
            }
        }

        MicroStep { consumed, produced }
    }

    /// Largest `|consumed / concentration|` over non-stable species with a
    /// non-zero concentration, with the index of the species that attains it.
    ///
    /// Production is deliberately not considered: the guard targets depletion.
    pub fn max_depletion_ratio(&self, concentrations: &[f64], step: &MicroStep) -> Option<(usize, f64)> {
        concentrations
            .iter()
            .enumerate()
            .filter(|(s, c)| !self.stable[*s] && **c != 0.0)
            .map(|(s, c)| (s, (step.consumed[s] / c).abs()))
            .fold(None, |best, (s, ratio)| match best {
                Some((_, max)) if max >= ratio => best,
                _ => Some((s, ratio)),
            })
    }

    /// Applies a micro-step to every non-stable species at once.
    pub fn commit(&self, concentrations: &mut [f64], step: &MicroStep) {
        for (s, c) in concentrations.iter_mut().enumerate() {
            if !self.stable[s] {
                *c += step.delta(s);
            }
        }
    }
}

fn count_occurrences(
    names: &[String],
    index: &HashMap<String, usize>,
    n_species: usize,
) -> Result<Vec<u32>, KineticError> {
    let mut counts = vec![0u32; n_species];
    for name in names {
        let s = *index
            .get(name)
            .ok_or_else(|| KineticError::UnknownSpecies(name.clone()))?;
        counts[s] += 1;
    }
    Ok(counts)
}
