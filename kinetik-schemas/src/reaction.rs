use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ARROW: &str = "->";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionParseError {
    #[error("Reaction '{0}' has no '->' separating reactants from products")]
    MissingArrow(String),

    #[error("Reaction '{0}' has more than one '->'")]
    MultipleArrows(String),

    #[error("Reaction '{0}' contains an empty term")]
    EmptyTerm(String),

    #[error("Invalid stoichiometric coefficient in term '{0}'")]
    InvalidCoefficient(String),

    #[error("Reaction {0} has neither reactants nor products")]
    NoTerms(String),
}

/// A single mass-action reaction.
///
/// `inputs` and `outputs` are multisets expressed by repetition: `2A -> B` is
/// stored as `inputs = ["A", "A"]`, `outputs = ["B"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub rate_constant: f64,
}

impl Reaction {
    pub fn new<I, O, S, T>(inputs: I, outputs: O, rate_constant: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
            rate_constant,
        }
    }

    /// Parses an equation such as `2A + B -> C` and attaches a rate constant.
    pub fn from_equation(equation: &str, rate_constant: f64) -> Result<Self, ReactionParseError> {
        let equation: Equation = equation.parse()?;
        Ok(Self {
            inputs: equation.inputs,
            outputs: equation.outputs,
            rate_constant,
        })
    }

    /// The reactant/product halves without the rate constant.
    pub fn equation(&self) -> Equation {
        Equation {
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
        }
    }

    /// Every species name this reaction mentions, reactants first.
    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().chain(self.outputs.iter()).map(String::as_str)
    }
}

/// Renders the compact `A+B->C` form. The rate constant is left to the caller.
impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, &self.inputs, &self.outputs)
    }
}

/// The reactant/product halves of a reaction, without a rate constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl FromStr for Equation {
    type Err = ReactionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sides = s.split(ARROW);
        let lhs = sides.next().unwrap_or_default();
        let rhs = sides
            .next()
            .ok_or_else(|| ReactionParseError::MissingArrow(s.to_string()))?;
        if sides.next().is_some() {
            return Err(ReactionParseError::MultipleArrows(s.to_string()));
        }

        let equation = Self {
            inputs: parse_side(lhs, s)?,
            outputs: parse_side(rhs, s)?,
        };
        if equation.inputs.is_empty() && equation.outputs.is_empty() {
            return Err(ReactionParseError::NoTerms(format!("'{}'", s)));
        }
        Ok(equation)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, &self.inputs, &self.outputs)
    }
}

fn write_terms(f: &mut fmt::Formatter<'_>, inputs: &[String], outputs: &[String]) -> fmt::Result {
    write!(f, "{}{}{}", inputs.join("+"), ARROW, outputs.join("+"))
}

/// An empty side (`-> A`, `A ->`) is a source or sink and yields no terms.
fn parse_side(side: &str, equation: &str) -> Result<Vec<String>, ReactionParseError> {
    if side.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for term in side.split('+') {
        let term = term.trim();
        if term.is_empty() {
            return Err(ReactionParseError::EmptyTerm(equation.to_string()));
        }
        let (count, name) = split_coefficient(term)?;
        names.extend(std::iter::repeat(name.to_string()).take(count));
    }
    Ok(names)
}

/// Leading digits count as a coefficient only when followed by whitespace or
/// a letter, so names such as `2-butene` survive intact.
fn split_coefficient(term: &str) -> Result<(usize, &str), ReactionParseError> {
    let digits = term.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return Ok((1, term));
    }

    let rest = &term[digits..];
    match rest.chars().next() {
        Some(c) if c.is_whitespace() || c.is_alphabetic() => {
            let name = rest.trim_start();
            let count: usize = term[..digits]
                .parse()
                .map_err(|_| ReactionParseError::InvalidCoefficient(term.to_string()))?;
            if count == 0 || name.is_empty() {
                return Err(ReactionParseError::InvalidCoefficient(term.to_string()));
            }
            Ok((count, name))
        }
        None => Err(ReactionParseError::InvalidCoefficient(term.to_string())),
        Some(_) => Ok((1, term)),
    }
}
