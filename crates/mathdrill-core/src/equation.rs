//! A single arithmetic question: an operator between two operands.

use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};
use crate::model::{Answer, Operator, OperatorSet, Pins};
use crate::ranges;

/// One drill question and the answer the user gave for it.
///
/// An equation starts empty or pre-filled, is generated once per prompt, and
/// is reset after scoring. Equality ignores the answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equation {
    pub operator: Option<Operator>,
    pub first: Option<i64>,
    pub second: Option<i64>,
    #[serde(default)]
    pub answer: Answer,
}

impl Equation {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A pre-filled, unanswered equation. No range checks are applied.
    pub fn new(operator: Operator, first: i64, second: i64) -> Self {
        Self {
            operator: Some(operator),
            first: Some(first),
            second: Some(second),
            answer: Answer::Unanswered,
        }
    }

    /// Generate a question, honoring any pinned operator or operands.
    ///
    /// Without a pinned operator one is drawn uniformly from `allowed`.
    /// Operands that are not pinned come from the operator's ranges. A `/`
    /// question whose divisor resolves to zero fails with
    /// [`DrillError::DivisionByZero`]; that can only happen when the caller
    /// pinned it, so the caller decides whether to retry or abort.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        allowed: &OperatorSet,
        pins: &Pins,
    ) -> Result<Self> {
        let op = match pins.operator {
            Some(op) if allowed.contains(op) => op,
            Some(op) => {
                return Err(DrillError::InvalidOperator(format!(
                    "{op} is not enabled (enabled: {allowed})"
                )))
            }
            None => allowed.choose(rng),
        };

        let (first, second) = match op {
            Operator::Add | Operator::Multiply => {
                let range = ranges::first_range(op);
                let first = pins.first.unwrap_or_else(|| rng.gen_range(range));
                let second = pins
                    .second
                    .unwrap_or_else(|| rng.gen_range(ranges::second_range(op, first)));
                (first, second)
            }
            Operator::Subtract => {
                let first = match (pins.first, pins.second) {
                    (Some(first), _) => first,
                    (None, Some(second)) => rng.gen_range(ranges::minuends_for(second)),
                    (None, None) => rng.gen_range(ranges::first_range(op)),
                };
                let second = pins
                    .second
                    .unwrap_or_else(|| rng.gen_range(ranges::second_range(op, first)));
                (first, second)
            }
            Operator::Divide => match (pins.first, pins.second) {
                (_, Some(0)) => return Err(DrillError::DivisionByZero),
                (Some(first), Some(second)) => {
                    if first.checked_rem(second) != Some(0) {
                        return Err(DrillError::InexactDivision { first, second });
                    }
                    (first, second)
                }
                (Some(first), None) => {
                    let divisors = ranges::divisors_of(first);
                    (first, divisors[rng.gen_range(0..divisors.len())])
                }
                (None, second) => {
                    let second = second.unwrap_or_else(|| rng.gen_range(ranges::DIVISOR));
                    // quotient 0 when the dividend would overflow
                    let first = second
                        .checked_mul(rng.gen_range(ranges::QUOTIENT))
                        .unwrap_or(0);
                    (first, second)
                }
            },
        };

        let equation = Self::new(op, first, second);
        tracing::debug!(question = %equation, "generated question");
        Ok(equation)
    }

    /// Both operands are set and the operator is one of `allowed`.
    pub fn is_complete(&self, allowed: &OperatorSet) -> bool {
        self.first.is_some()
            && self.second.is_some()
            && self.operator.is_some_and(|op| allowed.contains(op))
    }

    /// `first <op> second`, or `None` while the equation is incomplete or the
    /// division is undefined.
    pub fn correct_answer(&self) -> Option<i64> {
        let (op, first, second) = self.parts()?;
        op.apply(first, second)
    }

    /// The candidate is a number equal to the correct answer.
    pub fn is_correct(&self, candidate: Answer) -> bool {
        match candidate {
            Answer::Value(v) => self.correct_answer() == Some(v),
            Answer::Unanswered | Answer::Skipped => false,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answer != Answer::Unanswered
    }

    /// Operator and operands, if all three are set.
    pub fn parts(&self) -> Option<(Operator, i64, i64)> {
        Some((self.operator?, self.first?, self.second?))
    }

    /// The question as shown to a person, e.g. `"6 × 7 = "`.
    pub fn human_readable(&self) -> String {
        let op = self
            .operator
            .map(|op| op.display_symbol().to_string())
            .unwrap_or_else(|| "?".into());
        format!("{} {} {} = ", operand(self.first), op, operand(self.second))
    }

    /// The question stacked vertically, right-aligned in three columns.
    pub fn stacked_lines(&self) -> [String; 2] {
        let op = self.operator.map(|op| op.display_symbol()).unwrap_or(' ');
        [
            format!(" {:>2}", operand(self.first)),
            format!("{}{:>2}", op, operand(self.second)),
        ]
    }

    /// Rows and columns of the picture drawn by [`Equation::visualization_lines`].
    ///
    /// `+` and `-` draw one tally row per operand, as wide as the larger
    /// operand. `*` draws `first` rows of `second` cells; `/` draws the
    /// quotient's rows of `second` cells.
    pub fn visualization_dims(&self) -> Option<(usize, usize)> {
        let (op, first, second) = self.parts()?;
        let dims = match op {
            Operator::Add | Operator::Subtract => (2, count(first).max(count(second))),
            Operator::Multiply => (count(first), count(second)),
            Operator::Divide => (count(op.apply(first, second)?), count(second)),
        };
        Some(dims)
    }

    /// A text picture of the question.
    pub fn visualization_lines(&self) -> Vec<String> {
        let Some((op, first, second)) = self.parts() else {
            return Vec::new();
        };
        match op {
            Operator::Add | Operator::Subtract => vec![tally(first), tally(second)],
            Operator::Multiply | Operator::Divide => {
                let Some((rows, cols)) = self.visualization_dims() else {
                    return Vec::new();
                };
                if cols == 0 {
                    return Vec::new();
                }
                let row = vec!["o"; cols].join(" ");
                vec![row; rows]
            }
        }
    }

    /// Clear everything, returning to the empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn operand(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".into())
}

fn count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Tally marks in groups of five.
fn tally(value: i64) -> String {
    let marks = "|".repeat(count(value));
    marks
        .as_bytes()
        .chunks(5)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

impl PartialEq for Equation {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.first == other.first && self.second == other.second
    }
}

impl Eq for Equation {}

impl Hash for Equation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.operator.hash(state);
        self.first.hash(state);
        self.second.hash(state);
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.operator.map(Operator::symbol).unwrap_or('?');
        write!(f, "{} {} {} = ", operand(self.first), op, operand(self.second))
    }
}
