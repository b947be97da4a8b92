//! Exhaustive question enumeration for unique mode.
//!
//! The pool lists every valid (operator, first, second) triple for the
//! enabled operators and pins, and is drawn from without replacement.

use rand::Rng;

use crate::equation::Equation;
use crate::model::{Operator, OperatorSet, Pins};
use crate::ranges;

/// Every valid question for `allowed` under `pins`, in a fixed order.
///
/// Operators come in the set's order; operands ascend. `/` triples with a
/// zero divisor or an uneven quotient are left out rather than reported. A
/// pinned operator outside `allowed` yields no questions.
pub fn enumerate_all_questions(allowed: &OperatorSet, pins: &Pins) -> Vec<Equation> {
    let operators: Vec<Operator> = match pins.operator {
        Some(op) if allowed.contains(op) => vec![op],
        Some(_) => Vec::new(),
        None => allowed.iter().collect(),
    };

    let mut questions = Vec::new();
    for op in operators {
        for (first, second) in operand_pairs(op, pins) {
            questions.push(Equation::new(op, first, second));
        }
    }
    questions
}

fn operand_pairs(op: Operator, pins: &Pins) -> Vec<(i64, i64)> {
    match op {
        Operator::Add | Operator::Multiply | Operator::Subtract => {
            let firsts: Vec<i64> = match (pins.first, pins.second, op) {
                (Some(first), _, _) => vec![first],
                (None, Some(second), Operator::Subtract) => ranges::minuends_for(second).collect(),
                _ => ranges::first_range(op).collect(),
            };
            firsts
                .into_iter()
                .flat_map(|first| {
                    let seconds: Vec<i64> = match pins.second {
                        Some(second) => vec![second],
                        None => ranges::second_range(op, first).collect(),
                    };
                    seconds.into_iter().map(move |second| (first, second))
                })
                .collect()
        }
        Operator::Divide => match (pins.first, pins.second) {
            (_, Some(0)) => Vec::new(),
            (Some(first), Some(second)) if first.checked_rem(second) != Some(0) => Vec::new(),
            (Some(first), Some(second)) => vec![(first, second)],
            (Some(first), None) => ranges::divisors_of(first)
                .into_iter()
                .map(|second| (first, second))
                .collect(),
            (None, Some(second)) => ranges::QUOTIENT
                .filter_map(|k| Some((second.checked_mul(k)?, second)))
                .collect(),
            (None, None) => ranges::DIVISOR
                .flat_map(|second| ranges::QUOTIENT.map(move |k| (second * k, second)))
                .collect(),
        },
    }
}

/// Questions not yet asked in unique mode.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    remaining: Vec<Equation>,
    source: Option<(OperatorSet, Pins)>,
}

impl QuestionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a random question, refilling the pool first when it is empty or
    /// was built for different operators or pins.
    ///
    /// Returns `None` only when no question satisfies the pins at all.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        allowed: &OperatorSet,
        pins: &Pins,
    ) -> Option<Equation> {
        let stale = self
            .source
            .as_ref()
            .map_or(true, |(ops, p)| ops != allowed || p != pins);
        if stale || self.remaining.is_empty() {
            self.refill(allowed, pins);
        }
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.remaining.len());
        Some(self.remaining.swap_remove(index))
    }

    fn refill(&mut self, allowed: &OperatorSet, pins: &Pins) {
        self.remaining = enumerate_all_questions(allowed, pins);
        self.source = Some((allowed.clone(), *pins));
        tracing::debug!(
            size = self.remaining.len(),
            operators = %allowed,
            "refilled question pool"
        );
    }

    /// Questions left before the pool repeats.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
        self.source = None;
    }
}
