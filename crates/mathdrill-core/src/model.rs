//! Core data model types for mathdrill.
//!
//! Operators, operator sets, answers, and the pinned values a caller can fix
//! when asking for a question.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};

/// One of the four arithmetic operators a drill can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// All operators, in the order the interactive options ask about them.
    pub const ALL: [Operator; 4] = [
        Operator::Divide,
        Operator::Multiply,
        Operator::Add,
        Operator::Subtract,
    ];

    /// ASCII symbol used for storage and comparison.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Symbol shown to the user (`×` and `÷` for the multiplicative operators).
    pub fn display_symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Word used when offering the operator as an option.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "addition",
            Operator::Subtract => "subtraction",
            Operator::Multiply => "multiplication",
            Operator::Divide => "division",
        }
    }

    /// Integer arithmetic. `None` for a zero divisor or an uneven quotient.
    pub fn apply(self, first: i64, second: i64) -> Option<i64> {
        match self {
            Operator::Add => first.checked_add(second),
            Operator::Subtract => first.checked_sub(second),
            Operator::Multiply => first.checked_mul(second),
            Operator::Divide => {
                if first.checked_rem(second) != Some(0) {
                    None
                } else {
                    first.checked_div(second)
                }
            }
        }
    }

    /// Parse a single operator character.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' | '×' | 'x' => Ok(Operator::Multiply),
            '/' | '÷' => Ok(Operator::Divide),
            other => Err(DrillError::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Operator::from_char(c),
            _ => Err(DrillError::InvalidOperator(s.to_string())),
        }
    }
}

/// A non-empty, de-duplicated, insertion-ordered set of operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Operator>", into = "Vec<Operator>")]
pub struct OperatorSet(Vec<Operator>);

impl OperatorSet {
    /// Build a set from operators, dropping duplicates.
    pub fn new<I: IntoIterator<Item = Operator>>(operators: I) -> Result<Self> {
        let mut ops = Vec::new();
        for op in operators {
            if !ops.contains(&op) {
                ops.push(op);
            }
        }
        if ops.is_empty() {
            return Err(DrillError::NoValidOperators);
        }
        Ok(Self(ops))
    }

    /// Keep only the entries that name a valid operator.
    ///
    /// Fails with [`DrillError::NoValidOperators`] if nothing survives.
    pub fn filter_valid<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ops = raw.into_iter().filter_map(|s| match s.as_ref().parse::<Operator>() {
            Ok(op) => Some(op),
            Err(_) => {
                tracing::warn!("ignoring invalid operator '{}'", s.as_ref());
                None
            }
        });
        Self::new(ops)
    }

    /// Parse a run of operator characters such as `"+-"` or `"*/"`.
    ///
    /// Unlike [`OperatorSet::filter_valid`] this rejects any invalid character.
    pub fn parse(s: &str) -> Result<Self> {
        let ops = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(Operator::from_char)
            .collect::<Result<Vec<_>>>()?;
        Self::new(ops)
    }

    pub fn single(op: Operator) -> Self {
        Self(vec![op])
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.0.contains(&op)
    }

    pub fn as_slice(&self) -> &[Operator] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Operator> + '_ {
        self.0.iter().copied()
    }

    /// Pick an operator uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Operator {
        self.0[rng.gen_range(0..self.0.len())]
    }
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self(Operator::ALL.to_vec())
    }
}

impl TryFrom<Vec<Operator>> for OperatorSet {
    type Error = DrillError;

    fn try_from(ops: Vec<Operator>) -> Result<Self> {
        Self::new(ops)
    }
}

impl From<OperatorSet> for Vec<Operator> {
    fn from(set: OperatorSet) -> Self {
        set.0
    }
}

impl fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.0 {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// What the user said about a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Answer {
    #[default]
    Unanswered,
    Skipped,
    Value(i64),
}

impl Answer {
    /// Map raw front-end input: blank is a skip, an integer is an answer.
    ///
    /// Anything else is `None`; the front-end should prompt again.
    pub fn from_input(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Some(Answer::Skipped);
        }
        trimmed.parse::<i64>().ok().map(Answer::Value)
    }

    pub fn value(self) -> Option<i64> {
        match self {
            Answer::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Unanswered => Ok(()),
            Answer::Skipped => write!(f, "-"),
            Answer::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Values a caller fixes instead of letting the generator choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pins {
    pub operator: Option<Operator>,
    pub first: Option<i64>,
    pub second: Option<i64>,
}

impl Pins {
    pub fn operator(op: Operator) -> Self {
        Self {
            operator: Some(op),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operator.is_none() && self.first.is_none() && self.second.is_none()
    }
}

/// Which bucket a scored question landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Right,
    Wrong,
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Right => write!(f, "right"),
            Outcome::Wrong => write!(f, "wrong"),
            Outcome::Skipped => write!(f, "skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn operator_display_and_parse() {
        assert_eq!(Operator::Multiply.to_string(), "*");
        assert_eq!(Operator::Divide.display_symbol(), '÷');
        assert_eq!("+".parse::<Operator>().unwrap(), Operator::Add);
        assert_eq!("×".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!(" / ".parse::<Operator>().unwrap(), Operator::Divide);
        assert_eq!(
            "%".parse::<Operator>(),
            Err(DrillError::InvalidOperator("%".into()))
        );
        assert!("+-".parse::<Operator>().is_err());
    }

    #[test]
    fn apply_is_exact_integer_arithmetic() {
        assert_eq!(Operator::Add.apply(5, 3), Some(8));
        assert_eq!(Operator::Subtract.apply(4, 9), Some(-5));
        assert_eq!(Operator::Multiply.apply(7, 6), Some(42));
        assert_eq!(Operator::Divide.apply(54, 9), Some(6));
        assert_eq!(Operator::Divide.apply(7, 2), None);
        assert_eq!(Operator::Divide.apply(6, 0), None);
        assert_eq!(Operator::Divide.apply(i64::MIN, -1), None);
    }

    #[test]
    fn operator_set_dedupes_and_keeps_order() {
        let set = OperatorSet::parse("-+-").unwrap();
        assert_eq!(set.as_slice(), &[Operator::Subtract, Operator::Add]);
        assert_eq!(set.to_string(), "-+");
    }

    #[test]
    fn operator_set_parse_rejects_bad_characters() {
        assert_eq!(
            OperatorSet::parse("+%"),
            Err(DrillError::InvalidOperator("%".into()))
        );
        assert_eq!(OperatorSet::parse(""), Err(DrillError::NoValidOperators));
    }

    #[test]
    fn filter_valid_drops_unknown_entries() {
        let set = OperatorSet::filter_valid(["+", "^", "/"]).unwrap();
        assert_eq!(set.as_slice(), &[Operator::Add, Operator::Divide]);
        assert_eq!(
            OperatorSet::filter_valid(["^", "%"]),
            Err(DrillError::NoValidOperators)
        );
        assert_eq!(
            OperatorSet::filter_valid(Vec::<&str>::new()),
            Err(DrillError::NoValidOperators)
        );
    }

    #[test]
    fn choose_only_returns_members() {
        let set = OperatorSet::parse("*/").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(set.contains(set.choose(&mut rng)));
        }
    }

    #[test]
    fn answer_from_input() {
        assert_eq!(Answer::from_input(""), Some(Answer::Skipped));
        assert_eq!(Answer::from_input("  \n"), Some(Answer::Skipped));
        assert_eq!(Answer::from_input("12\n"), Some(Answer::Value(12)));
        assert_eq!(Answer::from_input("-3"), Some(Answer::Value(-3)));
        assert_eq!(Answer::from_input("twelve"), None);
        assert_eq!(Answer::from_input("1.5"), None);
    }

    #[test]
    fn operator_set_serde_uses_symbols() {
        let set = OperatorSet::parse("+/").unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["+","/"]"#);
        let back: OperatorSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(serde_json::from_str::<OperatorSet>("[]").is_err());
    }
}
