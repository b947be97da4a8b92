//! Quiz session state: the active question, the scored buckets, and the
//! retry workflow.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::equation::Equation;
use crate::error::{DrillError, Result};
use crate::model::{Answer, OperatorSet, Outcome, Pins};
use crate::pool::{enumerate_all_questions, QuestionPool};

/// One user's test: the question being asked and every question scored so far.
///
/// A question moves `Empty -> Generated -> Answered -> Archived`, after which
/// `current` is empty again. Archived questions are copies, so nothing done
/// to `current` later can change the history.
#[derive(Debug)]
pub struct QuizSession<R = StdRng> {
    right: Vec<Equation>,
    wrong: Vec<Equation>,
    skip: Vec<Equation>,
    allowed: OperatorSet,
    current: Equation,
    pool: QuestionPool,
    rng: R,
}

impl QuizSession<StdRng> {
    /// A session seeded from the operating system.
    pub fn new(allowed: OperatorSet) -> Self {
        Self::with_rng(allowed, StdRng::from_entropy())
    }

    /// A session whose questions are reproducible for a given seed.
    pub fn seeded(allowed: OperatorSet, seed: u64) -> Self {
        Self::with_rng(allowed, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(allowed: OperatorSet, rng: R) -> Self {
        Self {
            right: Vec::new(),
            wrong: Vec::new(),
            skip: Vec::new(),
            allowed,
            current: Equation::empty(),
            pool: QuestionPool::new(),
            rng,
        }
    }

    /// Replace the enabled operators with the valid entries of `operators`.
    ///
    /// Fails with [`DrillError::NoValidOperators`] and leaves the session
    /// untouched if no entry is valid.
    pub fn set_allowed_operators<I, S>(&mut self, operators: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = OperatorSet::filter_valid(operators)?;
        if allowed != self.allowed {
            self.pool.clear();
        }
        self.allowed = allowed;
        Ok(())
    }

    pub fn allowed_operators(&self) -> &OperatorSet {
        &self.allowed
    }

    /// Generate a fresh random question into `current`.
    pub fn next_random_question(&mut self, pins: &Pins) -> Result<&Equation> {
        self.ensure_scored()?;
        self.current = Equation::generate(&mut self.rng, &self.allowed, pins)?;
        Ok(&self.current)
    }

    /// Draw the next question from the unique pool into `current`.
    ///
    /// No question repeats until every question for the enabled operators
    /// and pins has been asked; then the pool starts over.
    pub fn next_unique_question(&mut self, pins: &Pins) -> Result<&Equation> {
        self.ensure_scored()?;
        if let Some(op) = pins.operator {
            if !self.allowed.contains(op) {
                return Err(DrillError::InvalidOperator(format!(
                    "{op} is not enabled (enabled: {})",
                    self.allowed
                )));
            }
        }
        let question = self
            .pool
            .draw(&mut self.rng, &self.allowed, pins)
            .ok_or(DrillError::EmptyQuestionPool)?;
        tracing::debug!(question = %question, remaining = self.pool.remaining(), "drew unique question");
        self.current = question;
        Ok(&self.current)
    }

    /// Every question the unique pool would contain for `pins`.
    pub fn enumerate_all_questions(&self, pins: &Pins) -> Vec<Equation> {
        enumerate_all_questions(&self.allowed, pins)
    }

    pub fn pool_remaining(&self) -> usize {
        self.pool.remaining()
    }

    fn ensure_scored(&self) -> Result<()> {
        if self.current.is_answered() {
            return Err(DrillError::QuestionPending);
        }
        Ok(())
    }

    pub fn current(&self) -> &Equation {
        &self.current
    }

    /// Record the user's answer to the current question.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<()> {
        if !self.current.is_complete(&self.allowed) || self.current.correct_answer().is_none() {
            return Err(DrillError::NoActiveQuestion);
        }
        self.current.answer = answer;
        Ok(())
    }

    /// File the current question under right, wrong, or skipped and clear it.
    ///
    /// Does nothing and returns `None` when no answer is pending, so calling
    /// it twice in a row has no further effect.
    pub fn score(&mut self) -> Option<Outcome> {
        let outcome = match self.current.answer {
            Answer::Unanswered => return None,
            Answer::Skipped => Outcome::Skipped,
            answer if self.current.is_correct(answer) => Outcome::Right,
            Answer::Value(_) => Outcome::Wrong,
        };
        let archived = self.current.clone();
        tracing::debug!(question = %archived, answer = %archived.answer, %outcome, "scored");
        match outcome {
            Outcome::Right => self.right.push(archived),
            Outcome::Wrong => self.wrong.push(archived),
            Outcome::Skipped => self.skip.push(archived),
        }
        self.current.reset();
        Some(outcome)
    }

    /// Stop mid-question: file the current question by what the user gave
    /// (skipped if nothing) so the grade still counts it.
    pub fn abandon(&mut self) -> Option<Outcome> {
        if !self.current.is_complete(&self.allowed) {
            self.current.reset();
            return None;
        }
        if !self.current.is_answered() {
            self.current.answer = Answer::Skipped;
        }
        self.score()
    }

    /// Move the oldest skipped question back into `current` for another try.
    pub fn requeue_skipped(&mut self) -> Result<Option<&Equation>> {
        self.requeue(Outcome::Skipped)
    }

    /// Move the oldest wrong question back into `current` for another try.
    pub fn requeue_wrong(&mut self) -> Result<Option<&Equation>> {
        self.requeue(Outcome::Wrong)
    }

    fn requeue(&mut self, from: Outcome) -> Result<Option<&Equation>> {
        self.ensure_scored()?;
        let bucket = match from {
            Outcome::Right => &mut self.right,
            Outcome::Wrong => &mut self.wrong,
            Outcome::Skipped => &mut self.skip,
        };
        if bucket.is_empty() {
            return Ok(None);
        }
        let mut question = bucket.remove(0);
        question.answer = Answer::Unanswered;
        self.current = question;
        Ok(Some(&self.current))
    }

    /// Drain skipped questions into wrong, oldest first.
    pub fn move_skipped_to_wrong(&mut self) {
        self.wrong.append(&mut self.skip);
    }

    /// Percentage of scored questions answered correctly; 0 before any.
    pub fn grade(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.right.len() as f64 / total as f64 * 100.0
    }

    pub fn total(&self) -> usize {
        self.right.len() + self.wrong.len() + self.skip.len()
    }

    pub fn right(&self) -> &[Equation] {
        &self.right
    }

    pub fn wrong(&self) -> &[Equation] {
        &self.wrong
    }

    pub fn skipped(&self) -> &[Equation] {
        &self.skip
    }

    /// Clear every bucket, the current question, and the unique pool.
    pub fn reset(&mut self) {
        self.right.clear();
        self.wrong.clear();
        self.skip.clear();
        self.current.reset();
        self.pool.clear();
    }
}
