//! Machine-readable session summary and the closing timing/percentage lines.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use mathdrill_core::{Equation, Operator, OperatorSet, Outcome, QuizSession};

/// Results of one finished (or abandoned) test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_secs: i64,
    pub operators: OperatorSet,
    pub right: usize,
    pub wrong: usize,
    pub skipped: usize,
    /// Percentage correct, 0-100.
    pub grade: f64,
    pub questions: Vec<QuestionRecord>,
}

/// One scored question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub operator: Operator,
    pub first: i64,
    pub second: i64,
    pub answer: Option<i64>,
    pub correct_answer: i64,
    pub outcome: Outcome,
}

impl QuestionRecord {
    fn from_equation(eq: &Equation, outcome: Outcome) -> Option<Self> {
        let (operator, first, second) = eq.parts()?;
        Some(Self {
            operator,
            first,
            second,
            answer: eq.answer.value(),
            correct_answer: eq.correct_answer()?,
            outcome,
        })
    }
}

impl SessionSummary {
    pub fn from_session<R: Rng>(
        session: &QuizSession<R>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let buckets = [
            (session.right(), Outcome::Right),
            (session.wrong(), Outcome::Wrong),
            (session.skipped(), Outcome::Skipped),
        ];
        let questions = buckets
            .iter()
            .flat_map(|(eqs, outcome)| {
                eqs.iter()
                    .filter_map(move |eq| QuestionRecord::from_equation(eq, *outcome))
            })
            .collect();

        Self {
            started_at,
            finished_at,
            duration_secs: (finished_at - started_at).num_seconds().max(0),
            operators: session.allowed_operators().clone(),
            right: session.right().len(),
            wrong: session.wrong().len(),
            skipped: session.skipped().len(),
            grade: session.grade(),
            questions,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize session summary")
    }

    /// The two closing lines of a text run.
    pub fn footer(&self) -> String {
        format!(
            "Total time was:  {}\nPercentage:      {:0.2}%",
            format_elapsed(self.duration_secs),
            self.grade
        )
    }
}

/// `m:ss`, minutes unbounded.
pub fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:0>2}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mathdrill_core::{Answer, Pins};

    fn played_session() -> QuizSession {
        let mut session = QuizSession::seeded(OperatorSet::default(), 9);
        let cases = [
            (Operator::Add, 5, 3, Answer::Value(8)),
            (Operator::Multiply, 4, 5, Answer::Skipped),
            (Operator::Subtract, 9, 4, Answer::Value(4)),
        ];
        for (op, a, b, answer) in cases {
            session
                .next_random_question(&Pins {
                    operator: Some(op),
                    first: Some(a),
                    second: Some(b),
                })
                .unwrap();
            session.submit_answer(answer).unwrap();
            session.score();
        }
        session
    }

    #[test]
    fn elapsed_is_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(3600), "60:00");
        assert_eq!(format_elapsed(-4), "0:00");
    }

    #[test]
    fn summary_counts_buckets() {
        let session = played_session();
        let start = Utc::now();
        let summary = SessionSummary::from_session(&session, start, start + Duration::seconds(75));
        assert_eq!((summary.right, summary.wrong, summary.skipped), (1, 1, 1));
        assert_eq!(summary.questions.len(), 3);
        assert_eq!(summary.questions[1].outcome, Outcome::Wrong);
        assert_eq!(summary.questions[1].correct_answer, 5);
        assert_eq!(summary.questions[2].answer, None);
        assert_eq!(summary.duration_secs, 75);
        assert!(summary.footer().contains("Total time was:  1:15"));
        assert!(summary.footer().contains("Percentage:      33.33%"));
    }

    #[test]
    fn summary_json_uses_operator_symbols() {
        let session = played_session();
        let now = Utc::now();
        let json = SessionSummary::from_session(&session, now, now).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["questions"][0]["operator"], "+");
        assert_eq!(value["questions"][0]["outcome"], "right");
        assert_eq!(value["right"], 1);
    }
}
