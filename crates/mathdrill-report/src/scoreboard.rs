//! Text scoreboard.
//!
//! Lays archived equations out in vertical columns, five per row by default:
//!
//! ```text
//!   7   12
//! + 5  × 3
//! ---  ---
//!  12   36
//! ```
//!
//! When any answer in the list is wrong, each row gets a line of correct
//! answers underneath:
//!
//! ```text
//!   7   12
//! + 5  × 3
//! ---  ---
//!  12   35
//! (12)  (36)
//! ```

use std::fmt;

use comfy_table::{Cell, CellAlignment, Table};
use rand::Rng;

use mathdrill_core::{Answer, Equation, QuizSession};

/// Horizontal rule printed above the scoreboard.
pub const RULE_WIDTH: usize = 80;

/// A borrowed view of a session's results, ready to print.
#[derive(Debug, Clone, Copy)]
pub struct Scoreboard<'a> {
    pub right: &'a [Equation],
    pub wrong: &'a [Equation],
    pub skipped: &'a [Equation],
    pub columns: usize,
}

impl<'a> Scoreboard<'a> {
    pub fn from_session<R: Rng>(session: &'a QuizSession<R>, columns: usize) -> Self {
        Self {
            right: session.right(),
            wrong: session.wrong(),
            skipped: session.skipped(),
            columns,
        }
    }

    /// Counts table; the skipped column only appears when something was skipped.
    pub fn counts_table(&self) -> Table {
        let mut header = vec!["Right", "Wrong"];
        let mut row = vec![self.right.len(), self.wrong.len()];
        if !self.skipped.is_empty() {
            header.push("Skipped");
            row.push(self.skipped.len());
        }

        let mut table = Table::new();
        table.set_header(header);
        table.add_row(
            row.into_iter()
                .map(|n| Cell::new(n).set_alignment(CellAlignment::Center)),
        );
        table
    }
}

impl fmt::Display for Scoreboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "{}", self.counts_table())?;
        writeln!(f)?;
        writeln!(f, "Correct Answers:\n")?;
        writeln!(f, "{}", render_rows(self.right, self.columns))?;
        writeln!(f, "Wrong Answers:\n")?;
        writeln!(f, "{}", render_rows(self.wrong, self.columns))?;
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped:\n")?;
            writeln!(f, "{}", render_rows(self.skipped, self.columns))?;
        }
        Ok(())
    }
}

/// Render equations in rows of at most `columns`.
///
/// A line of correct answers is added under each row when any equation in
/// the list was not answered correctly.
pub fn render_rows(equations: &[Equation], columns: usize) -> String {
    if equations.is_empty() {
        return "None\n".to_string();
    }
    let show_correct = equations.iter().any(|eq| !eq.is_correct(eq.answer));

    let mut out = String::new();
    for chunk in equations.chunks(columns.max(1)) {
        push_line(&mut out, chunk, |eq| format!("{:>3}", operand(eq.first)));
        push_line(&mut out, chunk, |eq| {
            let op = eq.operator.map(|op| op.display_symbol()).unwrap_or(' ');
            format!("{op}{:>2}", operand(eq.second))
        });
        push_line(&mut out, chunk, |_| "---".to_string());
        push_line(&mut out, chunk, |eq| match eq.answer {
            Answer::Value(v) => format!("{v:>3}"),
            Answer::Unanswered | Answer::Skipped => "   ".to_string(),
        });
        if show_correct {
            push_line(&mut out, chunk, |eq| {
                format!("({:>2})", operand(eq.correct_answer()))
            });
        }
    }
    out
}

fn push_line(out: &mut String, chunk: &[Equation], cell: impl Fn(&Equation) -> String) {
    let line = chunk.iter().map(cell).collect::<Vec<_>>().join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn operand(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
