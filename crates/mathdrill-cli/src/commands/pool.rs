//! The `mathdrill pool` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};

use mathdrill_core::pool::enumerate_all_questions;
use mathdrill_core::{Equation, OperatorSet, Pins};

pub fn execute(
    operators: Option<String>,
    first: Option<i32>,
    second: Option<i32>,
    list: bool,
) -> Result<()> {
    let allowed = match operators.as_deref() {
        Some(ops) => OperatorSet::parse(ops).context("invalid --operators")?,
        None => OperatorSet::default(),
    };
    let pins = Pins {
        operator: None,
        first: first.map(i64::from),
        second: second.map(i64::from),
    };
    let questions = enumerate_all_questions(&allowed, &pins);

    if list {
        for question in &questions {
            println!("{}", question.human_readable().trim_end());
        }
        println!();
    }
    println!("{}", pool_table(&allowed, &questions));
    Ok(())
}

/// Pool size per operator, then the total.
fn pool_table(allowed: &OperatorSet, questions: &[Equation]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Operator", "Questions"]);
    for op in allowed.iter() {
        let count = questions
            .iter()
            .filter(|eq| eq.operator == Some(op))
            .count();
        table.add_row(vec![
            Cell::new(op.display_symbol()).set_alignment(CellAlignment::Center),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(questions.len()).set_alignment(CellAlignment::Right),
    ]);
    table
}
