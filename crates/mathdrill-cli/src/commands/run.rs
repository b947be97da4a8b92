//! The `mathdrill run` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, ValueEnum};

use mathdrill_core::{load_config_from, DrillConfig, Operator, QuizSession};
use mathdrill_report::{Scoreboard, SessionSummary};

use crate::console::Console;
use crate::drill::{self, Completion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Operators to ask: one character pins it (e.g. "*"), several choose among them (e.g. "+-")
    #[arg(short, long)]
    pub operator: Option<String>,

    /// Number of new questions
    #[arg(short, long)]
    pub questions: Option<u32>,

    /// Equations per scoreboard row
    #[arg(short, long)]
    pub columns: Option<usize>,

    /// Pin the first operand
    #[arg(short, long, allow_negative_numbers = true)]
    pub first: Option<i32>,

    /// Pin the second operand
    #[arg(short, long, allow_negative_numbers = true)]
    pub second: Option<i32>,

    /// Never repeat a question until every possible one has been asked
    #[arg(long)]
    pub unique: bool,

    /// Draw a picture of each question
    #[arg(long)]
    pub visualize: bool,

    /// Keep re-asking wrong answers until they are all right
    #[arg(long)]
    pub retry_wrong: bool,

    /// Choose operators and question count at prompts
    #[arg(short, long)]
    pub interactive: bool,

    /// Seed for reproducible questions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Result format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    /// Command-line values win over the config file.
    fn apply_to(&self, config: &mut DrillConfig) {
        if let Some(ops) = &self.operator {
            if ops.chars().count() == 1 {
                config.operator = Some(ops.clone());
                config.operators = None;
            } else {
                config.operators = Some(ops.clone());
                config.operator = None;
            }
        }
        if let Some(n) = self.questions {
            config.question_count = n;
        }
        if let Some(n) = self.columns {
            config.columns = n;
        }
        if self.first.is_some() {
            config.first_operand = self.first;
        }
        if self.second.is_some() {
            config.second_operand = self.second;
        }
        config.unique |= self.unique;
        config.visualize |= self.visualize;
        config.retry_wrong |= self.retry_wrong;
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    args.apply_to(&mut config);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    if args.interactive && !choose_options(&mut console, &mut config, Prompts::for_args(&args))? {
        return Ok(());
    }

    let settings = config.resolve().context("invalid drill options")?;
    tracing::info!(
        operators = %settings.operators,
        questions = settings.question_count,
        unique = settings.unique,
        "starting test"
    );

    let mut session = match args.seed {
        Some(seed) => QuizSession::seeded(settings.operators.clone(), seed),
        None => QuizSession::new(settings.operators.clone()),
    };

    let started_at = Utc::now();
    let completion = drill::run_test(&mut session, &settings, &mut console)?;
    let summary = SessionSummary::from_session(&session, started_at, Utc::now());
    if completion == Completion::Quit {
        tracing::info!(scored = session.total(), "test ended early");
    }

    match args.format {
        OutputFormat::Text => {
            console.say(&Scoreboard::from_session(&session, settings.columns).to_string())?;
            console.say(&summary.footer())?;
        }
        OutputFormat::Json => console.say(&summary.to_json()?)?,
    }
    Ok(())
}

/// Which interactive prompts to show; values given as flags are not asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Prompts {
    operators: bool,
    count: bool,
}

impl Prompts {
    fn for_args(args: &RunArgs) -> Self {
        Self {
            operators: args.operator.is_none(),
            count: args.questions.is_none(),
        }
    }
}

/// Ask which operators to drill and how many questions.
///
/// Returns `false` if input ended before every prompt was answered.
fn choose_options<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    config: &mut DrillConfig,
    prompts: Prompts,
) -> Result<bool> {
    if prompts.operators {
        let Some(chosen) = choose_operators(console)? else {
            return Ok(false);
        };
        let keeps_pin = config
            .operator
            .as_deref()
            .and_then(|op| op.chars().next())
            .is_some_and(|c| chosen.contains(c));
        if !keeps_pin {
            config.operator = None;
        }
        config.operators = Some(chosen);
    }

    if prompts.count {
        let Some(count) = console
            .ask_count("How many questions would you like on the test?", config.question_count)?
        else {
            return Ok(false);
        };
        config.question_count = count;
    }
    Ok(true)
}

/// Y/N for each operator until at least one is chosen. `None` at end of input.
fn choose_operators<I: BufRead, O: Write>(console: &mut Console<I, O>) -> Result<Option<String>> {
    loop {
        let mut chosen = String::new();
        for op in Operator::ALL {
            let Some(yes) = console.ask_yes_no(&format!("Would you like to do {}?", op.name()))?
            else {
                return Ok(None);
            };
            if yes {
                chosen.push(op.symbol());
            }
        }
        if !chosen.is_empty() {
            return Ok(Some(chosen));
        }
        console.say("You didn't select any operators!  Try again...")?;
    }
}
