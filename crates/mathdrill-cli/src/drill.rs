//! The console test loop: new questions, skipped replay, wrong retry.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;

use mathdrill_core::{DrillError, Equation, Outcome, QuizSession, RunSettings};

use crate::console::{Console, Input};

/// Attempts at drawing a question before a division-by-zero pin is fatal.
const MAX_GENERATION_ATTEMPTS: usize = 32;

/// How a test ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Finished,
    Quit,
}

/// Drive one test over `console`, leaving the results in `session`.
pub fn run_test<R, I, O>(
    session: &mut QuizSession<R>,
    settings: &RunSettings,
    console: &mut Console<I, O>,
) -> Result<Completion>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    for _ in 0..settings.question_count {
        let question = next_question(session, settings)?;
        if ask(session, console, &question, settings.visualize)? == Completion::Quit {
            return Ok(Completion::Quit);
        }
    }

    if replay_skipped(session, settings, console)? == Completion::Quit {
        return Ok(Completion::Quit);
    }

    if settings.retry_wrong && !session.wrong().is_empty() {
        console.say("Retrying the questions you got wrong!")?;
        loop {
            let retry = match session.requeue_wrong()? {
                Some(eq) => eq.clone(),
                None => match session.requeue_skipped()? {
                    Some(eq) => eq.clone(),
                    None => break,
                },
            };
            if ask(session, console, &retry, true)? == Completion::Quit {
                return Ok(Completion::Quit);
            }
        }
    }

    Ok(Completion::Finished)
}

/// Give every skipped question one more try, then count what is still
/// skipped as wrong.
fn replay_skipped<R, I, O>(
    session: &mut QuizSession<R>,
    settings: &RunSettings,
    console: &mut Console<I, O>,
) -> Result<Completion>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let pending = session.skipped().len();
    if pending == 0 {
        return Ok(Completion::Finished);
    }
    console.say("Returned to skipped questions!")?;
    for _ in 0..pending {
        let Some(question) = session.requeue_skipped()?.cloned() else {
            break;
        };
        console.say("Skipped\n-------")?;
        if ask(session, console, &question, settings.visualize)? == Completion::Quit {
            return Ok(Completion::Quit);
        }
    }
    session.move_skipped_to_wrong();
    Ok(Completion::Finished)
}

fn next_question<R: Rng>(session: &mut QuizSession<R>, settings: &RunSettings) -> Result<Equation> {
    let mut last_error = None;
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let drawn = if settings.unique {
            session.next_unique_question(&settings.pins)
        } else {
            session.next_random_question(&settings.pins)
        };
        match drawn {
            Ok(eq) => return Ok(eq.clone()),
            Err(e) if e.is_retryable() => {
                tracing::debug!("regenerating question: {e}");
                last_error = Some(e);
            }
            Err(e) => return Err(e).context("failed to generate a question"),
        }
    }
    Err(last_error.unwrap_or(DrillError::DivisionByZero))
        .context("pinned operands never produced a valid question")
}

/// Ask `question` (already the session's current question) and score it.
fn ask<R, I, O>(
    session: &mut QuizSession<R>,
    console: &mut Console<I, O>,
    question: &Equation,
    visualize: bool,
) -> Result<Completion>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let answer = match console.ask_answer(question, visualize)? {
        Input::Answer(answer) => answer,
        Input::Quit => {
            session.abandon();
            return Ok(Completion::Quit);
        }
    };
    session.submit_answer(answer)?;
    let feedback = match session.score() {
        Some(Outcome::Right) => "Correct!\n".to_string(),
        Some(Outcome::Skipped) => "Skipped!\n".to_string(),
        Some(Outcome::Wrong) => format!(
            "Wrong! ({})\n",
            question.correct_answer().unwrap_or_default()
        ),
        None => return Ok(Completion::Finished),
    };
    console.say(&feedback)?;
    Ok(Completion::Finished)
}
