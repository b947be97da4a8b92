//! Line-oriented prompts over any reader/writer pair.

use std::io::{self, BufRead, Write};

use mathdrill_core::{Answer, Equation};

/// What the user typed at an answer prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Answer(Answer),
    /// End of input, or `q`.
    Quit,
}

/// Prompts the user and reads their replies.
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Read one line, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show a question and read an answer.
    ///
    /// A blank line skips the question. Anything that is not an integer is
    /// rejected and asked again without touching the session.
    pub fn ask_answer(&mut self, question: &Equation, visualize: bool) -> io::Result<Input> {
        if visualize {
            for line in question.visualization_lines() {
                writeln!(self.output, "{line}")?;
            }
            writeln!(self.output)?;
        }
        loop {
            write!(self.output, "{}", question.human_readable())?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(Input::Quit);
            };
            if line.eq_ignore_ascii_case("q") {
                return Ok(Input::Quit);
            }
            match Answer::from_input(&line) {
                Some(answer) => return Ok(Input::Answer(answer)),
                None => writeln!(self.output, "Invalid answer: Try again!")?,
            }
        }
    }

    /// Ask a Y/N question; a blank reply means no. `None` at end of input.
    pub fn ask_yes_no(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        loop {
            write!(self.output, "{prompt} (Y/N)>")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" | "" => return Ok(Some(false)),
                _ => continue,
            }
        }
    }

    /// Ask for a count greater than zero; a blank reply takes `default`.
    pub fn ask_count(&mut self, prompt: &str, default: u32) -> io::Result<Option<u32>> {
        loop {
            write!(self.output, "{prompt}>")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() {
                writeln!(self.output, "Using default of {default} questions.")?;
                return Ok(Some(default));
            }
            match line.parse::<u32>() {
                Ok(n) if n > 0 => return Ok(Some(n)),
                _ => writeln!(
                    self.output,
                    "Invalid input! Please enter a number greater than 0."
                )?,
            }
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &O {
        &self.output
    }
}
