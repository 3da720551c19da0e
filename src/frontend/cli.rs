//! Terminal frontend
//!
//! Questions are printed as numbered lists. An empty answer picks the first
//! option, except for the first question where it cancels; `q` always
//! cancels. End of input cancels too.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use super::{ask_setup, Frontend, Prompter};
use crate::error::Result;
use crate::screen::{ScreenSetup, ScreenSituation};

pub const NAME: &str = "cli";

pub struct CliFrontend<R, W> {
    input: R,
    output: W,
    questions_asked: usize,
}

impl CliFrontend<BufReader<Stdin>, Stdout> {
    /// Terminal frontend; stdin is only locked while a line is being read
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> CliFrontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            questions_asked: 0,
        }
    }

    fn describe(&mut self, situation: &ScreenSituation) -> Result<()> {
        let internal = situation.internal_connector();
        writeln!(
            self.output,
            "Internal screen: {} ({})",
            internal.name,
            join(&internal.resolutions)
        )?;
        if let Some(external) = situation.external_connector() {
            writeln!(
                self.output,
                "External screen: {} ({})",
                external.name,
                join(&external.resolutions)
            )?;
        }
        Ok(())
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl<R: BufRead, W: Write> Prompter for CliFrontend<R, W> {
    fn choose(&mut self, question: &str, options: &[String]) -> Result<Option<usize>> {
        let first = self.questions_asked == 0;
        self.questions_asked += 1;

        writeln!(self.output, "{question}")?;
        for (idx, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", idx + 1, option)?;
        }

        loop {
            if first {
                write!(self.output, "Choice (q to cancel): ")?;
            } else {
                write!(self.output, "Choice [1] (q to cancel): ")?;
            }
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }
            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") || (first && answer.is_empty()) {
                return Ok(None);
            }
            if answer.is_empty() {
                return Ok(Some(0));
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}.",
                    options.len()
                )?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Frontend for CliFrontend<R, W> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn setup(&mut self, situation: &ScreenSituation) -> Result<Option<ScreenSetup>> {
        self.questions_asked = 0;
        self.describe(situation)?;
        ask_setup(self, situation)
    }

    fn error(&mut self, message: &str) {
        eprintln!("ERROR: {message}");
    }
}
