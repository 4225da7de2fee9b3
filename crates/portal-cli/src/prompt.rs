use portal_auth::Candidate;

use std::io::{self, BufRead, Write};

/// Line-oriented prompts. An empty line (or end of input) means "start over".
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one answer with the line ending stripped, nothing else.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim_end_matches(['\r', '\n']);
        if answer.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Lists candidates and returns the index picked, or `None` to give up.
    pub fn choose(&mut self, candidates: &[Candidate]) -> io::Result<Option<usize>> {
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, candidate.summary())?;
        }

        loop {
            let Some(answer) = self.ask("Select a number (empty to cancel)")? else {
                return Ok(None);
            };

            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => self.say(&format!(
                    "Enter a number between 1 and {}.",
                    candidates.len()
                ))?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
