//! Line-oriented input helpers that re-ask until the answer is valid.
//!
//! # Invariants
//! - Every helper blocks until it has a valid answer or input ends.
//! - End of input surfaces as `io::ErrorKind::UnexpectedEof`.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `prompt` and reads one line without its line terminator.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn int(&mut self, prompt: &str) -> io::Result<i64> {
        loop {
            if let Ok(value) = self.read_line(prompt)?.trim().parse() {
                return Ok(value);
            }
        }
    }

    pub fn int_in(&mut self, prompt: &str, range: RangeInclusive<i64>) -> io::Result<i64> {
        loop {
            let value = self.int(prompt)?;
            if range.contains(&value) {
                return Ok(value);
            }
        }
    }

    /// `y...` is yes, `n...` is no; anything else asks again.
    pub fn yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            match self.read_line(prompt)?.trim_start().chars().next() {
                Some('y' | 'Y') => return Ok(true),
                Some('n' | 'N') => return Ok(false),
                _ => {}
            }
        }
    }

    /// Full English month name, case-insensitive. Returns the 1-based month.
    pub fn month(&mut self, prompt: &str) -> io::Result<u32> {
        loop {
            let answer = self.read_line(prompt)?.trim().to_lowercase();
            if let Some(index) = MONTH_NAMES.iter().position(|name| *name == answer) {
                return Ok(index as u32 + 1);
            }
        }
    }

    /// Blocks until the user presses ENTER.
    pub fn pause(&mut self) -> io::Result<()> {
        self.read_line("\n(press ENTER to continue) ").map(drop)
    }
}
