//! Line-oriented prompt helpers over any reader/writer pair.
//!
//! # Invariants
//! - Every prompt label is flushed before blocking on input.
//! - End of input surfaces as `ConsoleError::EndOfInput`, never as an empty line.
//! - Bytes that are not UTF-8 are decoded lossily; they never end the session.
//! - Text values keep their inner and edge whitespace; only the line ending is cut.
//! - Malformed numbers are re-prompted in place until a valid value arrives.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug)]
pub enum ConsoleError {
    Io(io::Error),
    /// Input stream closed while a value was expected.
    EndOfInput,
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console i/o failed: {err}"),
            Self::EndOfInput => write!(f, "input closed"),
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::EndOfInput => None,
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

const INVALID_NUMBER: &str = "Invalid input. Please enter a number: ";
const INVALID_COST: &str = "Invalid input. Please enter a non-negative amount: ";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one full line.
    pub fn say(&mut self, line: impl Display) -> ConsoleResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Writes `label` without a newline and flushes it.
    pub fn ask(&mut self, label: &str) -> ConsoleResult<()> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Asks for a free-text value, returned without its line ending.
    pub fn prompt_text(&mut self, label: &str) -> ConsoleResult<String> {
        self.ask(label)?;
        self.read_line()
    }

    pub fn prompt_number<T: FromStr>(&mut self, label: &str) -> ConsoleResult<T> {
        self.ask(label)?;
        self.read_number()
    }

    /// Reads a number, re-prompting until the line parses as `T`.
    pub fn read_number<T: FromStr>(&mut self) -> ConsoleResult<T> {
        loop {
            let line = self.read_line()?;
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.ask(INVALID_NUMBER)?,
            }
        }
    }

    /// Asks for a unit price: finite and non-negative.
    pub fn prompt_cost(&mut self, label: &str) -> ConsoleResult<f64> {
        self.ask(label)?;
        loop {
            let line = self.read_line()?;
            match line.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => return Ok(value),
                _ => self.ask(INVALID_COST)?,
            }
        }
    }

    fn read_line(&mut self) -> ConsoleResult<String> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleError, Prompter};

    #[test]
    fn read_number_reprompts_until_valid() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new("abc\n\n7\n".as_bytes(), &mut out);

        let value: u32 = prompter.prompt_number("Qty: ").unwrap();
        assert_eq!(value, 7);
        drop(prompter);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Qty: Invalid input. Please enter a number: Invalid input. Please enter a number: "
        );
    }

    #[test]
    fn negative_quantity_is_not_a_valid_u32() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new("-3\n3\n".as_bytes(), &mut out);

        assert_eq!(prompter.prompt_number::<u32>("").unwrap(), 3);
    }

    #[test]
    fn prompt_cost_rejects_negative_and_non_finite_values() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new("-1\ninf\nNaN\n2.50\n".as_bytes(), &mut out);

        assert_eq!(prompter.prompt_cost("Cost: ").unwrap(), 2.5);
        drop(prompter);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("non-negative amount").count(), 3);
    }

    #[test]
    fn prompt_text_strips_only_the_line_ending() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new("  Widget \r\nlast".as_bytes(), &mut out);

        assert_eq!(prompter.prompt_text("Name: ").unwrap(), "  Widget ");
        assert_eq!(prompter.prompt_text("Name: ").unwrap(), "last");
    }

    #[test]
    fn non_utf8_number_line_is_reprompted() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(&b"\xff\xfe\n12\n"[..], &mut out);

        assert_eq!(prompter.prompt_number::<u32>("Qty: ").unwrap(), 12);
        drop(prompter);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Qty: Invalid input. Please enter a number: ");
    }

    #[test]
    fn closed_input_is_reported() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new("".as_bytes(), &mut out);

        let err = prompter.prompt_text("Name: ").unwrap_err();
        assert!(matches!(err, ConsoleError::EndOfInput));
    }
}
