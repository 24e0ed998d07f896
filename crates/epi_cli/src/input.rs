//! Raw input handling: everything a user types is resolved to a finite,
//! in-range number here before it reaches the engine.

use std::io::{self, BufRead, Write};

/// Lower bound a numeric field must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldBound {
    NonNegative,
    AtLeast(f64),
}

impl FieldBound {
    fn check(&self, value: f64) -> Result<f64, String> {
        match *self {
            FieldBound::NonNegative if value < 0.0 => {
                Err("Value cannot be negative.".to_string())
            }
            FieldBound::AtLeast(min) if value < min => {
                Err(format!("Value must be at least {}.", min))
            }
            _ => Ok(value),
        }
    }
}

/// Parse user text into a bounded finite number.
pub fn parse_number(text: &str, bound: FieldBound) -> Result<f64, String> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| "Enter a valid number.".to_string())?;
    if !value.is_finite() {
        return Err("Enter a valid number.".to_string());
    }
    bound.check(value)
}

/// clap value parser for non-negative counts
pub fn non_negative(text: &str) -> Result<f64, String> {
    parse_number(text, FieldBound::NonNegative)
}

/// clap value parser for incidence multipliers
pub fn multiplier(text: &str) -> Result<f64, String> {
    parse_number(text, FieldBound::AtLeast(1.0))
}

/// Line-oriented prompts over any reader/writer pair.
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

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `message` and read one line. `None` at end of input.
    pub fn read_line(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Prompt until the answer parses within `bound`. `None` at end of input.
    pub fn read_number(&mut self, message: &str, bound: FieldBound) -> io::Result<Option<f64>> {
        loop {
            let Some(line) = self.read_line(message)? else {
                return Ok(None);
            };
            match parse_number(&line, bound) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => writeln!(self.output, "{}", reason)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 42 ", FieldBound::NonNegative), Ok(42.0));
        assert_eq!(parse_number("0", FieldBound::NonNegative), Ok(0.0));
        assert!(parse_number("abc", FieldBound::NonNegative).is_err());
        assert!(parse_number("-1", FieldBound::NonNegative).is_err());
        assert!(parse_number("NaN", FieldBound::NonNegative).is_err());
        assert!(parse_number("inf", FieldBound::NonNegative).is_err());
        assert!(multiplier("0.5").is_err());
        assert_eq!(multiplier("100000"), Ok(100000.0));
    }

    #[test]
    fn test_read_number_reprompts() {
        let input = Cursor::new("ten\n-3\n10\n");
        let mut prompter = Prompter::new(input, Vec::new());

        let value = prompter
            .read_number("Cases: ", FieldBound::NonNegative)
            .unwrap();
        assert_eq!(value, Some(10.0));

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(
            output,
            "Cases: Enter a valid number.\nCases: Value cannot be negative.\nCases: "
        );
    }

    #[test]
    fn test_read_number_end_of_input() {
        let mut prompter = Prompter::new(Cursor::new("oops\n"), Vec::new());
        let value = prompter
            .read_number("Cases: ", FieldBound::NonNegative)
            .unwrap();
        assert_eq!(value, None);
    }
}
