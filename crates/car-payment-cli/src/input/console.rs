use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Words that end an interactive session from any prompt.
const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not convert '{value}' to {expected} for the {field}")]
    Format {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("input ended before the {field} was entered")]
    UnexpectedEof { field: &'static str },

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A prompted console field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub prompt: &'static str,
}

/// What came back from a single prompt.
#[derive(Debug, PartialEq)]
pub enum Reply<T> {
    Value(T),
    /// The user typed a quit word.
    Quit,
    /// The input stream reached end-of-file.
    Closed,
}

/// Numeric types that can be typed at a prompt.
pub trait ConsoleValue: Sized {
    /// Human description used in format errors.
    const EXPECTED: &'static str;

    fn parse_console(text: &str) -> Option<Self>;
}

impl ConsoleValue for Decimal {
    const EXPECTED: &'static str = "a number";

    fn parse_console(text: &str) -> Option<Self> {
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }
}

impl ConsoleValue for i64 {
    const EXPECTED: &'static str = "a whole number";

    fn parse_console(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

/// Line-oriented prompt/answer console over any reader and writer.
pub struct Console<R, W> {
    reader: R,
    writer: W,
    retry_invalid: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            retry_invalid: false,
        }
    }

    /// Re-prompt on unparseable answers instead of failing.
    pub fn retry_invalid(mut self, retry: bool) -> Self {
        self.retry_invalid = retry;
        self
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Show the field's prompt and read one answer.
    pub fn ask<T: ConsoleValue>(&mut self, field: &Field) -> Result<Reply<T>, InputError> {
        loop {
            write!(self.writer, "{}", field.prompt)?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(Reply::Closed);
            }

            let text = line.trim();
            if QUIT_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) {
                return Ok(Reply::Quit);
            }

            match T::parse_console(text) {
                Some(value) => return Ok(Reply::Value(value)),
                None if self.retry_invalid => {
                    writeln!(self.writer, "Invalid number '{text}', please try again.")?;
                }
                None => {
                    return Err(InputError::Format {
                        field: field.name,
                        expected: T::EXPECTED,
                        value: text.to_string(),
                    })
                }
            }
        }
    }
}
