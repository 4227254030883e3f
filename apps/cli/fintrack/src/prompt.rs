//! Line-based terminal input for passwords, confirmations and the browse loop.

use crate::error::FintrackError;

use common::{ErrorLocation, RedactedSecret};

use std::io::Write;
use std::panic::Location;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads answers line by line; prompts go to stderr so stdout stays clean
/// for command output.
pub struct Prompt<R> {
    lines: Lines<R>,
}

impl Prompt<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines() }
    }

    /// Next line with the trailing newline removed; `None` at end of input.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>, FintrackError> {
        eprint!("{question}");
        // Prompt text is cosmetic; a failed flush must not abort the command
        let _ = std::io::stderr().flush();

        self.lines.next_line().await.map_err(|e| FintrackError::Fintrack {
            message: format!("Failed to read input: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Password entry. The terminal still echoes the input.
    pub async fn secret(&mut self, question: &str) -> Result<RedactedSecret, FintrackError> {
        match self.ask(question).await? {
            Some(line) => Ok(RedactedSecret::new(line)),
            None => Err(FintrackError::InvalidInput {
                message: String::from("Password is required"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Yes/no question defaulting to no.
    pub async fn confirm(&mut self, question: &str) -> Result<bool, FintrackError> {
        let answer = self.ask(&format!("{question} [y/N] ")).await?;
        Ok(matches!(
            answer.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }
}
