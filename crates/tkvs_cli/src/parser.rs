//! Line parser for the textual command protocol.
//!
//! Translates one line of input into a [`Command`]. Malformed input is
//! rejected here and never reaches the engine.

use crate::command::Command;
use thiserror::Error;

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first word of the line is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A known command was given the wrong number of arguments.
    #[error("{0}")]
    WrongArgumentCount(&'static str),
}

const SET_USAGE: &str = "SET command requires 2 arguments: key and value";
const GET_USAGE: &str = "GET command requires 1 argument: key";
const DELETE_USAGE: &str = "DELETE command requires 1 argument: key";
const COUNT_USAGE: &str = "COUNT command requires 1 argument: value";
const BEGIN_USAGE: &str = "BEGIN command does not take any arguments";
const COMMIT_USAGE: &str = "COMMIT command does not take any arguments";
const ROLLBACK_USAGE: &str = "ROLLBACK command does not take any arguments";

/// Parses one line of input into a [`Command`].
///
/// The line is trimmed and split on whitespace into at most three fields,
/// so a `SET` value may itself contain spaces. The command word is
/// case-insensitive.
///
/// # Errors
///
/// Returns an error for an unknown command word or a wrong argument count.
pub fn parse(input: &str) -> Result<Command, ParseError> {
    let parts = split_fields(input);
    let command = parts.first().copied().unwrap_or("");
    let args = &parts[parts.len().min(1)..];
    match command.to_ascii_uppercase().as_str() {
        "SET" => match args {
            [key, value] => Ok(Command::Set {
                key: (*key).to_owned(),
                value: (*value).to_owned(),
            }),
            _ => Err(ParseError::WrongArgumentCount(SET_USAGE)),
        },
        "GET" => match args {
            [key] => Ok(Command::Get {
                key: (*key).to_owned(),
            }),
            _ => Err(ParseError::WrongArgumentCount(GET_USAGE)),
        },
        "DELETE" => match args {
            [key] => Ok(Command::Delete {
                key: (*key).to_owned(),
            }),
            _ => Err(ParseError::WrongArgumentCount(DELETE_USAGE)),
        },
        "COUNT" => match args {
            [value] => Ok(Command::Count {
                value: (*value).to_owned(),
            }),
            _ => Err(ParseError::WrongArgumentCount(COUNT_USAGE)),
        },
        "BEGIN" => match args {
            [] => Ok(Command::Begin),
            _ => Err(ParseError::WrongArgumentCount(BEGIN_USAGE)),
        },
        "COMMIT" => match args {
            [] => Ok(Command::Commit),
            _ => Err(ParseError::WrongArgumentCount(COMMIT_USAGE)),
        },
        "ROLLBACK" => match args {
            [] => Ok(Command::Rollback),
            _ => Err(ParseError::WrongArgumentCount(ROLLBACK_USAGE)),
        },
        other => Err(ParseError::UnknownCommand(other.to_owned())),
    }
}

/// Splits a trimmed line into at most three whitespace-separated fields,
/// leaving the third field unsplit so it may contain spaces.
fn split_fields(input: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(3);
    let mut rest = input.trim();
    while fields.len() < 2 {
        match rest.find(char::is_whitespace) {
            Some(idx) => {
                fields.push(&rest[..idx]);
                rest = rest[idx..].trim_start();
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        fields.push(rest);
    }
    fields
}
