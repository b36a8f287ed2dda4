//! Interactive shell: reads lines, dispatches to the engine, formats output.

use crate::command::Command;
use crate::parser;
use std::io::{BufRead, Write};
use tkvs_core::{EngineResult, TransactionalStore};
use tracing::debug;

const PROMPT: &str = "> ";
const GREETING: &str = "Transactional Key-Value Store CLI";
const BYE: &str = "Bye!";
const KEY_NOT_SET: &str = "key not set";
const NO_INPUT: &str = "No input provided. Print 'q' or 'quit' to quit. 'h' or 'help' for help.";

const DOCS: &str = "\
Available commands:

SET <key> <value> // store the value for the key
GET <key>         // return the current value for the key
DELETE <key>      // remove the entry for the key
COUNT <value>     // return the number of keys that have the given value
BEGIN             // start a new transaction
COMMIT            // complete the current transaction
ROLLBACK          // revert to state prior to BEGIN call
";

/// Applies one command to the store, calling exactly one engine operation.
///
/// Returns the line to print, if any: `GET` yields the value or
/// "`key not set`", `COUNT` yields the number; mutations and transaction
/// commands print nothing on success.
///
/// # Errors
///
/// Propagates the engine error for `COMMIT`/`ROLLBACK` outside a
/// transaction.
pub fn dispatch(
    store: &mut dyn TransactionalStore,
    command: Command,
) -> EngineResult<Option<String>> {
    debug!(?command, "dispatching");
    match command {
        Command::Get { key } => Ok(Some(
            store
                .get(&key)
                .map_or_else(|| KEY_NOT_SET.to_owned(), ToOwned::to_owned),
        )),
        Command::Count { value } => Ok(Some(store.count(&value).to_string())),
        Command::Set { key, value } => {
            store.set(&key, &value);
            Ok(None)
        }
        Command::Delete { key } => {
            store.delete(&key);
            Ok(None)
        }
        Command::Begin => {
            store.begin();
            Ok(None)
        }
        Command::Commit => store.commit().map(|()| None),
        Command::Rollback => store.rollback().map(|()| None),
    }
}

/// Runs the interactive loop until end of input or a quit command.
///
/// The store is injected by the caller; the loop holds no global state.
/// Parse and engine errors are printed as one-line `Error: ...` messages
/// and the loop continues.
///
/// # Errors
///
/// Returns an error only when reading input or writing output fails.
pub fn run<R, W>(
    store: &mut dyn TransactionalStore,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{GREETING}")?;
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            writeln!(output, "{NO_INPUT}")?;
            continue;
        }
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            writeln!(output, "{BYE}")?;
            return Ok(());
        }
        if line.eq_ignore_ascii_case("h") || line.eq_ignore_ascii_case("help") {
            writeln!(output, "{DOCS}")?;
            continue;
        }

        let outcome = parser::parse(line).map_err(|e| e.to_string()).and_then(
            |command| match dispatch(store, command) {
                Ok(printed) => Ok(printed),
                Err(e) => Err(e.to_string()),
            },
        );
        match outcome {
            Ok(Some(printed)) => writeln!(output, "{printed}")?,
            Ok(None) => {}
            Err(message) => writeln!(output, "Error: {message}")?,
        }
    }
    writeln!(output, "{BYE}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tkvs_core::Strategy;

    fn run_session(lines: &str) -> String {
        let mut store = Strategy::ChangeLog.new_store();
        let mut output = Vec::new();
        run(store.as_mut(), lines.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn dispatch_get_unknown_key() {
        let mut store = Strategy::ChangeLog.new_store();
        let cmd = Command::Get {
            key: "missing".to_owned(),
        };
        assert_eq!(
            dispatch(store.as_mut(), cmd).unwrap(),
            Some("key not set".to_owned())
        );
    }

    #[test]
    fn dispatch_set_then_get_and_count() {
        let mut store = Strategy::ChangeLog.new_store();
        let set = Command::Set {
            key: "key".to_owned(),
            value: "value".to_owned(),
        };
        assert_eq!(dispatch(store.as_mut(), set).unwrap(), None);

        let get = Command::Get {
            key: "key".to_owned(),
        };
        assert_eq!(
            dispatch(store.as_mut(), get).unwrap(),
            Some("value".to_owned())
        );

        let count = Command::Count {
            value: "value".to_owned(),
        };
        assert_eq!(dispatch(store.as_mut(), count).unwrap(), Some("1".to_owned()));
    }

    #[test]
    fn dispatch_commit_without_transaction_propagates_error() {
        let mut store = Strategy::ChangeLog.new_store();
        assert!(dispatch(store.as_mut(), Command::Commit).is_err());
        assert!(dispatch(store.as_mut(), Command::Rollback).is_err());
    }

    #[test]
    fn session_set_get_count() {
        let output = run_session("SET foo 123\nGET foo\nCOUNT 123\nquit\n");
        assert!(output.contains("123"));
        assert!(output.contains("Bye!"));
    }

    #[test]
    fn session_rollback_scenario() {
        let output = run_session(
            "SET key value1\nBEGIN\nSET key value2\nROLLBACK\nGET key\nq\n",
        );
        assert!(output.contains("value1"));
    }

    #[test]
    fn session_reports_engine_errors_and_continues() {
        let output = run_session("COMMIT\nSET key value\nGET key\nquit\n");
        assert!(output.contains("Error: no transaction"));
        assert!(output.contains("value"));
        assert!(output.contains("Bye!"));
    }

    #[test]
    fn session_reports_parse_errors() {
        let output = run_session("FROB key\nGET missing\nq\n");
        assert!(output.contains("Error: unknown command: FROB"));
        assert!(output.contains("key not set"));
    }

    #[test]
    fn session_blank_line_prints_hint() {
        let output = run_session("\nquit\n");
        assert!(output.contains("No input provided"));
    }

    #[test]
    fn session_help_prints_docs_and_continues() {
        let output = run_session("help\nSET k v\nGET k\nq\n");
        assert!(output.contains("Available commands:"));
        assert!(output.contains("v\n"));
        assert!(output.contains("Bye!"));
    }

    #[test]
    fn session_end_of_input_says_goodbye() {
        let output = run_session("SET k v\n");
        assert!(output.ends_with("Bye!\n"));
    }
}
