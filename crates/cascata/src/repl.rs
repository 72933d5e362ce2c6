//! Interactive driver for an editing session: each command maps onto one
//! session operation, the way the surrounding form UI would call them.

use std::io::{self, Write};

use cascata_engine::error_mapping;
use cascata_engine::session::{EditSession, SessionError};
use cascata_engine::{Choice, DependentOptions};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  open                     open the session (hydrates from the record, if any)
  show                     print the current selection state
  parent <id>              select a parent by id (resolved against the loaded options)
  parent -                 clear the parent
  child <id>               select a child by id
  child -                  clear the child
  field <name> <value...>  set a sibling form field
  submit                   validate and submit
  close                    abandon the session
  help                     this text
  exit | quit              leave";

pub async fn run(session: &mut EditSession) -> anyhow::Result<()> {
    println!("Editing session ready. Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }
        execute_line(session, trimmed).await;
    }
    Ok(())
}

/// Run commands from a script file, one per line. Blank lines and `#`
/// comments are skipped.
pub async fn run_file(session: &mut EditSession, path: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        execute_line(session, trimmed).await;
    }
    Ok(())
}

async fn execute_line(session: &mut EditSession, line: &str) {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    let outcome: Result<String, String> = match command {
        "open" => session
            .open()
            .await
            .map(|_| "Session opened.".to_string())
            .map_err(|e| friendly_message(&e)),
        "show" => {
            print_state(session);
            Ok(String::new())
        }
        "parent" => select_parent(session, &rest)
            .await
            .map_err(|e| friendly_message(&e)),
        "child" => select_child(session, &rest).map_err(|e| friendly_message(&e)),
        "field" => Ok(set_field(session, &rest)),
        "submit" => session
            .submit()
            .await
            .map(|receipt| receipt.message)
            .map_err(|e| friendly_message(&e)),
        "close" => {
            session.close();
            Ok("Session closed.".to_string())
        }
        "help" => {
            println!("{HELP}");
            Ok(String::new())
        }
        other => Err(format!("Unknown command '{other}'; type 'help'")),
    };

    match outcome {
        Ok(message) if message.is_empty() => {}
        Ok(message) => println!("{message}"),
        Err(message) => println!("{message}"),
    }
}

async fn select_parent(
    session: &mut EditSession,
    args: &[&str],
) -> Result<String, SessionError> {
    let selection = match args {
        ["-"] => None,
        [id] => Some(resolve(session.parent_options(), id)),
        _ => return Ok("Usage: parent <id> | parent -".to_string()),
    };
    session.select_parent_and_load(selection).await?;
    Ok(match session.parent() {
        Some(choice) => format!(
            "Parent set to {choice}; {} dependent options loaded.",
            session.child_options().choices().len()
        ),
        None => "Parent cleared.".to_string(),
    })
}

fn select_child(session: &mut EditSession, args: &[&str]) -> Result<String, SessionError> {
    let selection = match args {
        ["-"] => None,
        [id] => Some(resolve(session.child_options(), id)),
        _ => return Ok("Usage: child <id> | child -".to_string()),
    };
    session.select_child(selection)?;
    Ok(match session.child() {
        Some(choice) => format!("Child set to {choice}."),
        None => "Child cleared.".to_string(),
    })
}

fn set_field(session: &mut EditSession, args: &[&str]) -> String {
    let [name, value @ ..] = args else {
        return "Usage: field <name> <value...>".to_string();
    };
    if value.is_empty() {
        return "Usage: field <name> <value...>".to_string();
    }
    session.set_field(*name, Value::String(value.join(" ")));
    format!("Field '{name}' set.")
}

/// Look the id up in the loaded options so the selection carries its label.
/// Ids not present in the list are still selectable; the engine keeps them
/// and flags them for re-selection, it never refuses them.
fn resolve(options: &DependentOptions, id: &str) -> Choice {
    options
        .choices()
        .iter()
        .find(|c| c.id.as_str() == id)
        .cloned()
        .unwrap_or_else(|| Choice::new(id, id))
}

fn print_state(session: &EditSession) {
    println!("mode: {:?}", session.mode());
    match session.parent() {
        Some(choice) => println!("parent: {choice}"),
        None => println!("parent: (unset)"),
    }
    match session.child() {
        Some(choice) if session.child_needs_reselection() => {
            println!("child: {choice} [not in the current options; re-select?]")
        }
        Some(choice) => println!("child: {choice}"),
        None => println!("child: (unset)"),
    }
    print_options("parent options", session.parent_options());
    print_options("child options", session.child_options());
    for (name, value) in session.fields() {
        println!("field {name}: {value}");
    }
}

fn print_options(level: &str, options: &DependentOptions) {
    match options {
        DependentOptions::Ready(choices) if choices.is_empty() => {
            println!("{level}: none available")
        }
        DependentOptions::Ready(choices) => {
            println!("{level}:");
            for choice in choices {
                println!("  - {choice}");
            }
        }
        DependentOptions::Loading => println!("{level}: loading..."),
        DependentOptions::Stale => println!("{level}: failed to load (retry the selection)"),
    }
}

fn friendly_message(err: &SessionError) -> String {
    match err {
        SessionError::SubmissionFailed(cause) => error_mapping::submit_failure_message(cause),
        SessionError::OptionFetchFailed { source, .. } => {
            error_mapping::load_failure_message(source)
        }
        other => other.to_string(),
    }
}

