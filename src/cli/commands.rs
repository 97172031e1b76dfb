//! CLI command implementations
//!
//! `run` parses flags, configures logging and hands a validated [`Request`]
//! to `perform`. `perform` owns the mapping from store outcomes back to the
//! bytes the user sees:
//!
//! | operation | outcome      | output                                |
//! |-----------|--------------|---------------------------------------|
//! | list      | payload      | raw file bytes                        |
//! | add       | payload      | whole store after the append          |
//! | add       | conflict     | `Item with id <id> already exists`    |
//! | remove    | payload      | whole store after the removal         |
//! | remove    | not found    | `Item with id <id> not found`         |
//! | findById  | payload      | the record                            |
//! | findById  | not found    | nothing                               |

use std::io::{self, Write};

use super::args::Cli;
use super::config::{resolve_log_level, Operation, Request, LOG_ENV};
use super::errors::CliResult;
use super::io::write_output;
use crate::observability::{Logger, OperationScope};
use crate::store::{Outcome, RecordStore, StoreResult};

/// Parse process arguments and run the requested operation against stdout
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_with(&cli, &mut io::stdout().lock())
}

/// Configure logging from `cli`, validate it and perform the request
pub fn run_with<W: Write>(cli: &Cli, writer: &mut W) -> CliResult<()> {
    let env_level = std::env::var(LOG_ENV).ok();
    Logger::set_threshold(resolve_log_level(cli.log_level, env_level.as_deref())?);

    let request = Request::from_cli(cli)?;
    perform(&request, writer)
}

/// Execute a validated request and write its output to `writer`
pub fn perform<W: Write>(request: &Request, writer: &mut W) -> CliResult<()> {
    let operation = request.operation();
    let store = RecordStore::open(request.path());
    let scope = OperationScope::new(operation.as_str(), &store.path().display().to_string());

    let outcome = match execute(&store, request) {
        Ok(outcome) => outcome,
        Err(e) => {
            scope.fail(&e.to_string());
            return Err(e.into());
        }
    };

    scope.complete(outcome.label());
    write_output(writer, &render(operation, outcome))
}

fn execute(store: &RecordStore, request: &Request) -> StoreResult<Outcome> {
    match request {
        Request::List { .. } => store.list().map(Outcome::Payload),
        Request::Add { item, .. } => store.add_item(item),
        Request::Remove { id, .. } => store.remove(id),
        Request::FindById { id, .. } => store.find_by_id(id),
    }
}

/// Bytes shown to the user for an outcome
pub fn render(operation: Operation, outcome: Outcome) -> Vec<u8> {
    match outcome {
        Outcome::Payload(content) => content,
        Outcome::Conflict { id } => format!("Item with id {} already exists", id).into_bytes(),
        Outcome::NotFound { id } => match operation {
            Operation::FindById => Vec::new(),
            _ => format!("Item with id {} not found", id).into_bytes(),
        },
    }
}
