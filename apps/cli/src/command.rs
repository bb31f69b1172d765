//! The commands the CLI can run and how their results are shown.

use crate::error::CliError;

use api_client::{ApiError, Dispatcher, HttpMethod, NoInput, Operation, Query};

use common::ErrorLocation;

use std::panic::Location;
use std::process::ExitCode;
use std::sync::Arc;

use serde_json::{Value, json};
use tokio::sync::watch;

pub const USAGE: &str = "usage: billing <viewer | health | invoice NUMBER>";

const VIEWER: Operation<NoInput, Value> =
    Operation::query("Viewer", "query Viewer { viewer { id email name } }");

const INVOICE: Operation<Value, Value> = Operation::query(
    "Invoice",
    "query Invoice($number: String!) { invoice(number: $number) { number status total dueDate } }",
);

const HEALTH: Operation<NoInput, Value> = Operation::rest(HttpMethod::Get, "v1/health");

/// Exit code for a call that ended on an authentication failure.
const EXIT_SIGN_IN_REQUIRED: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Viewer,
    Health,
    Invoice { number: String },
}

impl Command {
    /// Parse the arguments after the program name. No arguments means `viewer`.
    ///
    /// # Errors
    /// Returns [`CliError::Usage`] for an unknown command or a missing/extra argument.
    #[track_caller]
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let command = match args.next().as_deref() {
            None | Some("viewer") => Command::Viewer,
            Some("health") => Command::Health,
            Some("invoice") => match args.next() {
                Some(number) => Command::Invoice { number },
                None => return Err(usage("invoice needs an invoice number")),
            },
            Some(other) => return Err(usage(&format!("unknown command '{other}'"))),
        };

        if let Some(extra) = args.next() {
            return Err(usage(&format!("unexpected argument '{extra}'")));
        }

        Ok(command)
    }

    /// Start the command on the runtime and return its observable state.
    pub fn watch(self, dispatcher: &Arc<Dispatcher>) -> watch::Receiver<Query<ApiError, Value>> {
        match self {
            Command::Viewer => dispatcher.watch(VIEWER, ()),
            Command::Health => dispatcher.watch(HEALTH, ()),
            Command::Invoice { number } => dispatcher.watch(INVOICE, json!({ "number": number })),
        }
    }
}

/// Report each state the receiver exposes exactly once, until the call settles.
///
/// Returns the settled state, or `None` if the call ended without settling.
pub async fn observe(
    mut receiver: watch::Receiver<Query<ApiError, Value>>,
    mut on_state: impl FnMut(&Query<ApiError, Value>),
) -> Option<Query<ApiError, Value>> {
    loop {
        let state = receiver.borrow_and_update().clone();
        on_state(&state);

        if state.is_settled() {
            return Some(state);
        }
        if receiver.changed().await.is_err() {
            return None;
        }
    }
}

#[track_caller]
fn usage(message: &str) -> CliError {
    CliError::Usage {
        message: format!("{message}\n{USAGE}"),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// One line (or a JSON document) describing the current state.
pub fn render(state: &Query<ApiError, Value>) -> String {
    state.as_ref().fold(
        || "Loading...".to_string(),
        |error| format!("Error [{}]: {}", error.code(), error.message()),
        |value| serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    )
}

pub fn exit_code(state: &Query<ApiError, Value>) -> ExitCode {
    state.as_ref().fold(
        || ExitCode::FAILURE,
        |error| {
            if error.code().is_authentication() {
                ExitCode::from(EXIT_SIGN_IN_REQUIRED)
            } else {
                ExitCode::FAILURE
            }
        },
        |_| ExitCode::SUCCESS,
    )
}
