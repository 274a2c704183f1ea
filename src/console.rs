//! Line-oriented console that drives a [`SharedConfigStore`].
//!
//! Commands:
//! - `get <field>` / `set <field> <value>`
//! - `show`, `query`, `reset`
//! - `watch <field>` / `unwatch <field>`
//! - `help`, `quit`

use std::{collections::HashMap, str::FromStr};

use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::{
    cell::Subscription,
    colors::colored_field,
    error::ConfigError,
    field::{Field, FieldValue, ValueKind},
    observer::log_changes,
    query::{ResultsQuery, origins_visible},
    store::SharedConfigStore,
};

pub const HELP: &str = "\
get <field>            print a field
set <field> <value>    write a field (text values may contain spaces)
show                   print every field
query                  print the results URL built from the current values
reset                  restore the preset defaults
watch <field>          log every change to a field
unwatch <field>        stop logging a field
help                   print this text
quit                   leave the console

fields: backendUrl, timeSpanMinutes, showOrigins";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get(Field),
    Set(Field, FieldValue),
    Show,
    Query,
    Reset,
    Watch(Field),
    Unwatch(Field),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ConfigError;

    /// Only the verb and field name are trimmed; a `set` value is everything
    /// after the single separator following the field name, verbatim.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim_start()));

        let field_only = |usage: &'static str| -> Result<Field, ConfigError> {
            let rest = rest.trim_end();
            if rest.is_empty() || rest.contains(char::is_whitespace) {
                return Err(ConfigError::Usage(usage));
            }
            rest.parse()
        };

        match verb.to_ascii_lowercase().as_str() {
            "get" => field_only("get <field>").map(Command::Get),
            "set" => {
                if rest.trim_end().is_empty() {
                    return Err(ConfigError::Usage("set <field> <value>"));
                }
                let (name, raw) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                let field: Field = name.parse()?;
                if raw.trim().is_empty() && field.kind() != ValueKind::Text {
                    return Err(ConfigError::Usage("set <field> <value>"));
                }
                Ok(Command::Set(field, FieldValue::parse_for(field, raw)?))
            }
            "show" => Ok(Command::Show),
            "query" => Ok(Command::Query),
            "reset" => Ok(Command::Reset),
            "watch" => field_only("watch <field>").map(Command::Watch),
            "unwatch" => field_only("unwatch <field>").map(Command::Unwatch),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(ConfigError::UnknownCommand(verb.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print back to the user.
    Reply(String),
    /// Nothing to print (blank line or comment).
    Silent,
    Quit,
}

/// Console session bound to one store handle.
#[derive(Debug)]
pub struct Console {
    store: SharedConfigStore,
    watches: HashMap<Field, Subscription>,
}

impl Console {
    /// Starts a session with no fields watched.
    pub fn new(store: SharedConfigStore) -> Self {
        Self {
            store,
            watches: HashMap::new(),
        }
    }

    /// Store this session writes to.
    pub fn store(&self) -> &SharedConfigStore {
        &self.store
    }

    /// Whether a change logger is attached to `field`.
    pub fn is_watching(&self, field: Field) -> bool {
        self.watches.contains_key(&field)
    }

    /// Parses and runs one input line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, ConfigError> {
        let head = line.trim_start();
        if head.is_empty() || head.starts_with('#') {
            return Ok(Outcome::Silent);
        }
        let command: Command = line.parse()?;
        debug!(?command, "console command");
        Ok(self.apply(command))
    }

    fn apply(&mut self, command: Command) -> Outcome {
        let reply = match command {
            Command::Get(field) => self.store.get(field).to_string(),
            Command::Set(field, value) => {
                let shown = value.to_string();
                // Parsed for this field, so the kinds always line up.
                if let Err(err) = self.store.set(field, value) {
                    return Outcome::Reply(err.to_string());
                }
                format!("{} = {}", field, shown)
            }
            Command::Show => self.show(),
            Command::Query => {
                let query = ResultsQuery::from_store(&self.store);
                let origins = if origins_visible(&self.store) { "shown" } else { "hidden" };
                format!("GET {} (origins {})", query, origins)
            }
            Command::Reset => {
                self.store.reset();
                format!("reset to {} preset\n{}", self.store.preset(), self.show())
            }
            Command::Watch(field) => {
                let subscription = log_changes(&self.store, field);
                let tag = subscription.tag().to_string();
                if self.watches.insert(field, subscription).is_some() {
                    format!("re-watching {} as [{}]", field, tag)
                } else {
                    format!("watching {} as [{}]", field, tag)
                }
            }
            Command::Unwatch(field) => match self.watches.remove(&field) {
                Some(subscription) => {
                    subscription.unsubscribe();
                    format!("stopped watching {}", field)
                }
                None => format!("not watching {}", field),
            },
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Reply(reply)
    }

    fn show(&self) -> String {
        Field::ALL
            .iter()
            .map(|field| format!("{} = {}", field, self.store.get(*field)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Reads commands line by line until `quit` or end of input.
    ///
    /// Command errors are written to `output` and the loop carries on; only
    /// I/O failures end the session early.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match self.execute(&line) {
                Ok(Outcome::Reply(text)) => {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
                Ok(Outcome::Silent) => {}
                Ok(Outcome::Quit) => break,
                Err(err) => {
                    warn!("{}", err);
                    let text = format!("{} {}\n", "error:".red().bold(), err);
                    output.write_all(text.as_bytes()).await?;
                }
            }
            output.flush().await?;
        }
        output.flush().await
    }
}

/// Prints the field banner shown when the console starts.
pub fn banner(store: &SharedConfigStore) -> String {
    Field::ALL
        .iter()
        .map(|field| format!("  {} = {}", colored_field(*field), store.get(*field)))
        .collect::<Vec<_>>()
        .join("\n")
}
