//! Shell state: the loaded book, view position, and persistence handles.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use uuid::Uuid;

use easybudget_config::{Config, ConfigError, ConfigManager};
use easybudget_core::{
    storage::{BookStorage, LoadOutcome},
    time::Clock,
    CoreError, ExpansionService,
};
use easybudget_domain::Book;
use easybudget_storage_json::JsonBookStorage;

use crate::{output, system_clock::SystemClock};

pub const HOME_ENV: &str = "EASYBUDGET_HOME";
pub const SCRIPT_ENV: &str = "EASYBUDGET_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Fatal shell errors that terminate the process.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Per-command failures reported to the user without leaving the shell.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub fn usage(message: impl Into<String>) -> CommandError {
    CommandError::Usage(message.into())
}

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub config: Config,
    pub storage: JsonBookStorage,
    pub book: Book,
    pub clock: SystemClock,
    /// Year/month currently shown by the calendar.
    pub year: i32,
    pub month: u32,
    /// Day the banner and `list` default to.
    pub selected: NaiveDate,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let env_home = std::env::var_os(HOME_ENV).map(PathBuf::from);
        let base_dir = env_home
            .clone()
            .unwrap_or_else(|| Config::default().resolve_data_dir());

        let config_manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = config_manager.load()?;

        let plain = mode == CliMode::Script || !config.ui_color_enabled;
        output::set_preferences(output::OutputPreferences {
            plain_output: plain,
        });
        if !config.ui_color_enabled {
            colored::control::set_override(false);
        }

        // An explicit environment override pins everything under one root;
        // otherwise the config may redirect the data directory.
        let data_dir = match env_home {
            Some(_) => base_dir,
            None => config.resolve_data_dir(),
        };
        let storage = JsonBookStorage::new(data_dir)?;
        tracing::debug!(data_dir = %storage.data_dir().display(), "using data directory");

        let (mut book, outcome) = storage.load_or_init()?;
        match &outcome {
            LoadOutcome::Loaded => {}
            LoadOutcome::Initialized => {
                output::info("No budget book found; starting a fresh one.");
            }
            LoadOutcome::Quarantined(path) => {
                output::warning(format!(
                    "The budget book could not be read; the unreadable file was moved to {} and a fresh book was started.",
                    path.display()
                ));
            }
        }

        let clock = SystemClock;
        let today = clock.today();

        // Extend every recurring rule out to the horizon before first paint.
        let horizon = ExpansionService::horizon(today, config.resolve_horizon_months());
        let created = ExpansionService::expand_all(&mut book, horizon)?;
        if created > 0 || !matches!(outcome, LoadOutcome::Loaded) {
            storage.save_book(&book)?;
        }

        Ok(Self {
            mode,
            running: true,
            config,
            storage,
            book,
            clock,
            year: today.year(),
            month: today.month(),
            selected: today,
        })
    }

    pub fn prompt(&self) -> String {
        "easybudget> ".to_string()
    }

    pub fn horizon(&self) -> NaiveDate {
        ExpansionService::horizon(self.clock.today(), self.config.resolve_horizon_months())
    }

    pub fn persist(&self) -> Result<(), CommandError> {
        self.storage.save_book(&self.book)?;
        Ok(())
    }

    pub fn report_error(&mut self, err: CommandError) -> Result<(), CliError> {
        output::error(&err);
        Ok(())
    }

    /// Resolves a transaction from a full id or an unambiguous prefix.
    pub fn resolve_transaction(&self, token: &str) -> Result<Uuid, CommandError> {
        resolve_id(
            token,
            self.book.transactions.iter().map(|t| t.id),
            "transaction",
        )
    }

    /// Resolves a rule from a full id or an unambiguous prefix.
    pub fn resolve_rule(&self, token: &str) -> Result<Uuid, CommandError> {
        resolve_id(token, self.book.rules.iter().map(|r| r.id), "recurrence rule")
    }

    /// Resolves a series from either a rule id or the id of one of its
    /// occurrences.
    pub fn resolve_series(&self, token: &str) -> Result<Uuid, CommandError> {
        if let Ok(rule_id) = self.resolve_rule(token) {
            return Ok(rule_id);
        }
        let txn_id = self.resolve_transaction(token).map_err(|_| {
            usage(format!("`{token}` matches neither a rule nor a transaction"))
        })?;
        self.book
            .transaction(txn_id)
            .and_then(|t| t.series_id)
            .ok_or_else(|| {
                usage(format!(
                    "transaction `{token}` is not part of a recurring series"
                ))
            })
    }
}

fn resolve_id(
    token: &str,
    candidates: impl Iterator<Item = Uuid>,
    kind: &str,
) -> Result<Uuid, CommandError> {
    let needle = token.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(usage(format!("missing {kind} id")));
    }
    let matches: Vec<Uuid> = candidates
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.len() {
        0 => Err(usage(format!("no {kind} matches `{token}`"))),
        1 => Ok(matches[0]),
        n => Err(usage(format!(
            "`{token}` is ambiguous: {n} {kind}s share that prefix"
        ))),
    }
}
