use crate::{CandidateRow, Cli, CliResult, Commands, Prompter, flows, logger};

use portal_auth::{CredentialGate, IdentityResolver, PinManager};
use portal_client::{DirectoryBackend, RestBackend};
use portal_config::Config;
use portal_session::{FileStorage, SessionStorage, SessionStore};

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde_json::Value;

/// Wired-up sign-in components for one command invocation.
pub struct App {
    gate: CredentialGate,
}

impl App {
    /// Builds the app against the configured REST backend and file-backed sessions.
    pub async fn build(config: &Config, config_dir: &Path) -> CliResult<Self> {
        let backend: Arc<dyn DirectoryBackend> = Arc::new(RestBackend::new(&config.backend)?);
        let storage: Arc<dyn SessionStorage> =
            Arc::new(FileStorage::new(config.session_dir(config_dir)));

        Self::with_parts(config, backend, storage).await
    }

    pub async fn with_parts(
        config: &Config,
        backend: Arc<dyn DirectoryBackend>,
        storage: Arc<dyn SessionStorage>,
    ) -> CliResult<Self> {
        let sessions = Arc::new(SessionStore::open(storage, config.session.key.as_str()).await?);
        let resolver = Arc::new(IdentityResolver::from_config(backend.clone(), &config.auth));
        let pins = PinManager::from_config(backend, &config.auth);

        Ok(Self {
            gate: CredentialGate::new(resolver, pins, sessions),
        })
    }

    pub fn gate(&self) -> &CredentialGate {
        &self.gate
    }

    /// Runs one command. `None` means there is nothing to print on stdout.
    pub async fn execute<R: BufRead, W: Write>(
        &self,
        command: Commands,
        prompter: &mut Prompter<R, W>,
    ) -> CliResult<Option<Value>> {
        match command {
            Commands::Search { fragment } => {
                let candidates = self.gate.resolver().search(&fragment).await?;
                let rows: Vec<CandidateRow> = candidates.iter().map(CandidateRow::from).collect();
                Ok(Some(serde_json::to_value(rows)?))
            }
            Commands::Register { fragment } => {
                let user = flows::register(&self.gate, prompter, &fragment).await?;
                prompter.say(&format!("Welcome, {}!", user.name))?;
                Ok(Some(serde_json::to_value(user)?))
            }
            Commands::Login { fragment } => {
                let user = flows::login(&self.gate, prompter, &fragment).await?;
                prompter.say(&format!("Welcome back, {}!", user.name))?;
                Ok(Some(serde_json::to_value(user)?))
            }
            Commands::Whoami => match self.gate.sessions().current_session().await? {
                Some(user) => Ok(Some(serde_json::to_value(user)?)),
                None => {
                    prompter.say("Not signed in.")?;
                    Ok(None)
                }
            },
            Commands::Logout => {
                self.gate.sign_out().await?;
                prompter.say("Signed out.")?;
                Ok(None)
            }
        }
    }
}

/// Loads config, initializes logging, runs the command, and prints its JSON result.
pub async fn run(cli: Cli) -> CliResult<()> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => Config::config_dir()?,
    };
    let config = Config::load_from(&config_dir)?;
    config.validate()?;

    let log_file_path = match config.log_file_path(&config_dir) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Some(path)
        }
        None => None,
    };
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting portal v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let app = App::build(&config, &config_dir).await?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());
    let output = app.execute(cli.command, &mut prompter).await?;

    if let Some(value) = output {
        let json = if cli.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        println!("{json}");
    }

    Ok(())
}
