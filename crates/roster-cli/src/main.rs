//! `roster`: manage the company database from the command line.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use roster_cli::commands::{self, CommandError, ListTarget};
use roster_cli::config::{self, Config, LoggingConfig};
use roster_store::Session;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Departments, employees, and reviews in one SQLite file.")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create any missing tables.
    Init,
    /// Drop all tables.
    Reset,
    /// Recreate the tables and insert demo data.
    Seed,
    /// Print every row of a table as JSON.
    List {
        #[arg(value_enum)]
        target: ListTarget,
    },
    /// Print one department and its employees as JSON.
    ShowDepartment { id: i64 },
}

fn resolve_config_path(flag: Option<String>) -> (Option<String>, &'static str) {
    if let Some(path) = flag.filter(|value| !value.trim().is_empty()) {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("ROSTER_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn config_file_exists(path: &str) -> bool {
    std::path::Path::new(path).is_file()
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(command: Command, config: &Config) -> Result<(), CommandError> {
    let mut session = Session::open(&config.database.path, config.database.runtime_settings())?;
    tracing::info!(path = config.database.path.as_str(), "opened database");

    match command {
        Command::Init => commands::init(&session)?,
        Command::Reset => commands::reset(&mut session)?,
        Command::Seed => {
            commands::seed(&mut session)?;
        }
        Command::List { target } => {
            let rows = commands::list(&mut session, target)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::ShowDepartment { id } => {
            let department = commands::show_department(&mut session, id)?;
            println!("{}", serde_json::to_string_pretty(&department)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (resolved_config_path, config_source) = resolve_config_path(cli.config);
    let selected_config_path = resolved_config_path.as_deref().or(Some("roster.toml"));

    let config = match config::load_config(selected_config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("roster: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved configuration path"
    );
    if let Some(path) = selected_config_path.filter(|path| !config_file_exists(path)) {
        tracing::info!(path, "config file not found, using defaults");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_target() {
        let cli = Cli::try_parse_from(["roster", "--config", "hr.toml", "list", "employees"])
            .expect("arguments should parse");
        assert_eq!(cli.config.as_deref(), Some("hr.toml"));
        assert!(matches!(
            cli.command,
            Command::List {
                target: ListTarget::Employees
            }
        ));
    }

    #[test]
    fn explicit_flag_wins_config_resolution() {
        let (path, source) = resolve_config_path(Some("custom.toml".to_string()));
        assert_eq!(path.as_deref(), Some("custom.toml"));
        assert_eq!(source, "cli-arg");
    }

    #[test]
    fn detects_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        assert!(!config_file_exists(path.to_str().unwrap()));

        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert!(config_file_exists(path.to_str().unwrap()));
        assert!(!config_file_exists(dir.path().to_str().unwrap()));
    }

    #[test]
    fn runs_seed_against_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("company.db").to_string_lossy().into_owned();

        run(Command::Seed, &config).expect("seed should succeed");
        run(
            Command::ShowDepartment { id: 1 },
            &config,
        )
        .expect("show should succeed");
        assert!(matches!(
            run(Command::ShowDepartment { id: 42 }, &config),
            Err(CommandError::NotFound { .. })
        ));
    }
}
