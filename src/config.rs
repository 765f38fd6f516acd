// src/config.rs
use crate::constants::{
    DEFAULT_TABLE_NAME, DISPATCH_POOL_MAX, DISPATCH_POOL_SIZE, PORTAL_GRAPHQL_URL,
};
use crate::error::AppError;
use crate::types::{TableName, ValidationError};
use clap::Parser;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use url::Url;

/// Environment fallback for `--username`.
pub const USERNAME_ENV: &str = "COSTAR_USERNAME";
/// Environment fallback for `--password`.
pub const PASSWORD_ENV: &str = "COSTAR_PASSWORD";

fn default_raw_dir() -> PathBuf {
    std::env::temp_dir().join("cre_harvest_raw")
}

fn default_cookies_file() -> PathBuf {
    std::env::temp_dir().join("cre_harvest_cookies.json")
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// CSV file with a CoStarPropID column
    #[arg(long, required_unless_present = "from_backup", conflicts_with = "from_backup")]
    pub ids: Option<String>,

    /// Load a compiled CSV backup instead of collecting from the portal
    #[arg(long)]
    pub from_backup: Option<String>,

    /// Log a [completed/total] counter while responses arrive
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// SQLite database the table is loaded into (prompted when omitted)
    #[arg(long)]
    pub sink: Option<String>,

    /// Target table name (prompted when omitted)
    #[arg(long)]
    pub table: Option<String>,

    /// Portal account name (falls back to COSTAR_USERNAME)
    #[arg(long)]
    pub username: Option<String>,

    /// Portal password (falls back to COSTAR_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,

    /// Directory for raw responses and the CSV backup (defaults to temp dir)
    #[arg(long)]
    pub raw_dir: Option<String>,

    /// Cookie export written by the login helper
    #[arg(long)]
    pub cookies: Option<String>,

    /// Number of requests in flight at once
    #[arg(long, default_value_t = DISPATCH_POOL_SIZE)]
    pub workers: usize,

    /// GraphQL endpoint
    #[arg(long, default_value = PORTAL_GRAPHQL_URL)]
    pub endpoint: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the rows of a run come from.
#[derive(Clone)]
pub enum RunSource {
    /// Collect the listed properties from the portal.
    Portal {
        ids_file: PathBuf,
        username: String,
        password: String,
    },
    /// Reload a compiled CSV backup of an earlier run.
    Backup { csv: PathBuf },
}

impl fmt::Debug for RunSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portal {
                ids_file, username, ..
            } => f
                .debug_struct("Portal")
                .field("ids_file", ids_file)
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Backup { csv } => f.debug_struct("Backup").field("csv", csv).finish(),
        }
    }
}

/// Resolved configuration, validated and ready to drive a run.
#[derive(Clone)]
pub struct PipelineConfig {
    pub source: RunSource,
    pub raw_dir: PathBuf,
    pub sink_path: PathBuf,
    pub table: TableName,
    pub cookies_file: PathBuf,
    pub endpoint: Url,
    pub workers: usize,
    pub progress: bool,
    pub verbose: bool,
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("source", &self.source)
            .field("raw_dir", &self.raw_dir)
            .field("sink_path", &self.sink_path)
            .field("table", &self.table)
            .field("cookies_file", &self.cookies_file)
            .field("endpoint", &self.endpoint.as_str())
            .field("workers", &self.workers)
            .field("progress", &self.progress)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl PipelineConfig {
    /// Resolves the configuration from CLI input, the process environment,
    /// and stdin prompts for a missing sink descriptor.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok(), prompt_stdin)
    }

    /// Resolution with injectable environment and prompt sources.
    pub fn resolve_with<E, P>(
        cli: CommandLineInput,
        env: E,
        mut prompt: P,
    ) -> Result<Self, AppError>
    where
        E: Fn(&str) -> Option<String>,
        P: FnMut(&str) -> Result<String, AppError>,
    {
        let source = match first_non_empty(cli.from_backup, None) {
            Some(csv) => RunSource::Backup {
                csv: non_empty_path(&csv, "from-backup")?,
            },
            None => {
                let username = first_non_empty(cli.username, env(USERNAME_ENV)).ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "--username or {} is required",
                        USERNAME_ENV
                    ))
                })?;
                let password = first_non_empty(cli.password, env(PASSWORD_ENV)).ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "--password or {} is required",
                        PASSWORD_ENV
                    ))
                })?;
                let ids = cli.ids.ok_or_else(|| {
                    AppError::MissingConfiguration("--ids or --from-backup is required".to_string())
                })?;
                RunSource::Portal {
                    ids_file: non_empty_path(&ids, "ids")?,
                    username,
                    password,
                }
            }
        };

        let endpoint = Url::parse(&cli.endpoint).map_err(|e| ValidationError::InvalidUrl {
            url: cli.endpoint.clone(),
            reason: e.to_string(),
        })?;

        let workers = cli.workers.clamp(1, DISPATCH_POOL_MAX);
        if workers != cli.workers {
            log::warn!("--workers {} out of range, using {}", cli.workers, workers);
        }

        let sink = match first_non_empty(cli.sink, None) {
            Some(sink) => sink,
            None => prompt("Enter the path of the SQLite database to load into: ")?,
        };
        let sink_path = non_empty_path(&sink, "sink")?;

        let table = match first_non_empty(cli.table, None) {
            Some(table) => table,
            None => prompt("Enter the name of the target table: ")?,
        };
        let table = if table.trim().is_empty() {
            TableName::new(DEFAULT_TABLE_NAME)?
        } else {
            TableName::new(table)?
        };

        Ok(PipelineConfig {
            source,
            raw_dir: cli.raw_dir.map(PathBuf::from).unwrap_or_else(default_raw_dir),
            sink_path,
            table,
            cookies_file: cli
                .cookies
                .map(PathBuf::from)
                .unwrap_or_else(default_cookies_file),
            endpoint,
            workers,
            progress: cli.progress,
            verbose: cli.verbose,
        })
    }
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .filter(|s| !s.trim().is_empty())
        .or_else(|| fallback.filter(|s| !s.trim().is_empty()))
}

fn non_empty_path(value: &str, field: &'static str) -> Result<PathBuf, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field).into());
    }
    Ok(PathBuf::from(trimmed))
}

fn prompt_stdin(message: &str) -> Result<String, AppError> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes())?;
    stdout.flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["cre-harvest", "--ids", "ids.csv"];
        argv.extend_from_slice(args);
        CommandLineInput::parse_from(argv)
    }

    fn credentials_of(config: &PipelineConfig) -> (&str, &str) {
        match &config.source {
            RunSource::Portal {
                username, password, ..
            } => (username, password),
            RunSource::Backup { .. } => panic!("expected a portal run"),
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn no_prompt(message: &str) -> Result<String, AppError> {
        panic!("unexpected prompt: {}", message)
    }

    #[test]
    fn test_resolve_from_flags() {
        let config = PipelineConfig::resolve_with(
            cli(&[
                "--username", "u", "--password", "p", "--sink", "out.db", "--table", "Props",
                "--workers", "8",
            ]),
            no_env,
            no_prompt,
        )
        .unwrap();
        assert_eq!(config.table.as_str(), "Props");
        assert_eq!(config.workers, 8);
        assert_eq!(config.endpoint.as_str(), PORTAL_GRAPHQL_URL);
        assert!(!format!("{:?}", config).contains("\"p\""));
        assert_eq!(credentials_of(&config), ("u", "p"));
    }

    #[test]
    fn test_credentials_fall_back_to_environment() {
        let env = |key: &str| match key {
            USERNAME_ENV => Some("env-user".to_string()),
            PASSWORD_ENV => Some("env-pass".to_string()),
            _ => None,
        };
        let config =
            PipelineConfig::resolve_with(cli(&["--sink", "a.db", "--table", "T"]), env, no_prompt)
                .unwrap();
        assert_eq!(credentials_of(&config), ("env-user", "env-pass"));
    }

    #[test]
    fn test_missing_credentials_fail() {
        let err = PipelineConfig::resolve_with(cli(&["--sink", "a.db"]), no_env, no_prompt)
            .unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn test_prompts_for_sink_and_defaults_table() {
        let mut asked = Vec::new();
        let config = PipelineConfig::resolve_with(
            cli(&["--username", "u", "--password", "p", "--workers", "500"]),
            no_env,
            |message: &str| {
                asked.push(message.to_string());
                Ok(if asked.len() == 1 { "run.db".to_string() } else { String::new() })
            },
        )
        .unwrap();
        assert_eq!(asked.len(), 2);
        assert_eq!(config.sink_path, PathBuf::from("run.db"));
        assert_eq!(config.table.as_str(), DEFAULT_TABLE_NAME);
        assert_eq!(config.workers, DISPATCH_POOL_MAX);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = PipelineConfig::resolve_with(
            cli(&[
                "--username", "u", "--password", "p", "--sink", "a.db", "--table", "T",
                "--endpoint", "not a url",
            ]),
            no_env,
            no_prompt,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_backup_reload_needs_no_credentials() {
        let config = PipelineConfig::resolve_with(
            CommandLineInput::parse_from([
                "cre-harvest",
                "--from-backup",
                "05.01.2024_compiled.csv",
                "--sink",
                "a.db",
                "--table",
                "T",
            ]),
            no_env,
            no_prompt,
        )
        .unwrap();
        assert!(matches!(
            config.source,
            RunSource::Backup { ref csv } if csv == &PathBuf::from("05.01.2024_compiled.csv")
        ));
    }

    #[test]
    fn test_ids_and_backup_conflict() {
        let parsed = CommandLineInput::try_parse_from([
            "cre-harvest",
            "--ids",
            "ids.csv",
            "--from-backup",
            "b.csv",
        ]);
        assert!(parsed.is_err());
        assert!(CommandLineInput::try_parse_from(["cre-harvest"]).is_err());
    }
}
