// src/main.rs

use clap::Parser;
use cre_harvest::config::{CommandLineInput, PipelineConfig, RunSource};
use cre_harvest::input::load_property_ids;
use cre_harvest::pipeline::reload_backup;
use cre_harvest::{
    CookieExportSession, Harvest, LoadReport, Login, PortalHttpClient, RawStore, RunReport,
    SqliteSink,
};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("cre_harvest.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Wires the configured collaborators together and runs one collection.
async fn execute_pipeline(
    config: &PipelineConfig,
    ids_file: &Path,
    login: Login,
) -> anyhow::Result<RunReport> {
    let ids = load_property_ids(ids_file)?;
    if ids.is_empty() {
        anyhow::bail!("no valid property IDs in {}", ids_file.display());
    }

    let session = Arc::new(CookieExportSession::new(&config.cookies_file));
    let transport = Arc::new(PortalHttpClient::new(config.endpoint.clone())?);
    let store = RawStore::new(&config.raw_dir);
    let sink = SqliteSink::open(&config.sink_path, config.table.clone())?;

    let mut harvest = Harvest::new(session, transport, store, sink, config.workers)
        .with_progress(config.progress);
    let report = harvest
        .run(&ids, &login, chrono::Local::now().naive_local())
        .await?;
    Ok(report)
}

/// Loads an earlier run's compiled backup into the configured table.
fn execute_reload(config: &PipelineConfig, csv: &Path) -> anyhow::Result<LoadReport> {
    let mut sink = SqliteSink::open(&config.sink_path, config.table.clone())?;
    let report = reload_backup(&mut sink, csv, chrono::Local::now().naive_local())?;
    Ok(report)
}

fn report_completion(config: &PipelineConfig, report: &RunReport) {
    println!(
        "✓ Loaded {} of {} properties into {} ({})",
        report.load.rows_inserted,
        report.requested,
        config.table,
        config.sink_path.display()
    );
    println!("✓ Backup written to {}", report.backup.display());
    if report.reissued > 0 {
        println!("  {} responses were reissued", report.reissued);
    }
    if !report.failures.is_empty() {
        eprintln!("⚠️  {} properties produced no row:", report.failures.len());
        for failure in &report.failures {
            eprintln!("   {}", failure);
        }
    }
    println!("  Elapsed: {}", report.timings);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;
    log::debug!("{:?}", config);

    match &config.source {
        RunSource::Portal {
            ids_file,
            username,
            password,
        } => {
            let login = Login {
                username: username.clone(),
                password: password.clone(),
            };
            let report = execute_pipeline(&config, ids_file, login).await?;
            report_completion(&config, &report);
        }
        RunSource::Backup { csv } => {
            let report = execute_reload(&config, csv)?;
            println!(
                "✓ Reloaded {} rows from {} into {}",
                report.rows_inserted,
                csv.display(),
                config.table
            );
        }
    }

    Ok(())
}
