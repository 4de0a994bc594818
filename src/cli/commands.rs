//! Command dispatch

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{
    build_list_report, build_list_report_concurrent, open_sink, run_stress, ApplicationError,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{IndentedNode, SimpleNode};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(command) => {
            let settings = load_settings(cli)?;
            match command {
                Commands::Demo { concurrent } => cmd_demo(&settings, *concurrent),
                Commands::Stress { workers, writes } => cmd_stress(&settings, *workers, *writes),
                Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
            }
        }
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Config file and environment, then command-line overrides.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(output) = &cli.output {
        settings.output = Some(output.clone());
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

#[instrument(skip(settings))]
fn cmd_demo(settings: &Settings, concurrent: bool) -> CliResult<()> {
    let root = if concurrent {
        let root = SimpleNode::new();
        build_list_report_concurrent(&root);
        root.node().clone()
    } else {
        let root = IndentedNode::new();
        build_list_report(&root)?;
        root
    };

    let mut sink = open_sink(settings.output.as_deref())?;
    let written = root.flush_to(&mut sink)?;
    finish(&mut sink)?;
    debug!(written, "demo rendered");
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_stress(settings: &Settings, workers: Option<usize>, writes: Option<usize>) -> CliResult<()> {
    let workers = workers.unwrap_or(settings.workers);
    let writes = writes.unwrap_or(settings.writes_per_worker);
    if workers == 0 {
        return Err(CliError::InvalidArgs("--workers must be at least 1".to_string()));
    }

    let mut sink = open_sink(settings.output.as_deref())?;
    let report = run_stress(workers, writes, &mut sink)?;
    finish(&mut sink)?;
    output::success(&format!(
        "{} writers, {} lines, {} bytes",
        workers, report.lines, report.bytes
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info("no config directory available"),
        },
    }
    Ok(())
}

fn finish(sink: &mut dyn Write) -> CliResult<()> {
    sink.flush().map_err(|e| {
        CliError::Application(ApplicationError::OperationFailed {
            context: "flush output".to_string(),
            source: Box::new(e),
        })
    })
}
