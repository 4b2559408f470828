//! Command dispatch: one function per subcommand.

use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{history_lines, parse_commands, Outcome, Session, ToTermTree};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{EmployeeId, Hierarchy};
use crate::infrastructure::{load_hierarchy, sample_organization, to_toml};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { toml }) => cmd_show(cli, *toml),
        Some(Commands::Lookup { id }) => cmd_lookup(cli, *id),
        Some(Commands::Apply { commands, toml }) => cmd_apply(cli, commands, *toml),
        Some(Commands::History { commands }) => cmd_history(cli, commands),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(cli),
            ConfigCommands::Path => cmd_config_path(),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

/// Opens the hierarchy from `--file`, the configured file, or the built-in sample.
#[instrument(level = "debug", skip(cli))]
fn open_hierarchy(cli: &Cli) -> CliResult<Hierarchy> {
    let settings = load_settings(cli)?;
    let root = match cli.file.as_ref().or(settings.hierarchy_file.as_ref()) {
        Some(path) => load_hierarchy(path)?,
        None => {
            debug!("No hierarchy file configured, using sample organization");
            sample_organization()
        }
    };
    Ok(Hierarchy::with_history_limit(
        root,
        settings.effective_history_limit(),
    )?)
}

fn print_tree(hierarchy: &Hierarchy, as_toml: bool) -> CliResult<()> {
    if as_toml {
        output::info(&to_toml(&hierarchy.to_employee())?);
    } else {
        output::info(&hierarchy.to_term_tree());
    }
    Ok(())
}

/// Runs `inputs` against a fresh session, reporting each outcome.
///
/// Stops at the first failing command and returns its error.
fn run_session(cli: &Cli, inputs: &[String]) -> CliResult<Session> {
    let commands = parse_commands(inputs)?;
    let mut session = Session::new(open_hierarchy(cli)?);

    for command in &commands {
        match session.apply(*command) {
            Ok(outcome @ Outcome::Unchanged { .. }) => output::unchanged(&outcome),
            Ok(outcome) => output::success(&outcome),
            Err(e) => {
                output::failure(&command);
                return Err(e.into());
            }
        }
    }
    Ok(session)
}

#[instrument(skip(cli))]
fn cmd_show(cli: &Cli, as_toml: bool) -> CliResult<()> {
    let hierarchy = open_hierarchy(cli)?;
    print_tree(&hierarchy, as_toml)
}

#[instrument(skip(cli))]
fn cmd_lookup(cli: &Cli, id: EmployeeId) -> CliResult<()> {
    let hierarchy = open_hierarchy(cli)?;
    let employee = hierarchy.lookup(id)?;

    output::header(&employee);
    match employee.supervisor() {
        Some(supervisor) => output::action("supervisor", &supervisor),
        None => output::action("supervisor", &"none (root)"),
    }
    let subordinates: Vec<_> = employee.subordinates().collect();
    output::action("subordinates", &subordinates.len());
    for subordinate in subordinates {
        output::detail(&subordinate);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_apply(cli: &Cli, inputs: &[String], as_toml: bool) -> CliResult<()> {
    let session = run_session(cli, inputs)?;
    if !as_toml {
        output::header(&"Result");
    }
    print_tree(session.hierarchy(), as_toml)
}

#[instrument(skip(cli))]
fn cmd_history(cli: &Cli, inputs: &[String]) -> CliResult<()> {
    let session = run_session(cli, inputs)?;
    let history = session.hierarchy().history();

    output::header(&format!(
        "History: {} transitions, cursor at {}",
        history.len(),
        history.cursor()
    ));
    if history.is_empty() {
        output::detail(&"(empty)");
    }
    for line in history_lines(history) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_config_show(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let rendered = settings.to_toml()?;
    if rendered.trim().is_empty() {
        output::detail(&"(defaults)");
    } else {
        output::info(&rendered);
    }
    Ok(())
}

fn cmd_config_path() -> CliResult<()> {
    let path = global_config_path()
        .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
    output::info(&path.display());
    Ok(())
}
